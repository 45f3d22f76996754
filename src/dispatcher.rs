//! Command execution and notification broadcast.
//!
//! The dispatcher runs one shell command to completion, then reports the
//! outcome to every active backend in order. A failing backend is logged and
//! skipped; the command's exit code is always returned untouched.

use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::error::{AppError, AppResult};
use crate::notifications::{ActiveBackends, BackendError};

/// Shell used to interpret the command string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    program: String,
    flag: String,
}

impl Shell {
    pub fn new(program: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flag: flag.into(),
        }
    }

    fn command(&self, command: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(&self.flag)
            .arg(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }
}

impl Default for Shell {
    #[cfg(unix)]
    fn default() -> Self {
        Self::new("/bin/sh", "-c")
    }

    #[cfg(not(unix))]
    fn default() -> Self {
        Self::new("cmd", "/C")
    }
}

/// Outcome of one command execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    command: String,
    exit_code: i32,
}

impl CommandResult {
    pub fn new(command: impl Into<String>, exit_code: i32) -> Self {
        Self {
            command: command.into(),
            exit_code,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Per-backend outcome of a broadcast
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Backends notified without error, in order
    pub notified: Vec<String>,
    /// Backends whose notification failed, in order
    pub failures: Vec<(String, BackendError)>,
}

impl DispatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs commands and broadcasts their outcome
#[derive(Debug)]
pub struct Dispatcher {
    backends: ActiveBackends,
    shell: Shell,
}

impl Dispatcher {
    pub fn new(backends: ActiveBackends) -> Self {
        Self {
            backends,
            shell: Shell::default(),
        }
    }

    pub fn with_shell(mut self, shell: Shell) -> Self {
        self.shell = shell;
        self
    }

    pub fn backends(&self) -> &ActiveBackends {
        &self.backends
    }

    /// Run `command` and notify every backend; returns the command's exit code
    pub async fn run(&mut self, command: &str) -> AppResult<i32> {
        let result = self.execute(command).await?;

        let report = self.notify_all(&result).await;
        if !report.is_clean() {
            warn!(
                failed = report.failures.len(),
                notified = report.notified.len(),
                "some notifications could not be delivered"
            );
        }

        Ok(result.exit_code())
    }

    /// Run `command` through the shell and wait for it, without timeout
    pub async fn execute(&self, command: &str) -> AppResult<CommandResult> {
        debug!(command, "start running command...");
        let status = self
            .shell
            .command(command)
            .status()
            .await
            .map_err(|source| AppError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let exit_code = exit_code(status);
        debug!(exit_code, "end of command");
        Ok(CommandResult::new(command, exit_code))
    }

    /// Notify every backend, in order, of `result`.
    ///
    /// Never stops early: each failure is logged and recorded, then the next
    /// backend is tried.
    pub async fn notify_all(&mut self, result: &CommandResult) -> DispatchReport {
        let mut report = DispatchReport::default();

        for instance in self.backends.iter_mut() {
            instance.command = Some(result.command().to_string());

            let backend = instance.backend();
            let outcome = if result.success() {
                backend.notify_success(result.command()).await
            } else {
                backend.notify_failure(result.command(), result.exit_code()).await
            };

            match outcome {
                Ok(()) => {
                    if result.success() {
                        info!(backend = %instance.name(), "success notification done");
                    } else {
                        info!(backend = %instance.name(), "error notification done");
                    }
                    report.notified.push(instance.name().to_string());
                }
                Err(e) => {
                    error!(backend = %instance.name(), error = %e, "notification failed");
                    report.failures.push((instance.name().to_string(), e));
                }
            }
        }

        report
    }
}

/// Exit code of a finished child; signal deaths are reported as `-signal`
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}

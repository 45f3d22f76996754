//! Standard error notification backend.
//!
//! Always available and used by the built-in default configuration. It
//! accepts (and ignores) any option.

use std::io::{self, Write};
use std::sync::Mutex;

use async_trait::async_trait;

use super::backend::NotificationBackend;
use super::error::{BackendError, BackendResult};
use crate::config::SectionOptions;

/// Writes a one-line summary to standard error
pub struct StderrBackend {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl StderrBackend {
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stderr()))
    }

    /// Backend writing to an arbitrary sink instead of stderr
    pub fn with_writer(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    pub fn success_line(command: &str) -> String {
        format!("[tyme: command `{command}` executed successfully]")
    }

    pub fn failure_line(command: &str, exit_code: i32) -> String {
        format!("[tyme: command `{command}` failed (error no {exit_code})]")
    }

    fn write_line(&self, line: &str) -> BackendResult<()> {
        let mut sink = self
            .sink
            .lock()
            .map_err(|_| BackendError::transport("stderr", "output stream lock poisoned"))?;
        writeln!(sink, "{line}")?;
        sink.flush()?;
        Ok(())
    }
}

impl Default for StderrBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationBackend for StderrBackend {
    fn backend_name() -> &'static str {
        "stderr"
    }

    fn from_options(_options: &SectionOptions) -> BackendResult<Self> {
        Ok(Self::new())
    }

    fn name(&self) -> &'static str {
        "stderr"
    }

    async fn notify_success(&self, command: &str) -> BackendResult<()> {
        self.write_line(&Self::success_line(command))
    }

    async fn notify_failure(&self, command: &str, exit_code: i32) -> BackendResult<()> {
        self.write_line(&Self::failure_line(command, exit_code))
    }
}

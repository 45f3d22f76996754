//! Command executor
//!
//! Wires configuration, backend registry and dispatcher together for one
//! invocation of the CLI.

use std::fmt::Write as _;

use tracing::{info, warn};

use super::parser::Cli;
use crate::config::ConfigStore;
use crate::dispatcher::Dispatcher;
use crate::error::AppResult;
use crate::notifications::{ActiveBackends, BackendRegistry};

/// Execute the CLI invocation and return the exit code tyme should exit with
///
/// # Errors
/// Configuration and backend errors abort before any command is started.
pub async fn execute_command(cli: &Cli) -> AppResult<i32> {
    let mut store = match &cli.config {
        Some(path) => ConfigStore::with_file(path),
        None => ConfigStore::new(),
    };
    let sections = store.load()?;

    let backends = BackendRegistry::builtin().resolve(&sections)?;
    info!(backends = ?backends.names(), "loaded notification backends");
    if backends.is_empty() {
        warn!("no notification backend configured, the command outcome will not be reported");
    }

    if cli.dry_run {
        print!("{}", dry_run_summary(&store, &backends));
        return Ok(0);
    }

    let command = cli.command_line();
    info!(command = %command, "command to run");

    let mut dispatcher = Dispatcher::new(backends);
    dispatcher.run(&command).await
}

/// Human readable description of what a run would use
fn dry_run_summary(store: &ConfigStore, backends: &ActiveBackends) -> String {
    let mut out = String::new();
    match store.selected_path() {
        Some(path) => {
            let _ = writeln!(out, "config file: {}", path.display());
        }
        None => {
            let _ = writeln!(out, "config file: none (built-in default)");
        }
    }

    if backends.is_empty() {
        let _ = writeln!(out, "backends: none");
    } else {
        let _ = writeln!(out, "backends: {}", backends.names().join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::notifications::RegistryError;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("tyme.cfg");
        fs::write(&path, content).expect("Failed to write config file");
        path
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tyme").chain(args.iter().copied())).unwrap()
    }

    #[tokio::test]
    async fn test_exit_code_propagated() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, "[stderr]\n");

        let code = execute_command(&cli(&["-c", config.to_str().unwrap(), "exit", "4"]))
            .await
            .unwrap();
        assert_eq!(code, 4);
    }

    #[tokio::test]
    async fn test_dry_run_does_not_execute() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, "[stderr]\n[unknownbackend]\nkey = value\n");
        let marker = dir.path().join("marker");

        let code = execute_command(&cli(&[
            "--config",
            config.to_str().unwrap(),
            "--dry-run",
            "touch",
            marker.to_str().unwrap(),
        ]))
        .await
        .unwrap();

        assert_eq!(code, 0);
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn test_misconfigured_backend_aborts_before_running() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, "[stderr]\n[gmail]\nlogin = me@example.com\n");
        let marker = dir.path().join("marker");

        let err = execute_command(&cli(&[
            "--config",
            config.to_str().unwrap(),
            "touch",
            marker.to_str().unwrap(),
        ]))
        .await
        .unwrap_err();

        match err {
            AppError::Registry(RegistryError::Construction { name, .. }) => assert_eq!(name, "gmail"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn test_malformed_config_aborts() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, "[stderr\n");

        let err = execute_command(&cli(&["--config", config.to_str().unwrap(), "true"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_dry_run_summary() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, "[stderr]\n[unknownbackend]\n");
        let mut store = ConfigStore::with_file(&config);
        let sections = store.load().unwrap();
        let backends = BackendRegistry::builtin().resolve(&sections).unwrap();

        let summary = dry_run_summary(&store, &backends);
        assert!(summary.contains(&format!("config file: {}", config.display())));
        assert!(summary.ends_with("backends: stderr\n"));
    }

    #[test]
    fn test_dry_run_summary_without_file() {
        let mut store = ConfigStore::with_candidates(Vec::new());
        let sections = store.load().unwrap();
        let backends = BackendRegistry::builtin().resolve(&sections).unwrap();

        let summary = dry_run_summary(&store, &backends);
        assert_eq!(summary, "config file: none (built-in default)\nbackends: stderr\n");
    }
}

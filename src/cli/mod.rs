//! CLI module for tyme
//!
//! - Argument parsing with clap
//! - Logger setup from flags and environment
//! - Command execution

pub mod executor;
pub mod parser;
pub mod validation;

pub use executor::execute_command;
pub use parser::{Cli, DEMO_COMMAND};

use crate::error::AppResult;
use crate::logger::{LoggerConfig, init_logger};

/// Logger configuration for this invocation
///
/// `base` normally comes from [`LoggerConfig::from_env`]; `--verbose` and
/// `--quiet` override its level.
pub fn logger_config(cli: &Cli, base: LoggerConfig) -> LoggerConfig {
    if cli.verbose {
        base.with_level("debug")
    } else if cli.quiet {
        base.with_level("error")
    } else {
        base
    }
}

/// Set up logging, then run the invocation
///
/// # Returns
/// The exit code of the wrapped command
pub async fn run(cli: Cli) -> AppResult<i32> {
    init_logger(logger_config(&cli, LoggerConfig::from_env()?))?;
    tracing::info!("starting tyme");

    let code = execute_command(&cli).await?;

    tracing::info!(exit_code = code, "end of tyme");
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_verbose_overrides_level() {
        let cli = Cli::try_parse_from(["tyme", "--verbose"]).unwrap();
        assert_eq!(logger_config(&cli, LoggerConfig::default()).level, "debug");
    }

    #[test]
    fn test_quiet_overrides_level() {
        let cli = Cli::try_parse_from(["tyme", "-q", "true"]).unwrap();
        assert_eq!(logger_config(&cli, LoggerConfig::default()).level, "error");
    }

    #[test]
    fn test_level_kept_without_flags() {
        let cli = Cli::try_parse_from(["tyme", "true"]).unwrap();
        let base = LoggerConfig::default().with_level("info");
        assert_eq!(logger_config(&cli, base).level, "info");
    }
}

//! CLI argument parsing with clap

use clap::Parser;
use std::path::PathBuf;

use crate::build;

/// Command run when no command words are given
pub const DEMO_COMMAND: &str = "echo 'test of tyme'";

/// Notify me when a command is finished
#[derive(Parser, Debug)]
#[command(name = "tyme")]
#[command(about = "Notify me when a command is finished")]
#[command(long_about = "
tyme runs a shell command to completion, then reports how it ended through
every notification backend enabled in the configuration file. tyme exits with
the exit code of the command it ran.

CONFIGURATION:
    The first file found among --config, ./tyme.cfg and ~/.tyme.cfg is read.
    Each [section] enables the backend of the same name (stderr, pushover,
    gmail, webhook); its keys configure that backend. Without any file, only
    the stderr backend is used.

EXAMPLES:
    # Build, then get notified
    tyme make -j8

    # Shell syntax is passed through untouched
    tyme 'cargo build && cargo test'

    # Check which backends a configuration enables
    tyme --config ./ci.cfg --dry-run

Set TYME_DEBUG to any value for debug diagnostics.
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Configuration file path
    ///
    /// Use this file instead of searching ./tyme.cfg and ~/.tyme.cfg.
    /// The file must exist and be readable.
    #[arg(short, long, value_name = "FILE", env = "TYME_CONFIG", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    ///
    /// Same as setting TYME_DEBUG. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress warnings, only show errors
    ///
    /// Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Load configuration and backends, print them and exit without running
    #[arg(long)]
    pub dry_run: bool,

    /// Command to run; words are joined with single spaces and handed to the shell
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// Shell command line to run
    pub fn command_line(&self) -> String {
        if self.command.is_empty() {
            DEMO_COMMAND.to_string()
        } else {
            self.command.join(" ")
        }
    }
}

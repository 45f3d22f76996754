//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Configuration error types
///
/// Every variant is fatal: the wrapped command is never started when the
/// configuration cannot be read.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Explicitly requested configuration file does not exist
    #[error("Configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Configuration file exists but could not be read
    #[error("Failed to read configuration file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid section/key-value text
    #[error("Failed to parse configuration file {}: {message}", path.display())]
    Parse {
        path: PathBuf,
        message: String,
    },
}

impl ConfigError {
    /// Create a new parse error
    pub fn parse<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        ConfigError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

use thiserror::Error;

use crate::config::ConfigError;
use crate::notifications::RegistryError;

/// Application-wide error type.
///
/// Only startup problems end up here: a failing wrapped command is a normal
/// outcome and failed notifications are absorbed by the dispatcher.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration file missing, unreadable or malformed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Backend ambiguous or rejecting its options
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The shell could not be started
    #[error("Failed to start command `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::path::PathBuf;

    #[test]
    fn test_config_error_is_transparent() {
        let err: AppError = ConfigError::FileNotFound(PathBuf::from("/etc/tyme.cfg")).into();
        assert_eq!(err.to_string(), "Configuration file not found: /etc/tyme.cfg");
    }

    #[test]
    fn test_spawn_error_keeps_source() {
        let err = AppError::Spawn {
            command: "true".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no shell"),
        };
        assert_eq!(err.to_string(), "Failed to start command `true`");
        assert_eq!(err.source().unwrap().to_string(), "no shell");
    }

    #[test]
    fn test_from_anyhow() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, AppError::Internal { .. }));
    }
}

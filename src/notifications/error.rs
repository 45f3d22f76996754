//! Notification backend error types

use thiserror::Error;

/// Errors raised by notification backends
#[derive(Debug, Error)]
pub enum BackendError {
    /// Section options are missing or malformed; fatal at startup
    #[error("Invalid options for backend '{backend}': {message}")]
    InvalidOptions { backend: String, message: String },

    /// Delivery failed (network, authentication, remote rejection)
    #[error("Backend '{backend}' failed to deliver notification: {message}")]
    Transport { backend: String, message: String },

    /// Local write failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackendError {
    pub fn invalid_options(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            backend: backend.into(),
            message: message.into(),
        }
    }

    pub fn transport(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            backend: backend.into(),
            message: message.into(),
        }
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

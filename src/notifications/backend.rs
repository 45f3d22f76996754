//! Core notification backend trait.
//!
//! Every notification channel (stderr, push, e-mail, webhook) implements
//! [`NotificationBackend`]. The registry only knows this contract and the
//! backend's name; option schemas and delivery details stay in each backend.

use async_trait::async_trait;

use crate::config::SectionOptions;
use crate::notifications::error::BackendResult;

/// Trait for notification backends
///
/// # Construction
/// `from_options` receives the raw string options of the configuration
/// section whose name equals [`NotificationBackend::backend_name`]. Unknown
/// options are ignored. Required options are checked here, so a backend that
/// constructs successfully is fully configured; a missing or malformed
/// required option is reported as `BackendError::InvalidOptions` and aborts
/// startup.
///
/// # Notification
/// Delivery problems (network, authentication, rejected recipient) are
/// returned as errors and never panic; the dispatcher logs them and carries
/// on with the next backend.
///
/// # Example Implementation
/// ```ignore
/// use async_trait::async_trait;
///
/// pub struct BeepBackend;
///
/// #[async_trait]
/// impl NotificationBackend for BeepBackend {
///     fn backend_name() -> &'static str { "beep" }
///
///     fn from_options(_options: &SectionOptions) -> BackendResult<Self> {
///         Ok(Self)
///     }
///
///     fn name(&self) -> &'static str { "beep" }
///
///     async fn notify_success(&self, _command: &str) -> BackendResult<()> {
///         print!("\x07");
///         Ok(())
///     }
///
///     async fn notify_failure(&self, _command: &str, _exit_code: i32) -> BackendResult<()> {
///         print!("\x07\x07");
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait NotificationBackend: Send + Sync {
    /// Name of the configuration section selecting this backend
    fn backend_name() -> &'static str
    where
        Self: Sized;

    /// Build the backend from its section options
    fn from_options(options: &SectionOptions) -> BackendResult<Self>
    where
        Self: Sized;

    /// Returns the backend name for logging
    fn name(&self) -> &'static str;

    /// The command finished with exit code 0
    async fn notify_success(&self, command: &str) -> BackendResult<()>;

    /// The command finished with a non-zero exit code, passed through verbatim
    async fn notify_failure(&self, command: &str, exit_code: i32) -> BackendResult<()>;
}

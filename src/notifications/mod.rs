//! Notification backends and their registry.
//!
//! Each configuration section selects the backend registered under the same
//! name. The registry is a static table: backends are compiled in and
//! registered in [`BackendRegistry::builtin`], never discovered at runtime.

mod gmail_backend;
mod pushover_backend;
mod stderr_backend;
mod webhook_backend;

pub mod backend;
pub mod error;
pub mod message;
pub mod options;
pub mod registry;

pub use backend::NotificationBackend;
pub use error::{BackendError, BackendResult};
pub use gmail_backend::{GmailBackend, GmailConfig};
pub use message::NotificationMessage;
pub use pushover_backend::{PushoverBackend, PushoverConfig, PUSHOVER_API_URL};
pub use registry::{ActiveBackends, BackendDescriptor, BackendInstance, BackendRegistry, RegistryError};
pub use stderr_backend::StderrBackend;
pub use webhook_backend::{WebhookBackend, WebhookConfig};

#[cfg(test)]
pub(crate) use stderr_backend::tests::SharedBuffer;

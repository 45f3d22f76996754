//! tyme library
//!
//! Runs a shell command and reports its outcome to the notification
//! backends configured in `tyme.cfg`.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod external;
pub mod logger;
pub mod notifications;

pub use dispatcher::Dispatcher;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

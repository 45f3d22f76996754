//! Configuration management for tyme
//!
//! The configuration file is plain INI text: every `[section]` names a
//! notification backend and its keys are handed to that backend verbatim.
//!
//! # Lookup order
//! 1. `--config FILE` / `TYME_CONFIG` (must exist when given)
//! 2. `tyme.cfg` in the current directory
//! 3. `.tyme.cfg` in the home directory
//! 4. Built-in default: a single empty `[stderr]` section

pub mod error;
pub mod sections;
pub mod store;

pub use error::ConfigError;
pub use sections::{ConfigSection, ConfigSections, SectionOptions};
pub use store::ConfigStore;

//! Pushover notification backend.
//!
//! Sends push notifications to phones and desktops through the Pushover
//! message API. Uses the global `HTTP_CLIENT`.
//!
//! Pushover API Reference: https://pushover.net/api

use async_trait::async_trait;
use serde::Deserialize;

use super::backend::NotificationBackend;
use super::error::{BackendError, BackendResult};
use super::message::NotificationMessage;
use super::options::{option_from_str, parse_options};
use crate::config::SectionOptions;
use crate::external::client::HTTP_CLIENT;

/// Pushover message endpoint
pub const PUSHOVER_API_URL: &str = "https://api.pushover.net/1/messages.json";

const NAME: &str = "pushover";

/// Options of the `[pushover]` section
#[derive(Debug, Clone, Deserialize)]
pub struct PushoverConfig {
    /// Application API token
    pub app_token: String,
    /// User (or group) key receiving the message
    pub user_key: String,
    /// Restrict delivery to one device
    #[serde(default)]
    pub device: Option<String>,
    /// Notification sound name
    #[serde(default)]
    pub sound: Option<String>,
    /// Message priority, -2 (lowest) to 1 (high)
    #[serde(default, deserialize_with = "option_from_str")]
    pub priority: Option<i8>,
}

impl PushoverConfig {
    fn validate(&self) -> BackendResult<()> {
        if self.app_token.trim().is_empty() {
            return Err(BackendError::invalid_options(NAME, "app_token cannot be empty"));
        }
        if self.user_key.trim().is_empty() {
            return Err(BackendError::invalid_options(NAME, "user_key cannot be empty"));
        }
        // Emergency priority (2) needs retry/expire parameters we do not send
        if let Some(priority) = self.priority {
            if !(-2..=1).contains(&priority) {
                return Err(BackendError::invalid_options(
                    NAME,
                    format!("priority must be between -2 and 1, got {priority}"),
                ));
            }
        }
        Ok(())
    }
}

/// Pushover notification backend
pub struct PushoverBackend {
    config: PushoverConfig,
}

impl PushoverBackend {
    pub fn new(config: PushoverConfig) -> BackendResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Form fields for the message API
    fn build_form(&self, message: &NotificationMessage) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("token", self.config.app_token.clone()),
            ("user", self.config.user_key.clone()),
            ("title", message.title.clone()),
            ("message", message.body.clone()),
        ];

        if let Some(device) = &self.config.device {
            form.push(("device", device.clone()));
        }
        if let Some(sound) = &self.config.sound {
            form.push(("sound", sound.clone()));
        }
        if let Some(priority) = self.config.priority {
            form.push(("priority", priority.to_string()));
        }

        form
    }

    async fn push(&self, message: NotificationMessage) -> BackendResult<()> {
        let response = HTTP_CLIENT
            .post(PUSHOVER_API_URL)
            .form(&self.build_form(&message))
            .send()
            .await
            .map_err(|e| BackendError::transport(NAME, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::transport(
                NAME,
                format!("HTTP {}: {}", status.as_u16(), body),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl NotificationBackend for PushoverBackend {
    fn backend_name() -> &'static str {
        NAME
    }

    fn from_options(options: &SectionOptions) -> BackendResult<Self> {
        Self::new(parse_options(NAME, options)?)
    }

    fn name(&self) -> &'static str {
        NAME
    }

    async fn notify_success(&self, command: &str) -> BackendResult<()> {
        self.push(NotificationMessage::success(command)).await
    }

    async fn notify_failure(&self, command: &str, exit_code: i32) -> BackendResult<()> {
        self.push(NotificationMessage::failure(command, exit_code)).await
    }
}

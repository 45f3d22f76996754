//! Webhook notification backend.
//!
//! Sends the command outcome as JSON to a configured URL using the global
//! HTTP_CLIENT.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};

use super::backend::NotificationBackend;
use super::error::{BackendError, BackendResult};
use super::message::NotificationMessage;
use super::options::{from_str, parse_options};
use crate::config::SectionOptions;
use crate::external::client::HTTP_CLIENT;

const NAME: &str = "webhook";

/// Options of the `[webhook]` section
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_timeout", deserialize_with = "from_str")]
    pub timeout_seconds: u64,
}

fn default_method() -> String {
    "POST".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// JSON body posted to the webhook
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    #[serde(flatten)]
    message: NotificationMessage,
    command: &'a str,
    exit_code: i32,
    success: bool,
}

/// Webhook notification backend
///
/// # Example
/// ```ini
/// [webhook]
/// url = https://example.com/hooks/tyme
/// method = PUT
/// timeout_seconds = 10
/// ```
pub struct WebhookBackend {
    url: Url,
    method: Method,
    timeout: Duration,
}

impl WebhookBackend {
    /// Creates a webhook backend, validating URL, method and timeout
    pub fn new(config: WebhookConfig) -> BackendResult<Self> {
        let url = Url::parse(&config.url).map_err(|_| {
            BackendError::invalid_options(NAME, format!("invalid URL: {}", config.url))
        })?;
        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(BackendError::invalid_options(
                NAME,
                "URL must use http or https protocol",
            ));
        }

        let method: Method = config.method.to_uppercase().parse().map_err(|_| {
            BackendError::invalid_options(NAME, format!("invalid HTTP method: {}", config.method))
        })?;

        if config.timeout_seconds == 0 {
            return Err(BackendError::invalid_options(NAME, "timeout_seconds must be greater than 0"));
        }

        Ok(Self {
            url,
            method,
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    fn build_payload(command: &str, exit_code: i32) -> WebhookPayload<'_> {
        let message = if exit_code == 0 {
            NotificationMessage::success(command)
        } else {
            NotificationMessage::failure(command, exit_code)
        };

        WebhookPayload {
            message,
            command,
            exit_code,
            success: exit_code == 0,
        }
    }

    async fn send(&self, command: &str, exit_code: i32) -> BackendResult<()> {
        let response = HTTP_CLIENT
            .request(self.method.clone(), self.url.clone())
            .timeout(self.timeout)
            .json(&Self::build_payload(command, exit_code))
            .send()
            .await
            .map_err(|e| BackendError::transport(NAME, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::transport(
                NAME,
                format!("HTTP {} from {}", status.as_u16(), self.url),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl NotificationBackend for WebhookBackend {
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
        self.send(command, 0).await
    }

    async fn notify_failure(&self, command: &str, exit_code: i32) -> BackendResult<()> {
        self.send(command, exit_code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> WebhookConfig {
        WebhookConfig {
            url: url.to_string(),
            method: default_method(),
            timeout_seconds: default_timeout(),
        }
    }

    #[test]
    fn test_defaults() {
        let options: SectionOptions =
            [("url".to_string(), "https://example.com/hook".to_string())].into();
        let backend = WebhookBackend::from_options(&options).unwrap();
        assert_eq!(backend.method, Method::POST);
        assert_eq!(backend.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_lowercase_method_accepted() {
        let mut cfg = config("http://localhost:8080/hook");
        cfg.method = "put".to_string();
        assert_eq!(WebhookBackend::new(cfg).unwrap().method, Method::PUT);
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(WebhookBackend::new(config("not-a-url")).is_err());
        assert!(WebhookBackend::new(config("ftp://example.com/hook")).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut cfg = config("https://example.com/hook");
        cfg.timeout_seconds = 0;
        assert!(WebhookBackend::new(cfg).is_err());
    }

    #[test]
    fn test_payload_success() {
        let payload = serde_json::to_value(WebhookBackend::build_payload("make", 0)).unwrap();
        assert_eq!(payload["title"], "Command executed successfully");
        assert_eq!(payload["command"], "make");
        assert_eq!(payload["exit_code"], 0);
        assert_eq!(payload["success"], true);
    }

    #[test]
    fn test_payload_failure() {
        let payload = serde_json::to_value(WebhookBackend::build_payload("make", 2)).unwrap();
        assert_eq!(payload["body"], "Command `make` failed with error no 2");
        assert_eq!(payload["exit_code"], 2);
        assert_eq!(payload["success"], false);
    }

    #[test]
    fn test_payload_fields() {
        let payload = serde_json::to_value(WebhookBackend::build_payload("ls", 1)).unwrap();
        let mut keys: Vec<_> = payload.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["body", "command", "exit_code", "success", "title"]);
    }
}

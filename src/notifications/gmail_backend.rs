//! E-mail notification backend.
//!
//! Sends a plain-text e-mail through an authenticated SMTP relay using
//! STARTTLS. The defaults target Gmail; any SMTP submission server works by
//! setting `smtp_host` and `smtp_port`.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Deserialize;

use super::backend::NotificationBackend;
use super::error::{BackendError, BackendResult};
use super::message::NotificationMessage;
use super::options::{comma_list, from_str, parse_options};
use crate::config::SectionOptions;

const NAME: &str = "gmail";

/// Options of the `[gmail]` section
#[derive(Clone, Deserialize)]
pub struct GmailConfig {
    /// Account used both to authenticate and as sender address
    pub login: String,
    pub password: String,
    /// Comma separated recipients
    #[serde(deserialize_with = "comma_list")]
    pub addr_to: Vec<String>,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port", deserialize_with = "from_str")]
    pub smtp_port: u16,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

impl std::fmt::Debug for GmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GmailConfig")
            .field("login", &self.login)
            .field("password", &"***")
            .field("addr_to", &self.addr_to)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .finish()
    }
}

/// SMTP e-mail backend
pub struct GmailBackend {
    config: GmailConfig,
    from: Mailbox,
    to: Vec<Mailbox>,
}

impl GmailBackend {
    pub fn new(config: GmailConfig) -> BackendResult<Self> {
        if config.smtp_host.trim().is_empty() {
            return Err(BackendError::invalid_options(NAME, "smtp_host cannot be empty"));
        }

        let from = parse_mailbox("login", &config.login)?;
        let to = config
            .addr_to
            .iter()
            .map(|addr| parse_mailbox("addr_to", addr))
            .collect::<BackendResult<Vec<_>>>()?;

        Ok(Self { config, from, to })
    }

    /// Assemble the e-mail for a message
    fn build_email(&self, message: &NotificationMessage) -> BackendResult<Message> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(message.title.as_str())
            .header(ContentType::TEXT_PLAIN);
        for recipient in &self.to {
            builder = builder.to(recipient.clone());
        }

        builder
            .body(message.body.clone())
            .map_err(|e| BackendError::transport(NAME, e.to_string()))
    }

    async fn send_email(&self, message: NotificationMessage) -> BackendResult<()> {
        let email = self.build_email(&message)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)
            .map_err(|e| BackendError::transport(NAME, e.to_string()))?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(
                self.config.login.clone(),
                self.config.password.clone(),
            ))
            .build();

        transport
            .send(email)
            .await
            .map_err(|e| BackendError::transport(NAME, e.to_string()))?;

        Ok(())
    }
}

fn parse_mailbox(field: &str, raw: &str) -> BackendResult<Mailbox> {
    raw.trim().parse().map_err(|e| {
        BackendError::invalid_options(NAME, format!("{field}: invalid address '{raw}': {e}"))
    })
}

#[async_trait]
impl NotificationBackend for GmailBackend {
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
        self.send_email(NotificationMessage::success(command)).await
    }

    async fn notify_failure(&self, command: &str, exit_code: i32) -> BackendResult<()> {
        self.send_email(NotificationMessage::failure(command, exit_code)).await
    }
}

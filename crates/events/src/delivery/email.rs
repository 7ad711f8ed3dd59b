//! Outgoing email.
//!
//! Everything goes through the [`Mailer`] trait: [`SmtpMailer`] speaks real
//! SMTP through `lettre`, while [`RecordingMailer`] keeps messages in memory
//! for tests and for running without a relay. [`EmailConfig::from_env`]
//! decides which one the binary gets.

use std::sync::Mutex;

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// What can go wrong between assembling a message and handing it off.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// The relay refused us: connection, TLS, or authentication.
    #[error("SMTP transport failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// Sender or recipient is not a parseable address.
    #[error("Bad email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message itself would not assemble.
    #[error("Could not assemble message: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// STARTTLS submission port.
const DEFAULT_SMTP_PORT: u16 = 587;

/// Sender used when `SMTP_FROM` is absent.
const DEFAULT_FROM_ADDRESS: &str = "noreply@fansync.local";

/// SMTP connection settings.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Relay hostname.
    pub smtp_host: String,
    /// Relay port, 587 unless overridden.
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Credentials, when the relay wants them.
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Read the SMTP settings from the environment.
    ///
    /// `None` without `SMTP_HOST`, which means delivery is switched off.
    /// `SMTP_PORT` falls back to 587, `SMTP_FROM` to a noreply address;
    /// `SMTP_USER`/`SMTP_PASSWORD` stay unset for open relays.
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;

        let smtp_port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_SMTP_PORT);
        let from_address =
            std::env::var("SMTP_FROM").unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string());

        Some(Self {
            smtp_host,
            smtp_port,
            from_address,
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

/// One outgoing email, already rendered to plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// The delivery seam. The notification dispatcher only ever sees this
/// trait, never a concrete transport.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError>;
}

// ---------------------------------------------------------------------------
// SmtpMailer
// ---------------------------------------------------------------------------

/// Real delivery over STARTTLS.
pub struct SmtpMailer {
    config: EmailConfig,
}

impl SmtpMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        let mut relay =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);
        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            relay = relay.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(message.to.parse()?)
            .subject(&message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|e| EmailError::Build(e.to_string()))?;

        relay.build().send(email).await?;

        tracing::info!(to = %message.to, subject = %message.subject, "Email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RecordingMailer
// ---------------------------------------------------------------------------

/// Keeps every message instead of sending it.
///
/// Tests assert on fan-out counts and rendered bodies through [`sent`]
/// (RecordingMailer::sent); local development uses it to keep real
/// mailboxes out of the loop.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every message sent so far, in order.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        tracing::debug!(to = %message.to, subject = %message.subject, "Recording email");
        if let Ok(mut guard) = self.sent.lock() {
            guard.push(message.clone());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

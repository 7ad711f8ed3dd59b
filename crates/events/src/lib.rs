//! Event bus and email delivery for the fansync backend.
//!
//! This crate provides the pieces that carry a schedule change from the
//! HTTP handler that committed it to the fans who care about it:
//!
//! - [`EventBus`] is the in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] is the canonical domain event envelope.
//! - [`delivery`] holds the [`Mailer`] trait with the SMTP implementation
//!   used in production and the recording one used in tests.

pub mod bus;
pub mod delivery;

pub use bus::{EventBus, PlatformEvent};
pub use delivery::email::{EmailConfig, EmailError, EmailMessage, Mailer, RecordingMailer, SmtpMailer};

//! Email delivery for platform notifications.
//!
//! The notification dispatcher and the account flows both send mail
//! through the [`email::Mailer`] trait so tests can swap in a recording
//! implementation.

pub mod email;

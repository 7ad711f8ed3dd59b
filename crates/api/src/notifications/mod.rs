//! Notification fan-out infrastructure.
//!
//! The [`NotificationDispatcher`] subscribes to the event bus and turns
//! schedule events into notification rows and emails for the affected fans.

pub mod dispatcher;

pub use dispatcher::{NotificationDispatcher, Recipient};

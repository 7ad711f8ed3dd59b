//! Shared domain types for the fansync backend.
//!
//! This crate holds the pieces every other crate agrees on:
//!
//! - [`CoreError`] is the domain error type the API layer maps to HTTP
//!   status codes.
//! - [`types`] defines the id and timestamp aliases used by all models.
//! - [`roles`] names the access levels derived from the user flags.

pub mod error;
pub mod roles;
pub mod types;

pub use error::CoreError;

//! Authentication and authorization primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation, validation, and refresh-token helpers.
//! - [`signed_token`] -- purpose-scoped HMAC tokens for email links.
//! - [`cookies`] -- `Set-Cookie` helpers for the auth cookie pair.
//! - [`oauth`] -- social login code exchange and profile normalization.

pub mod cookies;
pub mod jwt;
pub mod oauth;
pub mod password;
pub mod signed_token;

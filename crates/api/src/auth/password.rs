//! Password hashing and strength rules.
//!
//! Hashes are stored as the PHC strings emitted by the `argon2` crate
//! (Argon2id, per-password random salt), so the parameters travel with the
//! hash and can be tightened later without rehashing existing rows.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Shortest password accepted at registration and password change.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash `password` with Argon2id under a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// Check `password` against a stored PHC hash string.
///
/// A wrong password comes back as `Ok(false)`; `Err` is reserved for hashes
/// that cannot be parsed and other backend failures.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(other) => Err(other),
    }
}

/// Apply the password acceptance rules: a floor on length, and no all-digit
/// passwords. The `Err` string is shown to the user as-is.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    if password.len() < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    if password.bytes().all(|b| b.is_ascii_digit()) {
        return Err("Password must not be entirely numeric".to_string());
    }
    Ok(())
}

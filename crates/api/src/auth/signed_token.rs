//! Purpose-scoped signed one-time tokens for email links.
//!
//! Verification and password-reset emails carry a token of the form
//! `base64url(purpose:user_id:issued_at) . base64url(hmac_sha256(payload))`.
//! The purpose string is part of the signed payload, so a password-reset
//! token can never be replayed against the email-verification endpoint and
//! vice versa. Tokens are stateless; expiry is checked against `issued_at`
//! with a fixed maximum age.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use fansync_core::types::DbId;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Purpose tag for account activation tokens.
pub const PURPOSE_VERIFY_EMAIL: &str = "verify-email";

/// Purpose tag for password reset tokens.
pub const PURPOSE_PASSWORD_RESET: &str = "password-reset";

/// Maximum accepted token age in seconds (1 hour).
pub const TOKEN_MAX_AGE_SECS: i64 = 3600;

/// Why a signed token failed verification.
///
/// [`Expired`](SignedTokenError::Expired) carries the embedded user id
/// because the email-verification endpoint reacts to an authentic-but-stale
/// token differently (the pending account is removed) than to a tampered or
/// garbage one. The id is only trustworthy because the signature is checked
/// before the age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SignedTokenError {
    #[error("Token is malformed")]
    Malformed,
    #[error("Token signature is invalid")]
    InvalidSignature,
    #[error("Token was issued for a different purpose")]
    WrongPurpose,
    #[error("Token has expired")]
    Expired { user_id: DbId },
}

/// Signs and verifies purpose-scoped tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
        }
    }

    /// Issue a token binding `purpose` and `user_id` to the current time.
    pub fn sign(&self, purpose: &str, user_id: DbId) -> String {
        self.sign_at(purpose, user_id, chrono::Utc::now().timestamp())
    }

    fn sign_at(&self, purpose: &str, user_id: DbId, issued_at: i64) -> String {
        let payload = format!("{purpose}:{user_id}:{issued_at}");
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        let signature = mac.finalize().into_bytes();

        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(payload.as_bytes()),
            URL_SAFE_NO_PAD.encode(signature)
        )
    }

    /// Verify a token for the given purpose and return the embedded user id.
    ///
    /// Checks, in order: structure, signature (constant-time), purpose, age.
    pub fn verify(&self, purpose: &str, token: &str) -> Result<DbId, SignedTokenError> {
        self.verify_at(purpose, token, chrono::Utc::now().timestamp())
    }

    fn verify_at(&self, purpose: &str, token: &str, now: i64) -> Result<DbId, SignedTokenError> {
        let (payload_b64, signature_b64) =
            token.split_once('.').ok_or(SignedTokenError::Malformed)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| SignedTokenError::Malformed)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| SignedTokenError::Malformed)?;

        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(&payload);
        mac.verify_slice(&signature)
            .map_err(|_| SignedTokenError::InvalidSignature)?;

        let payload = String::from_utf8(payload).map_err(|_| SignedTokenError::Malformed)?;
        let mut parts = payload.splitn(3, ':');
        let token_purpose = parts.next().ok_or(SignedTokenError::Malformed)?;
        let user_id: DbId = parts
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or(SignedTokenError::Malformed)?;
        let issued_at: i64 = parts
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or(SignedTokenError::Malformed)?;

        if token_purpose != purpose {
            return Err(SignedTokenError::WrongPurpose);
        }
        if now - issued_at > TOKEN_MAX_AGE_SECS {
            return Err(SignedTokenError::Expired { user_id });
        }

        Ok(user_id)
    }
}

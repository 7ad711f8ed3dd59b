//! Request authentication via the [`AuthUser`] extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use fansync_core::error::CoreError;
use fansync_core::types::DbId;

use crate::auth::cookies::{cookie_value, ACCESS_COOKIE};
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The signed-in user, taken from the access token.
///
/// Browser clients carry the token in the `access` cookie installed at
/// login; API clients send `Authorization: Bearer <token>`. The header wins
/// when both are present. Add this as a handler parameter to require a
/// login:
///
/// ```ignore
/// async fn whoami(user: AuthUser) -> AppResult<Json<Profile>> { /* ... */ }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// From `claims.sub`.
    pub user_id: DbId,
    /// `"user"`, `"staff"`, or `"admin"`, from `claims.role`.
    pub role: String,
}

/// Pull the raw token out of the request: `Authorization` header first,
/// `access` cookie second.
fn token_from_parts(parts: &Parts) -> Result<&str, AppError> {
    if let Some(header) = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
    {
        // A present-but-malformed header is an error even when a cookie
        // could have been used instead.
        return header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        });
    }

    parts
        .headers
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|header| cookie_value(header, ACCESS_COOKIE))
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))
        })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_parts(parts)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

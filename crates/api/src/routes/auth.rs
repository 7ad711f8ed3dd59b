//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, oauth};
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register                    -> register
/// GET  /verify-email                -> verify_email (?token=)
/// POST /login                       -> login
/// POST /refresh                     -> refresh
/// POST /logout                      -> logout (requires auth)
/// POST /password-reset/request      -> request_password_reset
/// GET  /password-reset/check-token  -> check_password_reset_token (?token=)
/// POST /password-reset/reset        -> reset_password
/// POST /{provider}/callback         -> oauth callback (google|kakao|naver)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/verify-email", get(auth::verify_email))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/password-reset/request", post(auth::request_password_reset))
        .route(
            "/password-reset/check-token",
            get(auth::check_password_reset_token),
        )
        .route("/password-reset/reset", post(auth::reset_password))
        .route("/{provider}/callback", post(oauth::callback))
}

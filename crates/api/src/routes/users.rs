//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /me     -> get_profile
/// PATCH  /me     -> update_profile
/// DELETE /me     -> delete_account
/// GET    /staff  -> list_staff (staff only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(account::get_profile)
                .patch(account::update_profile)
                .delete(account::delete_account),
        )
        .route("/staff", get(account::list_staff))
}

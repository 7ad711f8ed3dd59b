//! Route definitions for the `/authority` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::authority;
use crate::state::AppState;

/// Routes mounted at `/authority`.
///
/// ```text
/// POST /  -> create_request
/// GET  /  -> list_requests (staff only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(authority::list_requests).post(authority::create_request),
    )
}

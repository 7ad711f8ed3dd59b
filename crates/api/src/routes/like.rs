//! Route definitions for the `/likes` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::like;
use crate::state::AppState;

/// Routes mounted at `/likes`.
///
/// ```text
/// POST   /       -> create_like
/// GET    /       -> list_my_likes
/// GET    /all    -> list_all_likes (staff only)
/// DELETE /{id}   -> delete_like (owner only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(like::list_my_likes).post(like::create_like))
        .route("/all", get(like::list_all_likes))
        .route("/{id}", delete(like::delete_like))
}

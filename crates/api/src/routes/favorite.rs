//! Route definitions for the `/favorites` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::favorite;
use crate::state::AppState;

/// Routes mounted at `/favorites`.
///
/// ```text
/// POST   /                        -> create_favorite
/// GET    /                        -> list_my_favorites
/// GET    /all                     -> list_all_favorites (staff only)
/// DELETE /{id}                    -> delete_favorite (owner only)
/// DELETE /schedule/{schedule_id}  -> delete_favorite_by_schedule
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(favorite::list_my_favorites).post(favorite::create_favorite),
        )
        .route("/all", get(favorite::list_all_favorites))
        .route("/{id}", delete(favorite::delete_favorite))
        .route(
            "/schedule/{schedule_id}",
            delete(favorite::delete_favorite_by_schedule),
        )
}

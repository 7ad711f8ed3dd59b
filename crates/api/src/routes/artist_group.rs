//! Route definitions for the `/artist-groups` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::artist_group;
use crate::state::AppState;

/// Routes mounted at `/artist-groups`.
///
/// ```text
/// GET    /       -> list_groups
/// POST   /       -> create_group (staff only)
/// GET    /{id}   -> get_group
/// PATCH  /{id}   -> update_group (staff only)
/// DELETE /{id}   -> delete_group (staff only, cascades member artists)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(artist_group::list_groups).post(artist_group::create_group),
        )
        .route(
            "/{id}",
            get(artist_group::get_group)
                .patch(artist_group::update_group)
                .delete(artist_group::delete_group),
        )
}

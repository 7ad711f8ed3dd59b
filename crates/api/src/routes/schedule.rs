//! Route definitions for the `/schedules` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::schedule;
use crate::state::AppState;

/// Routes mounted at `/schedules`.
///
/// The `manage` subtrees are staff-only and publish the platform events
/// that drive notification fan-out.
///
/// ```text
/// GET    /                            -> list_schedules (public)
/// GET    /favorites                   -> list_my_favorites
/// GET    /artist/{artist_id}          -> list_for_artist
/// GET    /artist-group/{group_id}     -> list_for_artist_group
/// GET    /{id}                        -> get_schedule
/// POST   /artist/manage               -> create_for_artist (staff only)
/// PATCH  /artist/manage/{id}          -> update_for_artist (staff only)
/// DELETE /artist/manage/{id}          -> delete_for_artist (staff only)
/// POST   /artist-group/manage         -> create_for_artist_group (staff only)
/// PATCH  /artist-group/manage/{id}    -> update_for_artist_group (staff only)
/// DELETE /artist-group/manage/{id}    -> delete_for_artist_group (staff only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(schedule::list_schedules))
        .route("/favorites", get(schedule::list_my_favorites))
        .route("/artist/{artist_id}", get(schedule::list_for_artist))
        .route(
            "/artist-group/{group_id}",
            get(schedule::list_for_artist_group),
        )
        .route("/{id}", get(schedule::get_schedule))
        .route("/artist/manage", post(schedule::create_for_artist))
        .route(
            "/artist/manage/{id}",
            patch(schedule::update_for_artist).delete(schedule::delete_for_artist),
        )
        .route(
            "/artist-group/manage",
            post(schedule::create_for_artist_group),
        )
        .route(
            "/artist-group/manage/{id}",
            patch(schedule::update_for_artist_group).delete(schedule::delete_for_artist_group),
        )
}

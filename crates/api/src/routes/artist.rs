//! Route definitions for the `/artists` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::artist;
use crate::state::AppState;

/// Routes mounted at `/artists`.
///
/// ```text
/// GET    /       -> list_artists
/// POST   /       -> create_artist (staff only)
/// GET    /{id}   -> get_artist
/// PATCH  /{id}   -> update_artist (staff only)
/// DELETE /{id}   -> delete_artist (staff only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(artist::list_artists).post(artist::create_artist))
        .route(
            "/{id}",
            get(artist::get_artist)
                .patch(artist::update_artist)
                .delete(artist::delete_artist),
        )
}

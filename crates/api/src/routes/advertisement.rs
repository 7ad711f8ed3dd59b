//! Route definitions for the `/advertisements` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::advertisement;
use crate::state::AppState;

/// Routes mounted at `/advertisements`.
///
/// ```text
/// GET    /       -> list_advertisements
/// POST   /       -> create_advertisement (staff only)
/// GET    /{id}   -> get_advertisement
/// PATCH  /{id}   -> update_advertisement (staff only)
/// DELETE /{id}   -> delete_advertisement (staff only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(advertisement::list_advertisements).post(advertisement::create_advertisement),
        )
        .route(
            "/{id}",
            get(advertisement::get_advertisement)
                .patch(advertisement::update_advertisement)
                .delete(advertisement::delete_advertisement),
        )
}

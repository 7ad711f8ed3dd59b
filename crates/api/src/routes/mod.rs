pub mod advertisement;
pub mod artist;
pub mod artist_group;
pub mod auth;
pub mod authority;
pub mod favorite;
pub mod health;
pub mod like;
pub mod notification;
pub mod schedule;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                        register (public)
/// /auth/verify-email                    email verification (public, ?token=)
/// /auth/login                           login (public)
/// /auth/refresh                         refresh (public)
/// /auth/logout                          logout (requires auth)
/// /auth/password-reset/request          request reset link (public)
/// /auth/password-reset/check-token      check reset token (public, ?token=)
/// /auth/password-reset/reset            set new password (public)
/// /auth/{provider}/callback             social login (google|kakao|naver)
///
/// /users/me                             get, update, delete own account
/// /users/staff                          staff directory (staff only)
///
/// /artists                              list, create (create: staff only)
/// /artists/{id}                         get, update, delete (write: staff only)
/// /artist-groups                        list, create (create: staff only)
/// /artist-groups/{id}                   get, update, delete (write: staff only)
/// /artists-and-groups                   combined catalog listing
///
/// /schedules                            public listing (?include_inactive)
/// /schedules/{id}                       schedule detail
/// /schedules/favorites                  caller's favorited schedules
/// /schedules/artist/{artist_id}         schedules for an artist
/// /schedules/artist-group/{group_id}    schedules for a group
/// /schedules/artist/manage              create (staff only, publishes events)
/// /schedules/artist/manage/{id}         update, delete (staff only)
/// /schedules/artist-group/manage        create (staff only, publishes events)
/// /schedules/artist-group/manage/{id}   update, delete (staff only)
///
/// /likes                                create, list own
/// /likes/all                            list all (staff only)
/// /likes/{id}                           delete (owner only)
///
/// /favorites                            create, list own
/// /favorites/all                        list all (staff only)
/// /favorites/{id}                       delete (owner only)
/// /favorites/schedule/{schedule_id}     delete by natural key
///
/// /notifications                        caller's notifications, newest first
///
/// /advertisements                       list, create (create: staff only)
/// /advertisements/{id}                  get, update, delete (write: staff only)
///
/// /authority                            file request, list queue (list: staff only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Registration, login, tokens, password reset, social login.
        .nest("/auth", auth::router())
        // Own-account management and the staff directory.
        .nest("/users", users::router())
        // Catalog: artists and artist groups, staff-curated.
        .nest("/artists", artist::router())
        .nest("/artist-groups", artist_group::router())
        // Single-call combined catalog for the browse page.
        .route("/artists-and-groups", get(handlers::artist::list_combined))
        // Schedules, with the staff manage subtrees that publish events.
        .nest("/schedules", schedule::router())
        // Follows and bookmarks.
        .nest("/likes", like::router())
        .nest("/favorites", favorite::router())
        // Fan-out results, written by the notification dispatcher.
        .nest("/notifications", notification::router())
        // Advertisements, staff-curated.
        .nest("/advertisements", advertisement::router())
        // Staff-authority request queue.
        .nest("/authority", authority::router())
}

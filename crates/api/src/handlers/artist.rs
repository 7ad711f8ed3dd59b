//! Handlers for the `/artists` resource and the combined catalog listing.
//!
//! Reads are public; writes require a staff role.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use fansync_core::error::CoreError;
use fansync_core::types::DbId;
use fansync_db::models::artist::{Artist, CreateArtist, UpdateArtist};
use fansync_db::models::artist_group::ArtistGroup;
use fansync_db::repositories::{ArtistGroupRepo, ArtistRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Combined catalog payload for `GET /artists-and-groups`.
#[derive(Debug, Serialize)]
pub struct CombinedCatalog {
    pub artists: Vec<Artist>,
    pub artist_groups: Vec<ArtistGroup>,
}

/// POST /api/v1/artists (staff)
pub async fn create_artist(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Json(mut input): Json<CreateArtist>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Artist name must not be empty".into(),
        )));
    }

    // A referenced group must exist; FK violations would otherwise surface
    // as opaque 500s.
    if let Some(group_id) = input.artist_group_id {
        ArtistGroupRepo::find_by_id(&state.pool, group_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "ArtistGroup",
                id: group_id,
            }))?;
    }

    input.created_by = Some(staff.user_id);
    let artist = ArtistRepo::create(&state.pool, &input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: artist })))
}

/// GET /api/v1/artists
pub async fn list_artists(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Artist>>>> {
    let artists = ArtistRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: artists }))
}

/// GET /api/v1/artists/{id}
pub async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Artist>>> {
    let artist = ArtistRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artist",
            id,
        }))?;

    Ok(Json(DataResponse { data: artist }))
}

/// PATCH /api/v1/artists/{id} (staff)
pub async fn update_artist(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArtist>,
) -> AppResult<Json<DataResponse<Artist>>> {
    if let Some(group_id) = input.artist_group_id {
        ArtistGroupRepo::find_by_id(&state.pool, group_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "ArtistGroup",
                id: group_id,
            }))?;
    }

    let artist = ArtistRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artist",
            id,
        }))?;

    Ok(Json(DataResponse { data: artist }))
}

/// DELETE /api/v1/artists/{id} (staff)
///
/// Removes the artist and, via FK cascades, their likes and schedules.
pub async fn delete_artist(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ArtistRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Artist",
            id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/artists-and-groups
///
/// Single-call catalog for the frontend's browse page.
pub async fn list_combined(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<CombinedCatalog>>> {
    let artists = ArtistRepo::list(&state.pool).await?;
    let artist_groups = ArtistGroupRepo::list(&state.pool).await?;

    Ok(Json(DataResponse {
        data: CombinedCatalog {
            artists,
            artist_groups,
        },
    }))
}

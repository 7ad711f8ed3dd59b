//! Handlers for the `/artist-groups` resource.
//!
//! Reads are public; writes require a staff role. Deleting a group also
//! deletes its member artists (FK CASCADE), mirroring the catalog schema.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use fansync_core::error::CoreError;
use fansync_core::types::DbId;
use fansync_db::models::artist_group::{ArtistGroup, CreateArtistGroup, UpdateArtistGroup};
use fansync_db::repositories::ArtistGroupRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/artist-groups (staff)
pub async fn create_group(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Json(mut input): Json<CreateArtistGroup>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Group name must not be empty".into(),
        )));
    }

    input.created_by = Some(staff.user_id);
    let group = ArtistGroupRepo::create(&state.pool, &input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: group })))
}

/// GET /api/v1/artist-groups
pub async fn list_groups(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ArtistGroup>>>> {
    let groups = ArtistGroupRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: groups }))
}

/// GET /api/v1/artist-groups/{id}
pub async fn get_group(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ArtistGroup>>> {
    let group = ArtistGroupRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ArtistGroup",
            id,
        }))?;

    Ok(Json(DataResponse { data: group }))
}

/// PATCH /api/v1/artist-groups/{id} (staff)
pub async fn update_group(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArtistGroup>,
) -> AppResult<Json<DataResponse<ArtistGroup>>> {
    let group = ArtistGroupRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ArtistGroup",
            id,
        }))?;

    Ok(Json(DataResponse { data: group }))
}

/// DELETE /api/v1/artist-groups/{id} (staff)
///
/// Member artists reference the group with CASCADE and are removed with it.
pub async fn delete_group(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ArtistGroupRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ArtistGroup",
            id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}

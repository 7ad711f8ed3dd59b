//! Handlers for the `/likes` resource: following an artist or a group.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use fansync_core::error::CoreError;
use fansync_core::types::DbId;
use fansync_db::models::like::{CreateLike, LikeDetail};
use fansync_db::repositories::{ArtistGroupRepo, ArtistRepo, LikeRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// A like listing entry: the joined row plus its one-line summary.
#[derive(Debug, Serialize)]
pub struct LikeWithSummary {
    #[serde(flatten)]
    pub like: LikeDetail,
    pub summary: String,
}

impl From<LikeDetail> for LikeWithSummary {
    fn from(like: LikeDetail) -> Self {
        let summary = like.summary();
        Self { like, summary }
    }
}

/// POST /api/v1/likes
///
/// Follow an artist, a group, or both at once. At least one target is
/// required; liking the same target twice is a conflict.
pub async fn create_like(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(mut input): Json<CreateLike>,
) -> AppResult<impl IntoResponse> {
    // Reject targetless likes before touching storage.
    if input.artist_id.is_none() && input.artist_group_id.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "Either artist_id or artist_group_id is required".into(),
        )));
    }

    if let Some(artist_id) = input.artist_id {
        ArtistRepo::find_by_id(&state.pool, artist_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Artist",
                id: artist_id,
            }))?;
    }
    if let Some(group_id) = input.artist_group_id {
        ArtistGroupRepo::find_by_id(&state.pool, group_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "ArtistGroup",
                id: group_id,
            }))?;
    }

    input.user_id = auth_user.user_id;
    // A repeat like trips uq_likes_user_artist / uq_likes_user_group -> 409.
    let like = LikeRepo::create(&state.pool, &input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: like })))
}

/// GET /api/v1/likes
///
/// The caller's likes with display names and a one-line `summary` joined in.
pub async fn list_my_likes(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<LikeWithSummary>>>> {
    let likes = LikeRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    let data = likes.into_iter().map(LikeWithSummary::from).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/likes/all (staff)
pub async fn list_all_likes(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<DataResponse<Vec<LikeWithSummary>>>> {
    let likes = LikeRepo::list_all(&state.pool).await?;
    let data = likes.into_iter().map(LikeWithSummary::from).collect();
    Ok(Json(DataResponse { data }))
}

/// DELETE /api/v1/likes/{id}
///
/// Remove a like. Only its owner may do so.
pub async fn delete_like(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let like = LikeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Like",
            id,
        }))?;

    if like.user_id != auth_user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the owner can remove a like".into(),
        )));
    }

    LikeRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

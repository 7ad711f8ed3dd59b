//! Handlers for the `/favorites` resource: bookmarking schedules.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use fansync_core::error::CoreError;
use fansync_core::types::DbId;
use fansync_db::models::favorite::{CreateFavorite, FavoriteDetail};
use fansync_db::repositories::{FavoriteRepo, ScheduleRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// A favorite listing entry: the joined row plus its one-line summary.
#[derive(Debug, Serialize)]
pub struct FavoriteWithSummary {
    #[serde(flatten)]
    pub favorite: FavoriteDetail,
    pub summary: String,
}

impl From<FavoriteDetail> for FavoriteWithSummary {
    fn from(favorite: FavoriteDetail) -> Self {
        let summary = favorite.summary();
        Self { favorite, summary }
    }
}

/// POST /api/v1/favorites
///
/// Bookmark a schedule. The schedule must exist; bookmarking the same one
/// twice is a conflict.
pub async fn create_favorite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(mut input): Json<CreateFavorite>,
) -> AppResult<impl IntoResponse> {
    ScheduleRepo::find_by_id(&state.pool, input.schedule_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id: input.schedule_id,
        }))?;

    input.user_id = auth_user.user_id;
    // A repeat favorite trips uq_favorites_user_schedule -> 409.
    let favorite = FavoriteRepo::create(&state.pool, &input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: favorite })))
}

/// GET /api/v1/favorites
///
/// The caller's favorites with schedule titles joined in.
pub async fn list_my_favorites(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<FavoriteWithSummary>>>> {
    let favorites = FavoriteRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    let data = favorites.into_iter().map(FavoriteWithSummary::from).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/favorites/all (staff)
pub async fn list_all_favorites(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<DataResponse<Vec<FavoriteWithSummary>>>> {
    let favorites = FavoriteRepo::list_all(&state.pool).await?;
    let data = favorites.into_iter().map(FavoriteWithSummary::from).collect();
    Ok(Json(DataResponse { data }))
}

/// DELETE /api/v1/favorites/{id}
///
/// Remove a favorite by its id. Only its owner may do so.
pub async fn delete_favorite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let favorite = FavoriteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Favorite",
            id,
        }))?;

    if favorite.user_id != auth_user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the owner can remove a favorite".into(),
        )));
    }

    FavoriteRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/favorites/schedule/{schedule_id}
///
/// Remove the caller's favorite for a schedule by the natural key. The
/// frontend uses this from schedule pages where the favorite id is unknown.
pub async fn delete_favorite_by_schedule(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(schedule_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted =
        FavoriteRepo::delete_by_user_and_schedule(&state.pool, auth_user.user_id, schedule_id)
            .await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Favorite",
            id: schedule_id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}

//! Handlers for the `/advertisements` resource.
//!
//! Reads are public; writes require a staff role.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use fansync_core::error::CoreError;
use fansync_core::types::DbId;
use fansync_db::models::advertisement::{
    Advertisement, CreateAdvertisement, UpdateAdvertisement,
};
use fansync_db::repositories::AdvertisementRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/advertisements (staff)
pub async fn create_advertisement(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreateAdvertisement>,
) -> AppResult<impl IntoResponse> {
    let ad = AdvertisementRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: ad })))
}

/// GET /api/v1/advertisements
pub async fn list_advertisements(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Advertisement>>>> {
    let ads = AdvertisementRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: ads }))
}

/// GET /api/v1/advertisements/{id}
pub async fn get_advertisement(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Advertisement>>> {
    let ad = AdvertisementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Advertisement",
            id,
        }))?;

    Ok(Json(DataResponse { data: ad }))
}

/// PATCH /api/v1/advertisements/{id} (staff)
pub async fn update_advertisement(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAdvertisement>,
) -> AppResult<Json<DataResponse<Advertisement>>> {
    let ad = AdvertisementRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Advertisement",
            id,
        }))?;

    Ok(Json(DataResponse { data: ad }))
}

/// DELETE /api/v1/advertisements/{id} (staff)
pub async fn delete_advertisement(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = AdvertisementRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Advertisement",
            id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}

//! Handlers for the `/authority` resource: requests from fans asking to be
//! upgraded to staff so they can manage an artist's catalog entries.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use fansync_core::error::CoreError;
use fansync_db::models::authority::{AuthorityRequest, CreateAuthorityRequest};
use fansync_db::repositories::AuthorityRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/authority
///
/// File a staff-up request. Review happens out of band; staff read the
/// queue via the listing below.
pub async fn create_request(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(mut input): Json<CreateAuthorityRequest>,
) -> AppResult<impl IntoResponse> {
    if input.artist_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "artist_name must not be empty".into(),
        )));
    }
    if input.phone_number.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "phone_number must not be empty".into(),
        )));
    }

    input.user_id = auth_user.user_id;
    let request = AuthorityRepo::create(&state.pool, &input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/v1/authority (staff)
///
/// The pending request queue, newest first.
pub async fn list_requests(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<DataResponse<Vec<AuthorityRequest>>>> {
    let requests = AuthorityRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: requests }))
}

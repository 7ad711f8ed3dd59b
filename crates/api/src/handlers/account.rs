//! Handlers for the authenticated user's own account (`/users/me`) and the
//! staff directory.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use fansync_core::error::CoreError;
use fansync_db::models::user::{UpdateUser, UserResponse};
use fansync_db::repositories::{SessionRepo, UserRepo};

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PATCH /users/me`. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 30, message = "nickname must be 1-30 characters"))]
    pub nickname: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub image_url: Option<String>,
    /// When present, the account password is replaced (strength-checked).
    pub password: Option<String>,
}

/// GET /api/v1/users/me
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// PATCH /api/v1/users/me
///
/// Partial profile update. A `password` field, when present, is re-hashed
/// after a strength check; the other fields go through the usual COALESCE
/// update.
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    if let Some(password) = input.password.as_deref() {
        validate_password_strength(password, MIN_PASSWORD_LENGTH)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
        let password_hash = hash_password(password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
        UserRepo::update_password(&state.pool, auth_user.user_id, &password_hash).await?;
    }

    let updated = UserRepo::update(
        &state.pool,
        auth_user.user_id,
        &UpdateUser {
            nickname: input.nickname,
            gender: input.gender,
            age: input.age,
            image_url: input.image_url,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "User",
        id: auth_user.user_id,
    }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(updated),
    }))
}

/// DELETE /api/v1/users/me
///
/// Remove the account. Likes, favorites, sessions, and owned schedules are
/// removed by FK cascades. Returns 204.
pub async fn delete_account(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<impl IntoResponse> {
    // Sessions cascade with the row, but revoke first so concurrent
    // refreshes cannot race the delete.
    SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;

    let deleted = UserRepo::delete(&state.pool, auth_user.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }));
    }

    tracing::info!(user_id = auth_user.user_id, "Account deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/staff
///
/// Staff-only directory of staff accounts.
pub async fn list_staff(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list_staff(&state.pool).await?;
    let data = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(DataResponse { data }))
}

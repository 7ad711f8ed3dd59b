//! Role gates layered on [`AuthUser`].
//!
//! Missing or invalid credentials reject with 401 before the role is ever
//! considered; a valid token with an insufficient role rejects with 403.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use fansync_core::error::CoreError;
use fansync_core::roles::is_staff_role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lets staff and admin accounts through; everyone else gets 403.
///
/// Catalog writes, schedule management, and the aggregate listings are gated
/// on this.
///
/// ```ignore
/// async fn staff_only(RequireStaff(user): RequireStaff) -> AppResult<Json<()>> {
///     // user is staff or admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_staff_role(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Staff role required".into(),
            )));
        }
        Ok(RequireStaff(user))
    }
}

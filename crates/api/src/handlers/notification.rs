//! Handlers for the `/notifications` resource.
//!
//! Rows are written by the notification dispatcher; these endpoints only
//! read them back.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use fansync_db::models::notification::NotificationDetail;
use fansync_db::repositories::NotificationRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// A notification listing entry: the joined row plus its one-line summary.
#[derive(Debug, Serialize)]
pub struct NotificationWithSummary {
    #[serde(flatten)]
    pub notification: NotificationDetail,
    pub summary: String,
}

impl From<NotificationDetail> for NotificationWithSummary {
    fn from(notification: NotificationDetail) -> Self {
        let summary = notification.summary();
        Self {
            notification,
            summary,
        }
    }
}

/// GET /api/v1/notifications
///
/// Notifications whose source like or favorite belongs to the caller,
/// newest first.
pub async fn list_my_notifications(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<NotificationWithSummary>>>> {
    let notifications = NotificationRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    let data = notifications
        .into_iter()
        .map(NotificationWithSummary::from)
        .collect();
    Ok(Json(DataResponse { data }))
}

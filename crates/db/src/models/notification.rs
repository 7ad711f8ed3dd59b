//! Notification entity models and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use fansync_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
///
/// Both source references are nullable: the referenced like or favorite
/// may have been deleted after the notification went out (the FK is
/// `ON DELETE SET NULL`), and deletion notices are written without a
/// source to begin with.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub is_active: bool,
    pub likes_id: Option<DbId>,
    pub favorites_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a notification.
#[derive(Debug)]
pub struct CreateNotification {
    pub is_active: bool,
    pub likes_id: Option<DbId>,
    pub favorites_id: Option<DbId>,
}

/// A notification with its source display fields joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationDetail {
    pub id: DbId,
    pub is_active: bool,
    pub likes_id: Option<DbId>,
    pub favorites_id: Option<DbId>,
    pub like_user_email: Option<String>,
    pub like_artist_name: Option<String>,
    pub like_artist_group_name: Option<String>,
    pub favorite_user_email: Option<String>,
    pub favorite_schedule_title: Option<String>,
    pub created_at: Timestamp,
}

impl NotificationDetail {
    /// Human-readable one-line form: `{is_active} - {like} - {favorite}`
    /// with `No Likes` / `No Favorites` when a source reference is absent.
    pub fn summary(&self) -> String {
        let like_part = match (&self.likes_id, &self.like_user_email) {
            (Some(_), Some(email)) => format!(
                "{} - {} - {}",
                email,
                self.like_artist_name.as_deref().unwrap_or("No Artist"),
                self.like_artist_group_name.as_deref().unwrap_or("No Group"),
            ),
            _ => "No Likes".to_string(),
        };
        let favorite_part = match (&self.favorites_id, &self.favorite_user_email) {
            (Some(_), Some(email)) => format!(
                "{} - {}",
                email,
                self.favorite_schedule_title.as_deref().unwrap_or(""),
            ),
            _ => "No Favorites".to_string(),
        };
        format!("{} - {} - {}", self.is_active, like_part, favorite_part)
    }
}

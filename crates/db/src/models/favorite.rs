//! Favorite entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fansync_core::types::{DbId, Timestamp};

/// A row from the `favorites` table: one user bookmarking one schedule.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Favorite {
    pub id: DbId,
    pub user_id: DbId,
    pub schedule_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a favorite.
#[derive(Debug, Deserialize)]
pub struct CreateFavorite {
    pub schedule_id: DbId,
    #[serde(skip)]
    pub user_id: DbId,
}

/// A favorite with the schedule title and owner email joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FavoriteDetail {
    pub id: DbId,
    pub user_id: DbId,
    pub user_email: String,
    pub user_nickname: String,
    pub schedule_id: DbId,
    pub schedule_title: String,
    pub created_at: Timestamp,
}

impl FavoriteDetail {
    /// Human-readable one-line form.
    pub fn summary(&self) -> String {
        format!("{} - {}", self.user_email, self.schedule_title)
    }
}

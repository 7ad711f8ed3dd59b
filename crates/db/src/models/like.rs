//! Like entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fansync_core::types::{DbId, Timestamp};

/// A row from the `likes` table.
///
/// At least one of `artist_id` / `artist_group_id` is set
/// (`ck_likes_target`); both at once is allowed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Like {
    pub id: DbId,
    pub user_id: DbId,
    pub artist_id: Option<DbId>,
    pub artist_group_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a like.
#[derive(Debug, Deserialize)]
pub struct CreateLike {
    pub artist_id: Option<DbId>,
    pub artist_group_id: Option<DbId>,
    #[serde(skip)]
    pub user_id: DbId,
}

/// A like with its display names joined in.
///
/// Used for listings and for notification fan-out, which needs the
/// follower's email without a second query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LikeDetail {
    pub id: DbId,
    pub user_id: DbId,
    pub user_email: String,
    pub user_nickname: String,
    pub artist_id: Option<DbId>,
    pub artist_name: Option<String>,
    pub artist_group_id: Option<DbId>,
    pub artist_group_name: Option<String>,
    pub created_at: Timestamp,
}

impl LikeDetail {
    /// Human-readable one-line form, with placeholders for absent sides.
    pub fn summary(&self) -> String {
        format!(
            "{} - {} - {}",
            self.user_email,
            self.artist_name.as_deref().unwrap_or("No Artist"),
            self.artist_group_name.as_deref().unwrap_or("No Group"),
        )
    }
}

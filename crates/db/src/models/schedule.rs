//! Schedule entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fansync_core::types::{DbId, Timestamp};

/// A row from the `schedules` table.
///
/// Exactly one of `artist_id` / `artist_group_id` is set; the
/// `ck_schedules_owner` constraint rejects anything else.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Schedule {
    pub id: DbId,
    pub is_active: bool,
    pub title: String,
    pub description: Option<String>,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub artist_id: Option<DbId>,
    pub artist_group_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new schedule.
///
/// The owning side (artist or group) comes from the manage route, not the
/// request body; coordinates are resolved from `location` by the handler.
#[derive(Debug, Deserialize)]
pub struct CreateSchedule {
    pub title: String,
    pub description: Option<String>,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub location: Option<String>,
    pub image_url: Option<String>,
    #[serde(skip)]
    pub latitude: Option<f64>,
    #[serde(skip)]
    pub longitude: Option<f64>,
    #[serde(skip)]
    pub artist_id: Option<DbId>,
    #[serde(skip)]
    pub artist_group_id: Option<DbId>,
    #[serde(skip)]
    pub user_id: Option<DbId>,
}

/// DTO for updating a schedule. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSchedule {
    pub is_active: Option<bool>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_at: Option<Timestamp>,
    pub end_at: Option<Timestamp>,
    pub location: Option<String>,
    pub image_url: Option<String>,
}

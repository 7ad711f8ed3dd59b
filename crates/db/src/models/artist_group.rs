//! Artist group entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fansync_core::types::{DbId, Timestamp};

/// A row from the `artist_groups` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtistGroup {
    pub id: DbId,
    pub name: String,
    pub agency: String,
    pub instagram: Option<String>,
    pub fandom: Option<String>,
    pub debut_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new artist group.
#[derive(Debug, Deserialize)]
pub struct CreateArtistGroup {
    pub name: String,
    #[serde(default)]
    pub agency: String,
    pub instagram: Option<String>,
    pub fandom: Option<String>,
    pub debut_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    #[serde(skip)]
    pub created_by: Option<DbId>,
}

/// DTO for updating an artist group. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateArtistGroup {
    pub name: Option<String>,
    pub agency: Option<String>,
    pub instagram: Option<String>,
    pub fandom: Option<String>,
    pub debut_date: Option<NaiveDate>,
    pub image_url: Option<String>,
}

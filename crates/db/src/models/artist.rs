//! Artist entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fansync_core::types::{DbId, Timestamp};

/// A row from the `artists` table.
///
/// `artist_group_id` is `None` for soloists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Artist {
    pub id: DbId,
    pub name: String,
    pub artist_group_id: Option<DbId>,
    pub solo_active: bool,
    pub agency: String,
    pub instagram: Option<String>,
    pub fandom: Option<String>,
    pub debut_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new artist.
#[derive(Debug, Deserialize)]
pub struct CreateArtist {
    pub name: String,
    pub artist_group_id: Option<DbId>,
    #[serde(default)]
    pub solo_active: bool,
    #[serde(default)]
    pub agency: String,
    pub instagram: Option<String>,
    pub fandom: Option<String>,
    pub debut_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    #[serde(skip)]
    pub created_by: Option<DbId>,
}

/// DTO for updating an artist. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateArtist {
    pub name: Option<String>,
    pub artist_group_id: Option<DbId>,
    pub solo_active: Option<bool>,
    pub agency: Option<String>,
    pub instagram: Option<String>,
    pub fandom: Option<String>,
    pub debut_date: Option<NaiveDate>,
    pub image_url: Option<String>,
}

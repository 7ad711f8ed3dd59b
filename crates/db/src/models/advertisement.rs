//! Advertisement entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fansync_core::types::{DbId, Timestamp};

/// A row from the `advertisements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Advertisement {
    pub id: DbId,
    pub ad_type: Option<String>,
    pub status: bool,
    pub sent_at: Option<Timestamp>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an advertisement.
#[derive(Debug, Deserialize)]
pub struct CreateAdvertisement {
    pub ad_type: Option<String>,
    #[serde(default)]
    pub status: bool,
    pub sent_at: Option<Timestamp>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
}

/// DTO for updating an advertisement. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateAdvertisement {
    pub ad_type: Option<String>,
    pub status: Option<bool>,
    pub sent_at: Option<Timestamp>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
}

//! Staff-authority request model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fansync_core::types::{DbId, Timestamp};

/// A row from the `authority_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuthorityRequest {
    pub id: DbId,
    pub user_id: DbId,
    pub artist_name: String,
    pub agency: String,
    pub phone_number: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a staff-authority request.
#[derive(Debug, Deserialize)]
pub struct CreateAuthorityRequest {
    pub artist_name: String,
    pub agency: String,
    pub phone_number: String,
    pub image_url: Option<String>,
    #[serde(skip)]
    pub user_id: DbId,
}

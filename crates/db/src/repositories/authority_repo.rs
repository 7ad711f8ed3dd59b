//! Repository for the `authority_requests` table.

use sqlx::PgPool;

use crate::models::authority::{AuthorityRequest, CreateAuthorityRequest};

/// Column set returned by every row-returning query.
const COLUMNS: &str =
    "id, user_id, artist_name, agency, phone_number, image_url, created_at, updated_at";

/// Provides operations for staff-authority requests.
pub struct AuthorityRepo;

impl AuthorityRepo {
    /// File a new request, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAuthorityRequest,
    ) -> Result<AuthorityRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO authority_requests (user_id, artist_name, agency, phone_number, image_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuthorityRequest>(&query)
            .bind(input.user_id)
            .bind(&input.artist_name)
            .bind(&input.agency)
            .bind(&input.phone_number)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// List all requests, most recent first.
    pub async fn list(pool: &PgPool) -> Result<Vec<AuthorityRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM authority_requests ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, AuthorityRequest>(&query)
            .fetch_all(pool)
            .await
    }
}

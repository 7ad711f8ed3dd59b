//! Repository for the `advertisements` table.

use sqlx::PgPool;

use fansync_core::types::DbId;

use crate::models::advertisement::{Advertisement, CreateAdvertisement, UpdateAdvertisement};

/// Column set returned by every row-returning query.
const COLUMNS: &str = "id, ad_type, status, sent_at, image_url, link_url, \
                        starts_at, ends_at, created_at, updated_at";

/// Provides CRUD operations for advertisements.
pub struct AdvertisementRepo;

impl AdvertisementRepo {
    /// Insert a new advertisement, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAdvertisement,
    ) -> Result<Advertisement, sqlx::Error> {
        let query = format!(
            "INSERT INTO advertisements (ad_type, status, sent_at, image_url, link_url, starts_at, ends_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Advertisement>(&query)
            .bind(&input.ad_type)
            .bind(input.status)
            .bind(input.sent_at)
            .bind(&input.image_url)
            .bind(&input.link_url)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .fetch_one(pool)
            .await
    }

    /// Find an advertisement by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Advertisement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM advertisements WHERE id = $1");
        sqlx::query_as::<_, Advertisement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all advertisements, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Advertisement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM advertisements ORDER BY created_at DESC");
        sqlx::query_as::<_, Advertisement>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update an advertisement. Fields left `None` keep their stored value.
    ///
    /// Returns `None` when the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdvertisement,
    ) -> Result<Option<Advertisement>, sqlx::Error> {
        let query = format!(
            "UPDATE advertisements SET
                ad_type = COALESCE($2, ad_type),
                status = COALESCE($3, status),
                sent_at = COALESCE($4, sent_at),
                image_url = COALESCE($5, image_url),
                link_url = COALESCE($6, link_url),
                starts_at = COALESCE($7, starts_at),
                ends_at = COALESCE($8, ends_at)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Advertisement>(&query)
            .bind(id)
            .bind(&input.ad_type)
            .bind(input.status)
            .bind(input.sent_at)
            .bind(&input.image_url)
            .bind(&input.link_url)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete an advertisement. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM advertisements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

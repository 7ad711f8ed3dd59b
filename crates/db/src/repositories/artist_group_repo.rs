//! Repository for the `artist_groups` table.

use sqlx::PgPool;

use fansync_core::types::DbId;

use crate::models::artist_group::{ArtistGroup, CreateArtistGroup, UpdateArtistGroup};

/// Column set returned by every row-returning query.
const COLUMNS: &str = "id, name, agency, instagram, fandom, debut_date, image_url, \
                        created_by, created_at, updated_at";

/// Provides CRUD operations for artist groups.
pub struct ArtistGroupRepo;

impl ArtistGroupRepo {
    /// Insert a new artist group, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateArtistGroup,
    ) -> Result<ArtistGroup, sqlx::Error> {
        let query = format!(
            "INSERT INTO artist_groups (name, agency, instagram, fandom, debut_date, image_url, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtistGroup>(&query)
            .bind(&input.name)
            .bind(&input.agency)
            .bind(&input.instagram)
            .bind(&input.fandom)
            .bind(input.debut_date)
            .bind(&input.image_url)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find an artist group by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ArtistGroup>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artist_groups WHERE id = $1");
        sqlx::query_as::<_, ArtistGroup>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all artist groups, alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<ArtistGroup>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artist_groups ORDER BY name");
        sqlx::query_as::<_, ArtistGroup>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update an artist group. Fields left `None` keep their stored value.
    ///
    /// Returns `None` when the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArtistGroup,
    ) -> Result<Option<ArtistGroup>, sqlx::Error> {
        let query = format!(
            "UPDATE artist_groups SET
                name = COALESCE($2, name),
                agency = COALESCE($3, agency),
                instagram = COALESCE($4, instagram),
                fandom = COALESCE($5, fandom),
                debut_date = COALESCE($6, debut_date),
                image_url = COALESCE($7, image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtistGroup>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.agency)
            .bind(&input.instagram)
            .bind(&input.fandom)
            .bind(input.debut_date)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete an artist group. Member artists, likes, and schedules go with
    /// it via FK cascades. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM artist_groups WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

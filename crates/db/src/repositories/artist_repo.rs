//! Repository for the `artists` table.

use sqlx::PgPool;

use fansync_core::types::DbId;

use crate::models::artist::{Artist, CreateArtist, UpdateArtist};

/// Column set returned by every row-returning query.
const COLUMNS: &str = "id, name, artist_group_id, solo_active, agency, instagram, fandom, \
                        debut_date, image_url, created_by, created_at, updated_at";

/// Provides CRUD operations for artists.
pub struct ArtistRepo;

impl ArtistRepo {
    /// Insert a new artist, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateArtist) -> Result<Artist, sqlx::Error> {
        let query = format!(
            "INSERT INTO artists (name, artist_group_id, solo_active, agency, instagram,
                                  fandom, debut_date, image_url, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artist>(&query)
            .bind(&input.name)
            .bind(input.artist_group_id)
            .bind(input.solo_active)
            .bind(&input.agency)
            .bind(&input.instagram)
            .bind(&input.fandom)
            .bind(input.debut_date)
            .bind(&input.image_url)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find an artist by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Artist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artists WHERE id = $1");
        sqlx::query_as::<_, Artist>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all artists, alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Artist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artists ORDER BY name");
        sqlx::query_as::<_, Artist>(&query).fetch_all(pool).await
    }

    /// List the members of an artist group.
    pub async fn list_for_group(
        pool: &PgPool,
        artist_group_id: DbId,
    ) -> Result<Vec<Artist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artists WHERE artist_group_id = $1 ORDER BY name");
        sqlx::query_as::<_, Artist>(&query)
            .bind(artist_group_id)
            .fetch_all(pool)
            .await
    }

    /// Update an artist. Fields left `None` keep their stored value.
    ///
    /// Returns `None` when the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArtist,
    ) -> Result<Option<Artist>, sqlx::Error> {
        let query = format!(
            "UPDATE artists SET
                name = COALESCE($2, name),
                artist_group_id = COALESCE($3, artist_group_id),
                solo_active = COALESCE($4, solo_active),
                agency = COALESCE($5, agency),
                instagram = COALESCE($6, instagram),
                fandom = COALESCE($7, fandom),
                debut_date = COALESCE($8, debut_date),
                image_url = COALESCE($9, image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artist>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.artist_group_id)
            .bind(input.solo_active)
            .bind(&input.agency)
            .bind(&input.instagram)
            .bind(&input.fandom)
            .bind(input.debut_date)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete an artist. Dependent likes and schedules go with it via FK
    /// cascades. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM artists WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

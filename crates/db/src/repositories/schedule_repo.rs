//! Repository for the `schedules` table.

use sqlx::PgPool;

use fansync_core::types::DbId;

use crate::models::schedule::{CreateSchedule, Schedule, UpdateSchedule};

/// Column set returned by every row-returning query.
const COLUMNS: &str = "id, is_active, title, description, start_at, end_at, location, \
                        latitude, longitude, artist_id, artist_group_id, user_id, \
                        image_url, created_at, updated_at";

/// Column list with the `s.` alias (used in JOIN queries).
const JOINED_COLUMNS: &str =
    "s.id, s.is_active, s.title, s.description, s.start_at, s.end_at, s.location, \
     s.latitude, s.longitude, s.artist_id, s.artist_group_id, s.user_id, \
     s.image_url, s.created_at, s.updated_at";

/// Provides CRUD operations for schedules.
pub struct ScheduleRepo;

impl ScheduleRepo {
    /// Insert a new schedule, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSchedule) -> Result<Schedule, sqlx::Error> {
        let query = format!(
            "INSERT INTO schedules (title, description, start_at, end_at, location,
                                    latitude, longitude, artist_id, artist_group_id,
                                    user_id, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.start_at)
            .bind(input.end_at)
            .bind(&input.location)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.artist_id)
            .bind(input.artist_group_id)
            .bind(input.user_id)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a schedule by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Schedule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM schedules WHERE id = $1");
        sqlx::query_as::<_, Schedule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List schedules, soonest first. Inactive rows are hidden unless
    /// `include_inactive` is set.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Schedule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM schedules
             WHERE is_active = true OR $1
             ORDER BY start_at"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// List active schedules for an artist, soonest first.
    pub async fn list_for_artist(
        pool: &PgPool,
        artist_id: DbId,
    ) -> Result<Vec<Schedule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM schedules
             WHERE artist_id = $1 AND is_active = true
             ORDER BY start_at"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(artist_id)
            .fetch_all(pool)
            .await
    }

    /// List active schedules for an artist group, soonest first.
    pub async fn list_for_artist_group(
        pool: &PgPool,
        artist_group_id: DbId,
    ) -> Result<Vec<Schedule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM schedules
             WHERE artist_group_id = $1 AND is_active = true
             ORDER BY start_at"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(artist_group_id)
            .fetch_all(pool)
            .await
    }

    /// List the schedules a user has favorited, soonest first.
    pub async fn list_favorited_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Schedule>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM schedules s
             JOIN favorites f ON f.schedule_id = s.id
             WHERE f.user_id = $1 AND s.is_active = true
             ORDER BY s.start_at"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a schedule. Fields left `None` keep their stored value.
    ///
    /// Coordinates are deliberately not part of this; they follow the
    /// location text through [`Self::set_coordinates`].
    ///
    /// Returns `None` when the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSchedule,
    ) -> Result<Option<Schedule>, sqlx::Error> {
        let query = format!(
            "UPDATE schedules SET
                is_active = COALESCE($2, is_active),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                start_at = COALESCE($5, start_at),
                end_at = COALESCE($6, end_at),
                location = COALESCE($7, location),
                image_url = COALESCE($8, image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(id)
            .bind(input.is_active)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.start_at)
            .bind(input.end_at)
            .bind(&input.location)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the resolved coordinates, clearing them when geocoding
    /// came back empty. Returns `true` if the row was updated.
    pub async fn set_coordinates(
        pool: &PgPool,
        id: DbId,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE schedules SET latitude = $2, longitude = $3 WHERE id = $1")
            .bind(id)
            .bind(latitude)
            .bind(longitude)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a schedule. Favorites go with it via FK cascade.
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

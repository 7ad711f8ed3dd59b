//! Repository for the `favorites` table.

use sqlx::PgPool;

use fansync_core::types::DbId;

use crate::models::favorite::{CreateFavorite, Favorite, FavoriteDetail};

/// Column set returned by every row-returning query.
const COLUMNS: &str = "id, user_id, schedule_id, created_at, updated_at";

/// Column list for [`FavoriteDetail`] queries (joined display fields).
const DETAIL_COLUMNS: &str = "f.id, f.user_id, u.email AS user_email, \
     u.nickname AS user_nickname, f.schedule_id, s.title AS schedule_title, f.created_at";

/// FROM/JOIN clause matching [`DETAIL_COLUMNS`].
const DETAIL_FROM: &str = "FROM favorites f \
     JOIN users u ON u.id = f.user_id \
     JOIN schedules s ON s.id = f.schedule_id";

/// Provides CRUD operations for favorites.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Insert a new favorite, returning the created row.
    ///
    /// A second bookmark of the same schedule by the same user violates
    /// `uq_favorites_user_schedule` and surfaces as a 409 at the API layer.
    pub async fn create(pool: &PgPool, input: &CreateFavorite) -> Result<Favorite, sqlx::Error> {
        let query = format!(
            "INSERT INTO favorites (user_id, schedule_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(input.user_id)
            .bind(input.schedule_id)
            .fetch_one(pool)
            .await
    }

    /// Find a favorite by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Favorite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM favorites WHERE id = $1");
        sqlx::query_as::<_, Favorite>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's favorites with display fields, most recent first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FavoriteDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
             WHERE f.user_id = $1
             ORDER BY f.created_at DESC"
        );
        sqlx::query_as::<_, FavoriteDetail>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List all favorites with display fields, most recent first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<FavoriteDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM} ORDER BY f.created_at DESC"
        );
        sqlx::query_as::<_, FavoriteDetail>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the favorites bookmarking a schedule. Fan-out recipients for
    /// schedule-updated events, and the deletion snapshot source.
    pub async fn list_for_schedule(
        pool: &PgPool,
        schedule_id: DbId,
    ) -> Result<Vec<FavoriteDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
             WHERE f.schedule_id = $1
             ORDER BY f.id"
        );
        sqlx::query_as::<_, FavoriteDetail>(&query)
            .bind(schedule_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a favorite by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a user's favorite by its natural key (the schedule).
    /// Returns `true` if a row was deleted.
    pub async fn delete_by_user_and_schedule(
        pool: &PgPool,
        user_id: DbId,
        schedule_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND schedule_id = $2")
            .bind(user_id)
            .bind(schedule_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

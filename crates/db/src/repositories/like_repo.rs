//! Repository for the `likes` table.

use sqlx::PgPool;

use fansync_core::types::DbId;

use crate::models::like::{CreateLike, Like, LikeDetail};

/// Column set returned by every row-returning query.
const COLUMNS: &str = "id, user_id, artist_id, artist_group_id, created_at, updated_at";

/// Column list for [`LikeDetail`] queries (joined display names).
const DETAIL_COLUMNS: &str = "l.id, l.user_id, u.email AS user_email, \
     u.nickname AS user_nickname, l.artist_id, a.name AS artist_name, \
     l.artist_group_id, g.name AS artist_group_name, l.created_at";

/// FROM/JOIN clause matching [`DETAIL_COLUMNS`].
const DETAIL_FROM: &str = "FROM likes l \
     JOIN users u ON u.id = l.user_id \
     LEFT JOIN artists a ON a.id = l.artist_id \
     LEFT JOIN artist_groups g ON g.id = l.artist_group_id";

/// Provides CRUD operations for likes.
pub struct LikeRepo;

impl LikeRepo {
    /// Insert a new like, returning the created row.
    ///
    /// The `ck_likes_target` constraint rejects rows with neither side set;
    /// callers validate first so that case surfaces as a 400, not a 500.
    pub async fn create(pool: &PgPool, input: &CreateLike) -> Result<Like, sqlx::Error> {
        let query = format!(
            "INSERT INTO likes (user_id, artist_id, artist_group_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Like>(&query)
            .bind(input.user_id)
            .bind(input.artist_id)
            .bind(input.artist_group_id)
            .fetch_one(pool)
            .await
    }

    /// Find a like by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Like>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM likes WHERE id = $1");
        sqlx::query_as::<_, Like>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's likes with display names, most recent first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<LikeDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
             WHERE l.user_id = $1
             ORDER BY l.created_at DESC"
        );
        sqlx::query_as::<_, LikeDetail>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List all likes with display names, most recent first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<LikeDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM} ORDER BY l.created_at DESC"
        );
        sqlx::query_as::<_, LikeDetail>(&query).fetch_all(pool).await
    }

    /// List the likes following an artist. Fan-out recipients for
    /// schedule-created events.
    pub async fn list_for_artist(
        pool: &PgPool,
        artist_id: DbId,
    ) -> Result<Vec<LikeDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
             WHERE l.artist_id = $1
             ORDER BY l.id"
        );
        sqlx::query_as::<_, LikeDetail>(&query)
            .bind(artist_id)
            .fetch_all(pool)
            .await
    }

    /// List the likes following an artist group. Fan-out recipients for
    /// schedule-created events on the group side.
    pub async fn list_for_artist_group(
        pool: &PgPool,
        artist_group_id: DbId,
    ) -> Result<Vec<LikeDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
             WHERE l.artist_group_id = $1
             ORDER BY l.id"
        );
        sqlx::query_as::<_, LikeDetail>(&query)
            .bind(artist_group_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a like. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM likes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

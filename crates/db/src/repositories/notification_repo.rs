//! Repository for the `notifications` table.

use sqlx::PgPool;

use fansync_core::types::DbId;

use crate::models::notification::{CreateNotification, Notification, NotificationDetail};

/// Column set returned by every row-returning query.
const COLUMNS: &str = "id, is_active, likes_id, favorites_id, created_at, updated_at";

/// Column list for [`NotificationDetail`] queries. The source like and
/// favorite are LEFT JOINed because either reference may be NULL.
const DETAIL_COLUMNS: &str = "n.id, n.is_active, n.likes_id, n.favorites_id, \
     lu.email AS like_user_email, a.name AS like_artist_name, \
     g.name AS like_artist_group_name, \
     fu.email AS favorite_user_email, s.title AS favorite_schedule_title, \
     n.created_at";

/// FROM/JOIN clause matching [`DETAIL_COLUMNS`].
const DETAIL_FROM: &str = "FROM notifications n \
     LEFT JOIN likes l ON l.id = n.likes_id \
     LEFT JOIN users lu ON lu.id = l.user_id \
     LEFT JOIN artists a ON a.id = l.artist_id \
     LEFT JOIN artist_groups g ON g.id = l.artist_group_id \
     LEFT JOIN favorites f ON f.id = n.favorites_id \
     LEFT JOIN users fu ON fu.id = f.user_id \
     LEFT JOIN schedules s ON s.id = f.schedule_id";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (is_active, likes_id, favorites_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(input.is_active)
            .bind(input.likes_id)
            .bind(input.favorites_id)
            .fetch_one(pool)
            .await
    }

    /// List the notifications whose source like or favorite belongs to the
    /// user, newest first.
    ///
    /// Notifications whose sources were deleted (both references NULL) are
    /// no longer attributable to anyone and drop out of per-user listings.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<NotificationDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
             WHERE l.user_id = $1 OR f.user_id = $1
             ORDER BY n.created_at DESC, n.id DESC"
        );
        sqlx::query_as::<_, NotificationDetail>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List every notification, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<NotificationDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM} ORDER BY n.created_at DESC, n.id DESC"
        );
        sqlx::query_as::<_, NotificationDetail>(&query)
            .fetch_all(pool)
            .await
    }

    /// Count the notifications referencing a given like.
    pub async fn count_for_like(pool: &PgPool, likes_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE likes_id = $1")
            .bind(likes_id)
            .fetch_one(pool)
            .await
    }

    /// Count the notifications referencing a given favorite.
    pub async fn count_for_favorite(
        pool: &PgPool,
        favorites_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE favorites_id = $1")
            .bind(favorites_id)
            .fetch_one(pool)
            .await
    }
}

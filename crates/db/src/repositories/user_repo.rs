//! Data access for user accounts (`users`).

use sqlx::PgPool;

use fansync_core::types::{DbId, Timestamp};

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column set returned by every row-returning query.
const COLUMNS: &str = "id, email, password_hash, nickname, is_active, is_staff, is_superuser, \
                        gender, age, social_provider, social_id, image_url, \
                        last_login_at, failed_login_count, locked_until, created_at, updated_at";

/// Account lookups and mutations.
///
/// Emails are stored lowercased; `create` and `find_by_email` both fold their
/// argument, which makes the unique index on `users.email` case-insensitive
/// in practice.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user row. The email is folded to lowercase on the way in.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users
                 (email, password_hash, nickname, is_active, gender, age,
                  social_provider, social_id, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(input.email.to_lowercase())
            .bind(&input.password_hash)
            .bind(&input.nickname)
            .bind(input.is_active)
            .bind(&input.gender)
            .bind(input.age)
            .bind(&input.social_provider)
            .bind(&input.social_id)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Fetch one user by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch one user by email, case-insensitively.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email.to_lowercase())
            .fetch_optional(pool)
            .await
    }

    /// Every user, newest account first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Accounts with staff or superuser standing, newest first.
    pub async fn list_staff(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE is_staff = true OR is_superuser = true
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Patch profile fields. Fields left `None` keep their stored value.
    ///
    /// Returns `None` when the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                nickname = COALESCE($2, nickname),
                gender = COALESCE($3, gender),
                age = COALESCE($4, age),
                image_url = COALESCE($5, image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.nickname)
            .bind(&input.gender)
            .bind(input.age)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Flip an account to active once its email verification checks out.
    ///
    /// Re-activating an already-active row is a no-op that still reports
    /// `true`; `false` means the row is missing.
    pub async fn activate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET is_active = true WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete an account. Sessions, likes, favorites, and owned
    /// schedules follow via `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Add one to the failed-login counter.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET failed_login_count = failed_login_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Set the lockout deadline on an account.
    pub async fn lock_account(
        pool: &PgPool,
        id: DbId,
        until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET locked_until = $1 WHERE id = $2")
            .bind(until)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Clear the lockout state and stamp `last_login_at`.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET failed_login_count = 0, locked_until = NULL, last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Swap in a new password hash. `true` when a row matched.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

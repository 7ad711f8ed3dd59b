//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fansync_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
///
/// `password_hash` is `None` for accounts created through a social login.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: Option<String>,
    pub nickname: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub social_provider: Option<String>,
    pub social_id: Option<String>,
    pub image_url: Option<String>,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Role name derived from the staff flags, as carried in token claims.
    pub fn role(&self) -> &'static str {
        fansync_core::roles::role_for_flags(self.is_staff, self.is_superuser)
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub nickname: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub image_url: Option<String>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nickname: user.nickname,
            is_active: user.is_active,
            is_staff: user.is_staff,
            gender: user.gender,
            age: user.age,
            image_url: user.image_url,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
///
/// Social login accounts arrive with `password_hash: None` and
/// `is_active: true`; password registrations start inactive until the
/// verification email is confirmed.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: Option<String>,
    pub nickname: String,
    pub is_active: bool,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub social_provider: Option<String>,
    pub social_id: Option<String>,
    pub image_url: Option<String>,
}

/// DTO for updating an existing user's profile. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub nickname: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub image_url: Option<String>,
}

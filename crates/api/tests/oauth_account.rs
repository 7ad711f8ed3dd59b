//! Tests for social-login account resolution: creating accounts, reviving
//! registered-but-unverified ones, and backfilling profile gaps.

mod common;

use fansync_api::auth::oauth::SocialProfile;
use fansync_api::auth::password::hash_password;
use fansync_api::handlers::oauth::resolve_social_account;
use fansync_db::models::user::CreateUser;
use fansync_db::repositories::UserRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn kakao_profile(email: &str) -> SocialProfile {
    SocialProfile {
        provider: "kakao",
        social_id: "990011".to_string(),
        email: email.to_string(),
        nickname: "소셜닉".to_string(),
        gender: Some("female".to_string()),
        image_url: Some("https://cdn.test/avatar.png".to_string()),
    }
}

/// Seed a password account directly, bypassing the register endpoint.
async fn seed_user(pool: &PgPool, email: &str, nickname: &str, is_active: bool) -> i64 {
    let hashed = hash_password("a_decent_password").unwrap();
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: Some(hashed),
            nickname: nickname.to_string(),
            is_active,
            gender: None,
            age: None,
            social_provider: None,
            social_id: None,
            image_url: None,
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// An unknown email gets a fresh, already-active account with no password.
#[sqlx::test(migrations = "../../db/migrations")]
async fn creates_active_account_for_new_email(pool: PgPool) {
    let user = resolve_social_account(&pool, &kakao_profile("newbie@test.com"))
        .await
        .unwrap();

    assert!(user.is_active);
    assert!(user.password_hash.is_none());
    assert_eq!(user.email, "newbie@test.com");
    assert_eq!(user.nickname, "소셜닉");
    assert_eq!(user.social_provider.as_deref(), Some("kakao"));
    assert_eq!(user.social_id.as_deref(), Some("990011"));
}

/// A registered-but-unverified account logging in socially is activated:
/// the provider vouched for the email, so a later token refresh must not
/// bounce off the inactive-account guard.
#[sqlx::test(migrations = "../../db/migrations")]
async fn activates_unverified_account(pool: PgPool) {
    let id = seed_user(&pool, "pending@test.com", "pending", false).await;

    let user = resolve_social_account(&pool, &kakao_profile("pending@test.com"))
        .await
        .unwrap();

    assert_eq!(user.id, id);
    assert!(user.is_active, "social login must activate the account");
    // The stored row agrees, not just the returned value.
    let stored = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert!(stored.is_active);
    // The local password survives for later password logins.
    assert!(stored.password_hash.is_some());
}

/// Profile gaps are backfilled from the provider; stored values win
/// otherwise.
#[sqlx::test(migrations = "../../db/migrations")]
async fn backfills_profile_gaps_only(pool: PgPool) {
    let id = seed_user(&pool, "veteran@test.com", "veteran", true).await;

    let user = resolve_social_account(&pool, &kakao_profile("veteran@test.com"))
        .await
        .unwrap();

    assert_eq!(user.id, id);
    // The chosen nickname is kept; the unknown gender and missing avatar
    // come from the provider.
    assert_eq!(user.nickname, "veteran");
    assert_eq!(user.gender.as_deref(), Some("female"));
    assert_eq!(user.image_url.as_deref(), Some("https://cdn.test/avatar.png"));
}

//! Integration tests for the repository layer against a real database:
//! - Catalog hierarchy creation (group -> member -> schedule)
//! - Cascade and SET NULL delete behaviour
//! - Check and unique constraint violations
//! - Partial (COALESCE) updates
//! - Session lifecycle and cleanup

use chrono::{Duration, Utc};
use sqlx::PgPool;

use fansync_db::models::artist::{CreateArtist, UpdateArtist};
use fansync_db::models::artist_group::CreateArtistGroup;
use fansync_db::models::favorite::CreateFavorite;
use fansync_db::models::like::CreateLike;
use fansync_db::models::notification::CreateNotification;
use fansync_db::models::schedule::CreateSchedule;
use fansync_db::models::session::CreateSession;
use fansync_db::models::user::CreateUser;
use fansync_db::repositories::{
    ArtistGroupRepo, ArtistRepo, FavoriteRepo, LikeRepo, NotificationRepo, ScheduleRepo,
    SessionRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(email: &str, nickname: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password_hash: Some("argon2-hash-placeholder".to_string()),
        nickname: nickname.to_string(),
        is_active: true,
        gender: None,
        age: None,
        social_provider: None,
        social_id: None,
        image_url: None,
    }
}

fn new_group(name: &str) -> CreateArtistGroup {
    CreateArtistGroup {
        name: name.to_string(),
        agency: "Test Ent.".to_string(),
        instagram: None,
        fandom: None,
        debut_date: None,
        image_url: None,
        created_by: None,
    }
}

fn new_artist(name: &str, artist_group_id: Option<i64>) -> CreateArtist {
    CreateArtist {
        name: name.to_string(),
        artist_group_id,
        solo_active: false,
        agency: "Test Ent.".to_string(),
        instagram: None,
        fandom: None,
        debut_date: None,
        image_url: None,
        created_by: None,
    }
}

fn new_schedule(artist_id: Option<i64>, artist_group_id: Option<i64>, title: &str) -> CreateSchedule {
    CreateSchedule {
        title: title.to_string(),
        description: None,
        start_at: Utc::now() + Duration::days(7),
        end_at: Utc::now() + Duration::days(7) + Duration::hours(2),
        location: None,
        image_url: None,
        latitude: None,
        longitude: None,
        artist_id,
        artist_group_id,
        user_id: None,
    }
}

fn new_session(user_id: i64, hash: &str, expires_at: chrono::DateTime<Utc>) -> CreateSession {
    CreateSession {
        user_id,
        refresh_token_hash: hash.to_string(),
        expires_at,
        user_agent: None,
        ip_address: None,
    }
}

// ---------------------------------------------------------------------------
// Test: Catalog hierarchy creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_catalog_hierarchy(pool: PgPool) {
    let group = ArtistGroupRepo::create(&pool, &new_group("ITZY")).await.unwrap();
    assert_eq!(group.name, "ITZY");
    assert_eq!(group.agency, "Test Ent.");

    let member = ArtistRepo::create(&pool, &new_artist("Yeji", Some(group.id)))
        .await
        .unwrap();
    assert_eq!(member.artist_group_id, Some(group.id));
    assert!(!member.solo_active); // default

    let soloist = ArtistRepo::create(&pool, &new_artist("Chungha", None))
        .await
        .unwrap();
    assert!(soloist.artist_group_id.is_none());

    let members = ArtistRepo::list_for_group(&pool, group.id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, member.id);

    let schedule = ScheduleRepo::create(&pool, &new_schedule(None, Some(group.id), "World tour"))
        .await
        .unwrap();
    assert_eq!(schedule.artist_group_id, Some(group.id));
    assert!(schedule.is_active); // default
}

// ---------------------------------------------------------------------------
// Test: Emails are lowercased and unique
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_email_lowercased_and_unique(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("Fan@Example.COM", "fan"))
        .await
        .unwrap();
    assert_eq!(user.email, "fan@example.com");

    let found = UserRepo::find_by_email(&pool, "FAN@example.com")
        .await
        .unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));

    let result = UserRepo::create(&pool, &new_user("fan@EXAMPLE.com", "other")).await;
    assert!(result.is_err(), "Duplicate email should fail regardless of case");
}

// ---------------------------------------------------------------------------
// Test: User listings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_listings(pool: PgPool) {
    let fan = UserRepo::create(&pool, &new_user("fan@test.com", "fan")).await.unwrap();
    let staff = UserRepo::create(&pool, &new_user("staff@test.com", "staff"))
        .await
        .unwrap();
    let admin = UserRepo::create(&pool, &new_user("admin@test.com", "admin"))
        .await
        .unwrap();

    sqlx::query("UPDATE users SET is_staff = TRUE WHERE id = $1")
        .bind(staff.id)
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("UPDATE users SET is_superuser = TRUE WHERE id = $1")
        .bind(admin.id)
        .execute(&pool)
        .await
        .unwrap();

    let all = UserRepo::list(&pool).await.unwrap();
    assert_eq!(all.len(), 3);
    // Most recently created first.
    assert_eq!(all[0].id, admin.id);
    assert_eq!(all[2].id, fan.id);

    let staff_only = UserRepo::list_staff(&pool).await.unwrap();
    let mut ids: Vec<i64> = staff_only.iter().map(|u| u.id).collect();
    ids.sort();
    assert_eq!(ids, vec![staff.id, admin.id]);
}

// ---------------------------------------------------------------------------
// Test: Deleting a user cascades engagement but not catalog entries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cascade_delete_user(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("leaver@test.com", "leaver"))
        .await
        .unwrap();

    let mut artist_input = new_artist("Chungha", None);
    artist_input.created_by = Some(user.id);
    let artist = ArtistRepo::create(&pool, &artist_input).await.unwrap();
    assert_eq!(artist.created_by, Some(user.id));

    let schedule = ScheduleRepo::create(&pool, &new_schedule(Some(artist.id), None, "Concert"))
        .await
        .unwrap();

    let like = LikeRepo::create(
        &pool,
        &CreateLike {
            artist_id: Some(artist.id),
            artist_group_id: None,
            user_id: user.id,
        },
    )
    .await
    .unwrap();
    let favorite = FavoriteRepo::create(
        &pool,
        &CreateFavorite {
            schedule_id: schedule.id,
            user_id: user.id,
        },
    )
    .await
    .unwrap();
    let session = SessionRepo::create(
        &pool,
        &new_session(user.id, "hash-1", Utc::now() + Duration::days(7)),
    )
    .await
    .unwrap();

    let deleted = UserRepo::delete(&pool, user.id).await.unwrap();
    assert!(deleted);

    // Engagement rows go with the account.
    assert!(LikeRepo::find_by_id(&pool, like.id).await.unwrap().is_none());
    assert!(FavoriteRepo::find_by_id(&pool, favorite.id)
        .await
        .unwrap()
        .is_none());
    let session_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM user_sessions WHERE id = $1")
            .bind(session.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(session_count, 0);

    // Catalog entries survive; the creator reference is nulled.
    let artist = ArtistRepo::find_by_id(&pool, artist.id)
        .await
        .unwrap()
        .expect("artist should survive its creator");
    assert_eq!(artist.created_by, None);
}

// ---------------------------------------------------------------------------
// Test: Deleting a group cascades members, schedules, and likes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cascade_delete_artist_group(pool: PgPool) {
    let fan = UserRepo::create(&pool, &new_user("fan@test.com", "fan")).await.unwrap();
    let group = ArtistGroupRepo::create(&pool, &new_group("ITZY")).await.unwrap();
    let member = ArtistRepo::create(&pool, &new_artist("Yeji", Some(group.id)))
        .await
        .unwrap();
    let schedule = ScheduleRepo::create(&pool, &new_schedule(None, Some(group.id), "World tour"))
        .await
        .unwrap();
    let like = LikeRepo::create(
        &pool,
        &CreateLike {
            artist_id: None,
            artist_group_id: Some(group.id),
            user_id: fan.id,
        },
    )
    .await
    .unwrap();

    let deleted = ArtistGroupRepo::delete(&pool, group.id).await.unwrap();
    assert!(deleted);

    assert!(ArtistRepo::find_by_id(&pool, member.id)
        .await
        .unwrap()
        .is_none());
    assert!(ScheduleRepo::find_by_id(&pool, schedule.id)
        .await
        .unwrap()
        .is_none());
    assert!(LikeRepo::find_by_id(&pool, like.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: Likes need a target; one like per target per user
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_like_target_constraints(pool: PgPool) {
    let fan = UserRepo::create(&pool, &new_user("fan@test.com", "fan")).await.unwrap();
    let group = ArtistGroupRepo::create(&pool, &new_group("ITZY")).await.unwrap();
    let artist = ArtistRepo::create(&pool, &new_artist("Chungha", None))
        .await
        .unwrap();

    // Neither side set violates ck_likes_target.
    let result = LikeRepo::create(
        &pool,
        &CreateLike {
            artist_id: None,
            artist_group_id: None,
            user_id: fan.id,
        },
    )
    .await;
    assert!(result.is_err(), "Targetless like should fail");

    // One like per side is fine.
    LikeRepo::create(
        &pool,
        &CreateLike {
            artist_id: Some(artist.id),
            artist_group_id: None,
            user_id: fan.id,
        },
    )
    .await
    .unwrap();
    LikeRepo::create(
        &pool,
        &CreateLike {
            artist_id: None,
            artist_group_id: Some(group.id),
            user_id: fan.id,
        },
    )
    .await
    .unwrap();

    // A second like of the same artist violates uq_likes_user_artist.
    let result = LikeRepo::create(
        &pool,
        &CreateLike {
            artist_id: Some(artist.id),
            artist_group_id: None,
            user_id: fan.id,
        },
    )
    .await;
    assert!(result.is_err(), "Duplicate artist like should fail");
}

// ---------------------------------------------------------------------------
// Test: Schedules belong to exactly one side
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_schedule_owner_is_exclusive(pool: PgPool) {
    let group = ArtistGroupRepo::create(&pool, &new_group("ITZY")).await.unwrap();
    let artist = ArtistRepo::create(&pool, &new_artist("Chungha", None))
        .await
        .unwrap();

    let result =
        ScheduleRepo::create(&pool, &new_schedule(Some(artist.id), Some(group.id), "Both")).await;
    assert!(result.is_err(), "Schedule with both owners should fail");

    let result = ScheduleRepo::create(&pool, &new_schedule(None, None, "Neither")).await;
    assert!(result.is_err(), "Schedule with no owner should fail");
}

// ---------------------------------------------------------------------------
// Test: Partial update only touches provided fields
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_artist_partial_update(pool: PgPool) {
    let artist = ArtistRepo::create(&pool, &new_artist("Chungha", None))
        .await
        .unwrap();

    let updated = ArtistRepo::update(
        &pool,
        artist.id,
        &UpdateArtist {
            name: None,
            artist_group_id: None,
            solo_active: Some(true),
            agency: Some("MNH".to_string()),
            instagram: None,
            fandom: None,
            debut_date: None,
            image_url: None,
        },
    )
    .await
    .unwrap()
    .expect("Update should return the row");

    assert_eq!(updated.name, "Chungha");
    assert!(updated.solo_active);
    assert_eq!(updated.agency, "MNH");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_nonexistent_returns_none(pool: PgPool) {
    let result = ArtistRepo::update(
        &pool,
        999_999,
        &UpdateArtist {
            name: Some("Ghost".to_string()),
            artist_group_id: None,
            solo_active: None,
            agency: None,
            instagram: None,
            fandom: None,
            debut_date: None,
            image_url: None,
        },
    )
    .await
    .unwrap();

    assert!(result.is_none(), "Updating non-existent ID should return None");
}

// ---------------------------------------------------------------------------
// Test: Schedule coordinates follow the geocoder verdict
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_schedule_coordinates_roundtrip(pool: PgPool) {
    let artist = ArtistRepo::create(&pool, &new_artist("Chungha", None))
        .await
        .unwrap();
    let schedule = ScheduleRepo::create(&pool, &new_schedule(Some(artist.id), None, "Concert"))
        .await
        .unwrap();
    assert!(schedule.latitude.is_none());

    let updated = ScheduleRepo::set_coordinates(&pool, schedule.id, Some(37.5665), Some(126.978))
        .await
        .unwrap();
    assert!(updated);
    let schedule = ScheduleRepo::find_by_id(&pool, schedule.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(schedule.latitude, Some(37.5665));
    assert_eq!(schedule.longitude, Some(126.978));

    // A failed re-geocode clears them again.
    ScheduleRepo::set_coordinates(&pool, schedule.id, None, None)
        .await
        .unwrap();
    let schedule = ScheduleRepo::find_by_id(&pool, schedule.id)
        .await
        .unwrap()
        .unwrap();
    assert!(schedule.latitude.is_none());

    let missing = ScheduleRepo::set_coordinates(&pool, 999_999, Some(1.0), Some(1.0))
        .await
        .unwrap();
    assert!(!missing);
}

// ---------------------------------------------------------------------------
// Test: Session lifecycle and cleanup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_lifecycle_and_cleanup(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("fan@test.com", "fan")).await.unwrap();

    let live = SessionRepo::create(
        &pool,
        &new_session(user.id, "live-hash", Utc::now() + Duration::days(7)),
    )
    .await
    .unwrap();
    SessionRepo::create(
        &pool,
        &new_session(user.id, "expired-hash", Utc::now() - Duration::hours(1)),
    )
    .await
    .unwrap();
    let revoked = SessionRepo::create(
        &pool,
        &new_session(user.id, "revoked-hash", Utc::now() + Duration::days(7)),
    )
    .await
    .unwrap();
    assert!(SessionRepo::revoke(&pool, revoked.id).await.unwrap());

    // Lookup honors expiry and revocation.
    let found = SessionRepo::find_by_refresh_token_hash(&pool, "live-hash")
        .await
        .unwrap();
    assert_eq!(found.map(|s| s.id), Some(live.id));
    assert!(SessionRepo::find_by_refresh_token_hash(&pool, "expired-hash")
        .await
        .unwrap()
        .is_none());
    assert!(SessionRepo::find_by_refresh_token_hash(&pool, "revoked-hash")
        .await
        .unwrap()
        .is_none());

    // Revoking an already-revoked session reports false.
    assert!(!SessionRepo::revoke(&pool, revoked.id).await.unwrap());

    // Cleanup removes the expired and revoked rows, keeps the live one.
    let deleted = SessionRepo::cleanup_expired(&pool).await.unwrap();
    assert_eq!(deleted, 2);
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_sessions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 1);

    // revoke_all_for_user sweeps what is left.
    let revoked_count = SessionRepo::revoke_all_for_user(&pool, user.id).await.unwrap();
    assert_eq!(revoked_count, 1);
}

// ---------------------------------------------------------------------------
// Test: Notification references survive source deletion as NULL
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_notification_reference_counts(pool: PgPool) {
    let fan = UserRepo::create(&pool, &new_user("fan@test.com", "fan")).await.unwrap();
    let artist = ArtistRepo::create(&pool, &new_artist("Chungha", None))
        .await
        .unwrap();
    let schedule = ScheduleRepo::create(&pool, &new_schedule(Some(artist.id), None, "Concert"))
        .await
        .unwrap();

    let like = LikeRepo::create(
        &pool,
        &CreateLike {
            artist_id: Some(artist.id),
            artist_group_id: None,
            user_id: fan.id,
        },
    )
    .await
    .unwrap();
    let favorite = FavoriteRepo::create(
        &pool,
        &CreateFavorite {
            schedule_id: schedule.id,
            user_id: fan.id,
        },
    )
    .await
    .unwrap();

    for _ in 0..2 {
        NotificationRepo::create(
            &pool,
            &CreateNotification {
                is_active: true,
                likes_id: Some(like.id),
                favorites_id: None,
            },
        )
        .await
        .unwrap();
    }
    NotificationRepo::create(
        &pool,
        &CreateNotification {
            is_active: true,
            likes_id: None,
            favorites_id: Some(favorite.id),
        },
    )
    .await
    .unwrap();

    assert_eq!(NotificationRepo::count_for_like(&pool, like.id).await.unwrap(), 2);
    assert_eq!(
        NotificationRepo::count_for_favorite(&pool, favorite.id)
            .await
            .unwrap(),
        1
    );

    // Deleting the favorite nulls the reference; the history row stays.
    assert!(FavoriteRepo::delete(&pool, favorite.id).await.unwrap());
    assert_eq!(
        NotificationRepo::count_for_favorite(&pool, favorite.id)
            .await
            .unwrap(),
        0
    );
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notifications")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(total, 3);
}

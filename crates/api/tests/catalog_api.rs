//! Integration tests for the artist and artist-group catalog, including the
//! combined listing and staff-only write enforcement.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_staff_user, create_test_user, delete_auth, get, login_for_token,
    patch_json_auth, post_json, post_json_auth,
};
use fansync_db::repositories::{ArtistRepo, LikeRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a group via the API and return its id.
async fn create_group(pool: &PgPool, token: &str, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": name, "agency": "Test Ent." });
    let response = post_json_auth(app, "/api/v1/artist-groups", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create an artist via the API and return its id.
async fn create_artist(pool: &PgPool, token: &str, name: &str, group_id: Option<i64>) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": name, "artist_group_id": group_id });
    let response = post_json_auth(app, "/api/v1/artists", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Artists
// ---------------------------------------------------------------------------

/// Staff creates an artist; defaults are applied for omitted fields.
#[sqlx::test(migrations = "../../db/migrations")]
async fn staff_creates_artist(pool: PgPool) {
    let (staff, password) = create_staff_user(&pool, "curator@test.com", "curator").await;

    let app = common::build_test_app(pool.clone());
    let token = login_for_token(app, "curator@test.com", &password).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "IU", "agency": "EDAM", "fandom": "UAENA" });
    let response = post_json_auth(app, "/api/v1/artists", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "IU");
    assert_eq!(json["data"]["agency"], "EDAM");
    assert_eq!(json["data"]["fandom"], "UAENA");
    assert_eq!(json["data"]["solo_active"], false);
    assert!(json["data"]["artist_group_id"].is_null());
    // The creating staff account is recorded.
    assert_eq!(json["data"]["created_by"], staff.id);
}

/// A blank artist name is rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn create_artist_rejects_blank_name(pool: PgPool) {
    let (_staff, password) = create_staff_user(&pool, "curator@test.com", "curator").await;

    let app = common::build_test_app(pool.clone());
    let token = login_for_token(app, "curator@test.com", &password).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "   " });
    let response = post_json_auth(app, "/api/v1/artists", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Referencing a nonexistent group fails with 404 instead of an FK error.
#[sqlx::test(migrations = "../../db/migrations")]
async fn create_artist_rejects_unknown_group(pool: PgPool) {
    let (_staff, password) = create_staff_user(&pool, "curator@test.com", "curator").await;

    let app = common::build_test_app(pool.clone());
    let token = login_for_token(app, "curator@test.com", &password).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Stray", "artist_group_id": 99999 });
    let response = post_json_auth(app, "/api/v1/artists", body, &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Catalog writes are staff-only; reads are public.
#[sqlx::test(migrations = "../../db/migrations")]
async fn artist_writes_require_staff(pool: PgPool) {
    let (_fan, password) = create_test_user(&pool, "fan@test.com", "fan").await;

    let app = common::build_test_app(pool.clone());
    let token = login_for_token(app, "fan@test.com", &password).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": "Unauthorized Artist" });
    let response = post_json_auth(app, "/api/v1/artists", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Anonymous listing works.
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/artists").await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// List and get-by-id round out the public read surface.
#[sqlx::test(migrations = "../../db/migrations")]
async fn list_and_get_artist(pool: PgPool) {
    let (_staff, password) = create_staff_user(&pool, "curator@test.com", "curator").await;
    let app = common::build_test_app(pool.clone());
    let token = login_for_token(app, "curator@test.com", &password).await;

    let artist_id = create_artist(&pool, &token, "Taeyeon", None).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/artists").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let artists = json["data"].as_array().unwrap();
    assert!(artists.iter().any(|a| a["name"] == "Taeyeon"));

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/artists/{artist_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], artist_id);
}

/// Fetching an unknown artist returns 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn get_unknown_artist_fails(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/artists/12345").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// PATCH updates only the provided fields.
#[sqlx::test(migrations = "../../db/migrations")]
async fn update_artist_is_partial(pool: PgPool) {
    let (_staff, password) = create_staff_user(&pool, "curator@test.com", "curator").await;
    let app = common::build_test_app(pool.clone());
    let token = login_for_token(app, "curator@test.com", &password).await;

    let artist_id = create_artist(&pool, &token, "Solo Act", None).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "solo_active": true, "instagram": "@soloact" });
    let response =
        patch_json_auth(app, &format!("/api/v1/artists/{artist_id}"), body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["solo_active"], true);
    assert_eq!(json["data"]["instagram"], "@soloact");
    assert_eq!(json["data"]["name"], "Solo Act");
}

/// Deleting an artist cascades to the likes referencing them.
#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_artist_cascades_likes(pool: PgPool) {
    let (_staff, password) = create_staff_user(&pool, "curator@test.com", "curator").await;
    let (fan, fan_password) = create_test_user(&pool, "fan@test.com", "fan").await;

    let app = common::build_test_app(pool.clone());
    let token = login_for_token(app, "curator@test.com", &password).await;
    let artist_id = create_artist(&pool, &token, "Disbanding", None).await;

    let app = common::build_test_app(pool.clone());
    let fan_token = login_for_token(app, "fan@test.com", &fan_password).await;
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "artist_id": artist_id });
    let response = post_json_auth(app, "/api/v1/likes", body, &fan_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/artists/{artist_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(ArtistRepo::find_by_id(&pool, artist_id)
        .await
        .unwrap()
        .is_none());
    let likes = LikeRepo::list_for_user(&pool, fan.id).await.unwrap();
    assert!(likes.is_empty(), "likes must cascade with the artist");
}

/// Deleting an unknown artist returns 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_unknown_artist_fails(pool: PgPool) {
    let (_staff, password) = create_staff_user(&pool, "curator@test.com", "curator").await;
    let app = common::build_test_app(pool.clone());
    let token = login_for_token(app, "curator@test.com", &password).await;

    let app = common::build_test_app(pool);
    let response = delete_auth(app, "/api/v1/artists/99999", &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Artist groups
// ---------------------------------------------------------------------------

/// Group CRUD mirrors the artist endpoints.
#[sqlx::test(migrations = "../../db/migrations")]
async fn group_create_update_delete(pool: PgPool) {
    let (_staff, password) = create_staff_user(&pool, "curator@test.com", "curator").await;
    let app = common::build_test_app(pool.clone());
    let token = login_for_token(app, "curator@test.com", &password).await;

    let group_id = create_group(&pool, &token, "NewJeans").await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/artist-groups/{group_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "NewJeans");
    assert_eq!(json["data"]["agency"], "Test Ent.");

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "fandom": "Bunnies" });
    let response = patch_json_auth(
        app,
        &format!("/api/v1/artist-groups/{group_id}"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["fandom"], "Bunnies");
    assert_eq!(json["data"]["name"], "NewJeans");

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/artist-groups/{group_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/artist-groups/{group_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Deleting a group removes its member artists via CASCADE.
#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_group_cascades_members(pool: PgPool) {
    let (_staff, password) = create_staff_user(&pool, "curator@test.com", "curator").await;
    let app = common::build_test_app(pool.clone());
    let token = login_for_token(app, "curator@test.com", &password).await;

    let group_id = create_group(&pool, &token, "Shortlived").await;
    let member_id = create_artist(&pool, &token, "Member One", Some(group_id)).await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/artist-groups/{group_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(
        ArtistRepo::find_by_id(&pool, member_id)
            .await
            .unwrap()
            .is_none(),
        "member artists must cascade with their group"
    );
}

/// Group writes require the staff role.
#[sqlx::test(migrations = "../../db/migrations")]
async fn group_writes_require_staff(pool: PgPool) {
    let (_fan, password) = create_test_user(&pool, "fan@test.com", "fan").await;

    let app = common::build_test_app(pool.clone());
    let token = login_for_token(app, "fan@test.com", &password).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Fan Group" });
    let response = post_json_auth(app, "/api/v1/artist-groups", body, &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Combined catalog
// ---------------------------------------------------------------------------

/// GET /artists-and-groups returns both collections in one payload.
#[sqlx::test(migrations = "../../db/migrations")]
async fn combined_catalog_lists_both(pool: PgPool) {
    let (_staff, password) = create_staff_user(&pool, "curator@test.com", "curator").await;
    let app = common::build_test_app(pool.clone());
    let token = login_for_token(app, "curator@test.com", &password).await;

    let group_id = create_group(&pool, &token, "aespa").await;
    create_artist(&pool, &token, "Karina", Some(group_id)).await;
    create_artist(&pool, &token, "Soloist", None).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/artists-and-groups").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["artists"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"]["artist_groups"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["artist_groups"][0]["name"], "aespa");
}

//! Integration tests for staff-authority requests: fans file them, staff
//! read the queue.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_staff_user, create_test_user, get_auth, login_for_token, post_json,
    post_json_auth,
};
use sqlx::PgPool;

fn request_body(artist_name: &str, phone_number: &str) -> serde_json::Value {
    serde_json::json!({
        "artist_name": artist_name,
        "agency": "Starlight Ent.",
        "phone_number": phone_number
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// Filing a request records the caller as its owner.
#[sqlx::test(migrations = "../../db/migrations")]
async fn file_authority_request(pool: PgPool) {
    let (fan, password) = create_test_user(&pool, "hopeful@test.com", "hopeful").await;
    let app = common::build_test_app(pool.clone());
    let token = login_for_token(app, "hopeful@test.com", &password).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/authority",
        request_body("Chungha", "010-1234-5678"),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], fan.id);
    assert_eq!(json["data"]["artist_name"], "Chungha");
    assert_eq!(json["data"]["agency"], "Starlight Ent.");
}

/// A request without an artist name or phone number is rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_fields_are_rejected(pool: PgPool) {
    let (_fan, password) = create_test_user(&pool, "hopeful@test.com", "hopeful").await;
    let app = common::build_test_app(pool.clone());
    let token = login_for_token(app, "hopeful@test.com", &password).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/authority",
        request_body("   ", "010-1234-5678"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "artist_name must not be empty");

    let app = common::build_test_app(pool);
    let response =
        post_json_auth(app, "/api/v1/authority", request_body("Chungha", ""), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "phone_number must not be empty");
}

/// Filing a request requires authentication.
#[sqlx::test(migrations = "../../db/migrations")]
async fn filing_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/authority",
        request_body("Chungha", "010-1234-5678"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Staff see the queue newest first; fans are turned away.
#[sqlx::test(migrations = "../../db/migrations")]
async fn queue_is_staff_only(pool: PgPool) {
    let (_fan, password) = create_test_user(&pool, "hopeful@test.com", "hopeful").await;
    let app = common::build_test_app(pool.clone());
    let fan_token = login_for_token(app, "hopeful@test.com", &password).await;

    for name in ["First", "Second"] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            "/api/v1/authority",
            request_body(name, "010-1234-5678"),
            &fan_token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let (_staff, password) = create_staff_user(&pool, "reviewer@test.com", "reviewer").await;
    let app = common::build_test_app(pool.clone());
    let staff_token = login_for_token(app, "reviewer@test.com", &password).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/authority", &staff_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let requests = json["data"].as_array().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0]["artist_name"], "Second");

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/authority", &fan_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

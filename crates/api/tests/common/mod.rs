//! Shared helpers for API integration tests.
//!
//! `build_test_app` mirrors the router construction in `main.rs` so the tests
//! exercise the same middleware stack (CORS, request ID, timeout, tracing,
//! panic recovery) that production uses. Outgoing email always goes through a
//! [`RecordingMailer`]; use [`build_test_app_with_mailer`] to keep a handle on
//! it and assert on what was sent.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use fansync_api::auth::jwt::JwtConfig;
use fansync_api::auth::oauth::OAuthClient;
use fansync_api::auth::password::hash_password;
use fansync_api::auth::signed_token::TokenSigner;
use fansync_api::config::{OAuthConfig, ServerConfig};
use fansync_api::router::build_app_router;
use fansync_api::state::AppState;
use fansync_db::models::user::{CreateUser, User};
use fansync_db::repositories::UserRepo;
use fansync_events::{EventBus, RecordingMailer};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin and site URL (matching the dev
/// defaults), a 30-second request timeout, and a fixed JWT secret so tests can
/// mint their own signed tokens when needed.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        site_url: "http://localhost:5173".to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a throwaway recording mailer.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_mailer(pool, Arc::new(RecordingMailer::new()))
}

/// Like [`build_test_app`], but with a caller-supplied mailer so the test can
/// inspect recorded messages afterwards.
pub fn build_test_app_with_mailer(pool: PgPool, mailer: Arc<RecordingMailer>) -> Router {
    build_test_app_with_bus(pool, mailer, Arc::new(EventBus::default()))
}

/// Like [`build_test_app_with_mailer`], but also with a caller-supplied event
/// bus so the test can subscribe to what the handlers publish.
pub fn build_test_app_with_bus(
    pool: PgPool,
    mailer: Arc<RecordingMailer>,
    event_bus: Arc<EventBus>,
) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus,
        mailer,
        token_signer: TokenSigner::new(&config.jwt.secret),
        oauth: OAuthClient::new(OAuthConfig::default()),
        geocoder: None,
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request to the app and return the raw response.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PATCH request with a JSON body and a bearer token.
pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request without credentials.
pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request with a bearer token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Password used for all fixture accounts. Satisfies the strength rules
/// (length and not all-numeric).
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Create an active (already verified) user directly in the database and
/// return the row plus the plaintext password.
pub async fn create_test_user(pool: &PgPool, email: &str, nickname: &str) -> (User, String) {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let input = CreateUser {
        email: email.to_string(),
        password_hash: Some(hashed),
        nickname: nickname.to_string(),
        is_active: true,
        gender: None,
        age: None,
        social_provider: None,
        social_id: None,
        image_url: None,
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    (user, TEST_PASSWORD.to_string())
}

/// Create an active user with the staff flag set.
pub async fn create_staff_user(pool: &PgPool, email: &str, nickname: &str) -> (User, String) {
    let (user, password) = create_test_user(pool, email, nickname).await;
    sqlx::query("UPDATE users SET is_staff = TRUE WHERE id = $1")
        .bind(user.id)
        .execute(pool)
        .await
        .expect("staff flag update should succeed");
    let user = UserRepo::find_by_id(pool, user.id)
        .await
        .expect("user lookup should succeed")
        .expect("user should still exist");
    (user, password)
}

/// Log in via the API and return the full JSON response containing
/// `access_token`, `refresh_token`, and `user`.
pub async fn login_response(app: Router, email: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Log in via the API and return just the access token.
pub async fn login_for_token(app: Router, email: &str, password: &str) -> String {
    let json = login_response(app, email, password).await;
    json["access_token"]
        .as_str()
        .expect("login response must contain access_token")
        .to_string()
}

//! Surface-level HTTP behaviour: the health endpoint, 404s, request ids,
//! and CORS preflight.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use sqlx::PgPool;
use tower::ServiceExt;

/// `/health` answers 200 and reports the database as reachable.
#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_ok_and_database_up(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "up");
}

/// A path no route claims falls through to 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_route_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// When the client sends no request id, the server mints a UUID one.
#[sqlx::test(migrations = "../../db/migrations")]
async fn server_mints_a_request_id(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    let id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header missing")
        .to_str()
        .unwrap();
    assert_eq!(id.len(), 36, "expected a hyphenated UUID, got: {id}");
    assert_eq!(id.chars().filter(|c| *c == '-').count(), 4);
}

/// A client-supplied request id survives to the response untouched.
#[sqlx::test(migrations = "../../db/migrations")]
async fn client_request_id_is_propagated(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "trace-abc-123"
    );
}

/// Preflight from a configured origin gets the origin echoed back, with
/// PATCH among the allowed methods and credentials permitted.
#[sqlx::test(migrations = "../../db/migrations")]
async fn preflight_allows_configured_origin(pool: PgPool) {
    let app = common::build_test_app(pool);

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/schedules")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "GET")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(preflight).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(headers.get("access-control-allow-credentials").unwrap(), "true");

    let methods = headers
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("PATCH"), "got: {methods}");
}

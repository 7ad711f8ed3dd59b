use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"` while the database answers, `"degraded"` otherwise.
    pub status: &'static str,
    /// `"up"` or `"down"`.
    pub database: &'static str,
}

/// Liveness probe. Pings the database and reports what it found; always
/// answers 200 so a load balancer can tell "degraded" from "gone".
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_up = fansync_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_up { "ok" } else { "degraded" },
        database: if db_up { "up" } else { "down" },
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

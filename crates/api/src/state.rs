use std::sync::Arc;

use fansync_events::{EventBus, Mailer};

use crate::auth::oauth::OAuthClient;
use crate::auth::signed_token::TokenSigner;
use crate::config::ServerConfig;
use crate::geo::KakaoLocalClient;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fansync_db::DbPool,
    /// Server configuration (bind address, CORS, JWT, site URL).
    pub config: Arc<ServerConfig>,
    /// Centralized event bus; schedule writes publish onto it and the
    /// notification dispatcher consumes from it.
    pub event_bus: Arc<EventBus>,
    /// Outgoing email transport. SMTP in production, a recording double in
    /// tests and when SMTP is unconfigured.
    pub mailer: Arc<dyn Mailer>,
    /// Signer for email-verification and password-reset tokens.
    pub token_signer: TokenSigner,
    /// Social login client. Providers without credentials reject per-call.
    pub oauth: OAuthClient,
    /// Kakao local search client; `None` leaves schedules ungeocoded.
    pub geocoder: Option<KakaoLocalClient>,
}

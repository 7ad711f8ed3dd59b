use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fansync_api::auth::oauth::OAuthClient;
use fansync_api::auth::signed_token::TokenSigner;
use fansync_api::config::{KakaoLocalConfig, OAuthConfig, ServerConfig};
use fansync_api::geo::KakaoLocalClient;
use fansync_api::notifications::NotificationDispatcher;
use fansync_api::router::build_app_router;
use fansync_api::state::AppState;
use fansync_db::repositories::SessionRepo;
use fansync_db::DbPool;
use fansync_events::{EmailConfig, EventBus, Mailer, RecordingMailer, SmtpMailer};

/// How often the stale-session purge runs.
const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Grace period for background tasks to wind down after the listener closes.
const TASK_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Server configuration loaded");

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL is required");
    let pool = init_database(&database_url).await;

    // Real SMTP when configured; otherwise emails land in an in-memory
    // recorder so the rest of the pipeline still works in development.
    let mailer: Arc<dyn Mailer> = match EmailConfig::from_env() {
        Some(email_config) => {
            tracing::info!(host = %email_config.smtp_host, "SMTP mailer configured");
            Arc::new(SmtpMailer::new(email_config))
        }
        None => {
            tracing::warn!("SMTP_HOST not set, emails will be recorded but not delivered");
            Arc::new(RecordingMailer::new())
        }
    };

    let event_bus = Arc::new(EventBus::default());

    // Fans schedule events out into notification rows and emails.
    let dispatcher =
        NotificationDispatcher::new(pool.clone(), Arc::clone(&mailer), config.site_url.clone());
    let dispatcher_handle = tokio::spawn(dispatcher.run(event_bus.subscribe()));
    tracing::info!("Notification dispatcher started");

    spawn_session_purge(pool.clone());

    let oauth = OAuthClient::new(OAuthConfig::from_env());
    let geocoder = KakaoLocalConfig::from_env().map(KakaoLocalClient::new);
    if geocoder.is_none() {
        tracing::warn!("KAKAO_REST_API_KEY not set, schedule locations will not be geocoded");
    }

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
        mailer,
        token_signer: TokenSigner::new(&config.jwt.secret),
        oauth,
        geocoder,
    };

    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("HOST is not a valid IP address"),
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Could not bind listener");
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server exited with error");

    tracing::info!("Listener closed, draining background tasks");

    // The server (and the AppState clones inside it) are gone by now, so
    // dropping this last handle closes the broadcast channel and ends the
    // dispatcher's receive loop.
    drop(event_bus);
    let _ = tokio::time::timeout(TASK_DRAIN_TIMEOUT, dispatcher_handle).await;
    tracing::info!("Notification dispatcher drained");

    tracing::info!("Shutdown complete");
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; the fallback keeps this crate and tower-http
/// chatty enough to follow requests in development.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fansync_api=debug,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Open the connection pool, verify the database answers, and bring the
/// schema up to date. Startup aborts on any failure here.
async fn init_database(database_url: &str) -> DbPool {
    let pool = fansync_db::create_pool(database_url)
        .await
        .expect("Could not open database pool");

    fansync_db::health_check(&pool)
        .await
        .expect("Database ping failed");

    fansync_db::run_migrations(&pool)
        .await
        .expect("Migrations failed");

    tracing::info!("Database ready, schema up to date");
    pool
}

/// Hourly purge of revoked and expired sessions. Detached on purpose;
/// there is nothing to flush at shutdown.
fn spawn_session_purge(pool: DbPool) {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(SESSION_CLEANUP_INTERVAL);
        loop {
            tick.tick().await;
            match SessionRepo::cleanup_expired(&pool).await {
                Ok(0) => {}
                Ok(deleted) => tracing::info!(deleted, "Purged stale sessions"),
                Err(error) => tracing::warn!(%error, "Session purge failed"),
            }
        }
    });
}

/// Resolves when the process receives SIGINT or, on Unix, SIGTERM, so
/// `axum::serve` can drain in-flight requests before returning.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Ctrl-C handler installation failed");
        "SIGINT"
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation failed")
            .recv()
            .await;
        "SIGTERM"
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&str>();

    let signal = tokio::select! {
        name = ctrl_c => name,
        name = terminate => name,
    };
    tracing::info!(signal, "Termination signal received, starting graceful shutdown");
}

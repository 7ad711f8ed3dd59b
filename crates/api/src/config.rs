use crate::auth::jwt::JwtConfig;

/// Everything the server reads from the environment at startup.
///
/// Defaults are tuned for local development; production deployments are
/// expected to set each variable explicitly.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address. `HOST`, default `0.0.0.0`.
    pub host: String,
    /// Bind port. `PORT`, default `3000`.
    pub port: u16,
    /// Allowed CORS origins, from comma-separated `CORS_ORIGINS`.
    /// Default is the Vite dev server.
    pub cors_origins: Vec<String>,
    /// Per-request timeout in seconds. `REQUEST_TIMEOUT_SECS`, default `30`.
    pub request_timeout_secs: u64,
    /// Public base URL of the frontend. Links embedded in outgoing emails
    /// (verification, password reset, schedule notices) are built on it.
    /// `SITE_URL`, trailing slash stripped.
    pub site_url: String,
    /// JWT secret and token lifetimes.
    pub jwt: JwtConfig,
}

/// Read `key` from the environment, falling back to `default` when unset.
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

impl ServerConfig {
    /// Assemble the configuration. Missing variables fall back to the dev
    /// defaults listed on each field; malformed numeric values abort startup.
    pub fn from_env() -> Self {
        let port: u16 = env_or("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self {
            host: env_or("HOST", "0.0.0.0"),
            port,
            cors_origins,
            request_timeout_secs,
            site_url: env_or("SITE_URL", "http://localhost:5173")
                .trim_end_matches('/')
                .to_string(),
            jwt: JwtConfig::from_env(),
        }
    }
}

// ---------------------------------------------------------------------------
// OAuth providers
// ---------------------------------------------------------------------------

/// Credentials for one OAuth provider.
#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Social-login provider credentials, one optional entry per provider.
///
/// A provider with missing credentials stays `None`; its callback endpoint
/// then reports a configuration error instead of failing startup.
#[derive(Debug, Clone, Default)]
pub struct OAuthConfig {
    pub google: Option<ProviderCredentials>,
    pub kakao: Option<ProviderCredentials>,
    pub naver: Option<ProviderCredentials>,
}

impl OAuthConfig {
    /// Load provider credentials from the environment.
    ///
    /// Each provider `P` in `GOOGLE` / `KAKAO` / `NAVER` needs all three of
    /// `P_CLIENT_ID`, `P_CLIENT_SECRET`, and `P_REDIRECT_URI` to be usable.
    pub fn from_env() -> Self {
        Self {
            google: Self::provider_from_env("GOOGLE"),
            kakao: Self::provider_from_env("KAKAO"),
            naver: Self::provider_from_env("NAVER"),
        }
    }

    fn provider_from_env(prefix: &str) -> Option<ProviderCredentials> {
        let client_id = std::env::var(format!("{prefix}_CLIENT_ID")).ok()?;
        let client_secret = std::env::var(format!("{prefix}_CLIENT_SECRET")).ok()?;
        let redirect_uri = std::env::var(format!("{prefix}_REDIRECT_URI")).ok()?;
        Some(ProviderCredentials {
            client_id,
            client_secret,
            redirect_uri,
        })
    }
}

// ---------------------------------------------------------------------------
// Kakao local (geocoding)
// ---------------------------------------------------------------------------

/// REST credentials for the Kakao local search API used to geocode schedule
/// locations.
#[derive(Debug, Clone)]
pub struct KakaoLocalConfig {
    /// REST API key, sent as `Authorization: KakaoAK <key>`.
    pub rest_api_key: String,
}

impl KakaoLocalConfig {
    /// Load from `KAKAO_REST_API_KEY`. Returns `None` when unset, in which
    /// case schedules are stored without coordinates.
    pub fn from_env() -> Option<Self> {
        let rest_api_key = std::env::var("KAKAO_REST_API_KEY").ok()?;
        if rest_api_key.is_empty() {
            return None;
        }
        Some(Self { rest_api_key })
    }
}

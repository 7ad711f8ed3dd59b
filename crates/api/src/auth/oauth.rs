//! Social login: authorization-code exchange and profile extraction.
//!
//! Each provider callback receives an authorization code from the frontend,
//! exchanges it for a provider access token, fetches the provider's profile
//! endpoint, and normalizes the result into a [`SocialProfile`]. The profile
//! parsers are pure functions over the provider JSON so they can be tested
//! without network access.

use fansync_core::error::CoreError;
use serde_json::Value;

use crate::config::{OAuthConfig, ProviderCredentials};
use crate::error::AppError;

/// Supported social login providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
    Kakao,
    Naver,
}

impl Provider {
    /// Parse the path segment of a callback URL (`/auth/{provider}/callback`).
    pub fn from_path(segment: &str) -> Option<Self> {
        match segment {
            "google" => Some(Self::Google),
            "kakao" => Some(Self::Kakao),
            "naver" => Some(Self::Naver),
            _ => None,
        }
    }

    /// Provider name as stored in `users.social_provider`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Kakao => "kakao",
            Self::Naver => "naver",
        }
    }

    fn token_endpoint(&self) -> &'static str {
        match self {
            Self::Google => "https://oauth2.googleapis.com/token",
            Self::Kakao => "https://kauth.kakao.com/oauth/token",
            Self::Naver => "https://nid.naver.com/oauth2.0/token",
        }
    }

    fn profile_endpoint(&self) -> &'static str {
        match self {
            Self::Google => "https://www.googleapis.com/oauth2/v2/userinfo",
            Self::Kakao => "https://kapi.kakao.com/v2/user/me",
            Self::Naver => "https://openapi.naver.com/v1/nid/me",
        }
    }
}

/// Normalized profile data extracted from a provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialProfile {
    pub provider: &'static str,
    pub social_id: String,
    pub email: String,
    pub nickname: String,
    pub gender: Option<String>,
    pub image_url: Option<String>,
}

/// Errors from the OAuth exchange and profile fetch.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    /// Credentials for the provider are not configured on this deployment.
    #[error("OAuth provider '{0}' is not configured")]
    NotConfigured(&'static str),

    /// The provider rejected the code exchange or profile request.
    #[error("OAuth exchange failed: {0}")]
    Rejected(String),

    /// The provider response was missing a field we require.
    #[error("Provider profile is missing required field '{0}'")]
    MissingField(&'static str),
}

impl From<OAuthError> for AppError {
    fn from(err: OAuthError) -> Self {
        match err {
            OAuthError::NotConfigured(_) => AppError::InternalError(err.to_string()),
            OAuthError::Rejected(_) | OAuthError::MissingField(_) => {
                AppError::Core(CoreError::Unauthorized(err.to_string()))
            }
        }
    }
}

/// Performs the code-for-profile exchange against provider HTTP APIs.
#[derive(Clone)]
pub struct OAuthClient {
    http: reqwest::Client,
    config: OAuthConfig,
}

impl OAuthClient {
    pub fn new(config: OAuthConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn credentials(&self, provider: Provider) -> Result<&ProviderCredentials, OAuthError> {
        let creds = match provider {
            Provider::Google => self.config.google.as_ref(),
            Provider::Kakao => self.config.kakao.as_ref(),
            Provider::Naver => self.config.naver.as_ref(),
        };
        creds.ok_or(OAuthError::NotConfigured(provider.as_str()))
    }

    /// Exchange an authorization code and return the normalized profile.
    pub async fn fetch_profile(
        &self,
        provider: Provider,
        code: &str,
    ) -> Result<SocialProfile, OAuthError> {
        let access_token = self.exchange_code(provider, code).await?;

        let response = self
            .http
            .get(provider.profile_endpoint())
            .bearer_auth(&access_token)
            .send()
            .await
            .map_err(|e| OAuthError::Rejected(format!("profile request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(OAuthError::Rejected(format!(
                "profile endpoint returned {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| OAuthError::Rejected(format!("profile response was not JSON: {e}")))?;

        parse_profile(provider, &body)
    }

    async fn exchange_code(&self, provider: Provider, code: &str) -> Result<String, OAuthError> {
        let creds = self.credentials(provider)?;

        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", creds.client_id.as_str()),
            ("client_secret", creds.client_secret.as_str()),
            ("redirect_uri", creds.redirect_uri.as_str()),
            ("code", code),
        ];

        let response = self
            .http
            .post(provider.token_endpoint())
            .form(&params)
            .send()
            .await
            .map_err(|e| OAuthError::Rejected(format!("token request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(OAuthError::Rejected(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| OAuthError::Rejected(format!("token response was not JSON: {e}")))?;

        body.get("access_token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(OAuthError::MissingField("access_token"))
    }
}

/// Normalize a provider profile response into a [`SocialProfile`].
pub fn parse_profile(provider: Provider, body: &Value) -> Result<SocialProfile, OAuthError> {
    match provider {
        Provider::Google => parse_google_profile(body),
        Provider::Kakao => parse_kakao_profile(body),
        Provider::Naver => parse_naver_profile(body),
    }
}

/// Google `oauth2/v2/userinfo`: flat object with `id`, `email`, `name`,
/// `picture`. Google does not expose gender.
fn parse_google_profile(body: &Value) -> Result<SocialProfile, OAuthError> {
    let social_id = body
        .get("id")
        .and_then(Value::as_str)
        .ok_or(OAuthError::MissingField("id"))?;
    let email = body
        .get("email")
        .and_then(Value::as_str)
        .ok_or(OAuthError::MissingField("email"))?;
    let nickname = body.get("name").and_then(Value::as_str).unwrap_or(email);

    Ok(SocialProfile {
        provider: Provider::Google.as_str(),
        social_id: social_id.to_string(),
        email: email.to_string(),
        nickname: nickname.to_string(),
        gender: None,
        image_url: body
            .get("picture")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Kakao `/v2/user/me`: numeric `id` plus a nested `kakao_account` with
/// `email`, `gender` (already `male`/`female`), and a `profile` object.
fn parse_kakao_profile(body: &Value) -> Result<SocialProfile, OAuthError> {
    let social_id = body
        .get("id")
        .and_then(Value::as_i64)
        .ok_or(OAuthError::MissingField("id"))?;
    let account = body
        .get("kakao_account")
        .ok_or(OAuthError::MissingField("kakao_account"))?;
    let email = account
        .get("email")
        .and_then(Value::as_str)
        .ok_or(OAuthError::MissingField("email"))?;

    let profile = account.get("profile");
    let nickname = profile
        .and_then(|p| p.get("nickname"))
        .and_then(Value::as_str)
        .unwrap_or(email);
    let image_url = profile
        .and_then(|p| p.get("profile_image_url"))
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(SocialProfile {
        provider: Provider::Kakao.as_str(),
        social_id: social_id.to_string(),
        email: email.to_string(),
        nickname: nickname.to_string(),
        gender: account
            .get("gender")
            .and_then(Value::as_str)
            .map(str::to_string),
        image_url,
    })
}

/// Naver `/v1/nid/me`: payload nested under `response`; gender arrives as
/// `M` / `F` and is mapped to `male` / `female`.
fn parse_naver_profile(body: &Value) -> Result<SocialProfile, OAuthError> {
    let response = body
        .get("response")
        .ok_or(OAuthError::MissingField("response"))?;
    let social_id = response
        .get("id")
        .and_then(Value::as_str)
        .ok_or(OAuthError::MissingField("id"))?;
    let email = response
        .get("email")
        .and_then(Value::as_str)
        .ok_or(OAuthError::MissingField("email"))?;
    let nickname = response
        .get("nickname")
        .and_then(Value::as_str)
        .unwrap_or(email);

    let gender = response
        .get("gender")
        .and_then(Value::as_str)
        .and_then(|g| match g {
            "M" => Some("male".to_string()),
            "F" => Some("female".to_string()),
            _ => None,
        });

    Ok(SocialProfile {
        provider: Provider::Naver.as_str(),
        social_id: social_id.to_string(),
        email: email.to_string(),
        nickname: nickname.to_string(),
        gender,
        image_url: response
            .get("profile_image")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

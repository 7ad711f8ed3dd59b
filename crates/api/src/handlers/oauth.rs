//! Handler for the social-login callback: `POST /auth/{provider}/callback`.
//!
//! The frontend completes the provider's authorization redirect and posts
//! the resulting code here. We exchange it for a profile, find or create
//! the matching account, and issue the same token pair as a password login.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use sqlx::PgPool;

use fansync_db::models::user::{CreateUser, UpdateUser, User};
use fansync_db::repositories::UserRepo;

use crate::auth::cookies::auth_cookies;
use crate::auth::oauth::{Provider, SocialProfile};
use crate::error::{AppError, AppResult};
use crate::handlers::auth::create_auth_response;
use crate::state::AppState;

/// Request body for `POST /auth/{provider}/callback`.
#[derive(Debug, Deserialize)]
pub struct CallbackRequest {
    pub code: Option<String>,
}

/// POST /api/v1/auth/{provider}/callback
///
/// Exchange an authorization code for our own token pair. Accounts are
/// keyed by email: a profile whose email already exists logs into that
/// account, otherwise a new active account is created without a password.
pub async fn callback(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Json(input): Json<CallbackRequest>,
) -> AppResult<impl IntoResponse> {
    // 1. Resolve the provider from the path segment.
    let provider = Provider::from_path(&provider).ok_or_else(|| {
        AppError::BadRequest(format!("Unsupported OAuth provider: {provider}"))
    })?;

    // 2. The authorization code is mandatory.
    let code = input
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Authorization code was not provided".into()))?;

    // 3. Exchange the code and fetch the provider profile.
    let profile = state.oauth.fetch_profile(provider, code).await?;

    // 4. Find or create the account for this email.
    let user = resolve_social_account(&state.pool, &profile).await?;

    // 5. Issue tokens exactly like a password login.
    let response = create_auth_response(&state, &user).await?;

    Ok((
        auth_cookies(
            &response.access_token,
            &response.refresh_token,
            &state.config.jwt,
        ),
        Json(response),
    ))
}

/// Look up the account by profile email, creating it when absent.
///
/// An existing account that never finished email verification is activated
/// here: the provider has already vouched for the address. Gaps in the
/// stored profile (blank nickname, unknown gender, missing or stale avatar)
/// are filled from the provider's profile; everything else is kept. New
/// accounts start active for the same reason.
pub async fn resolve_social_account(
    pool: &PgPool,
    profile: &SocialProfile,
) -> AppResult<User> {
    if let Some(existing) = UserRepo::find_by_email(pool, &profile.email).await? {
        if !existing.is_active {
            UserRepo::activate(pool, existing.id).await?;
            tracing::info!(
                user_id = existing.id,
                provider = profile.provider,
                "Activated unverified account via social login"
            );
        }

        let patch = UpdateUser {
            nickname: if existing.nickname.trim().is_empty() {
                Some(profile.nickname.clone())
            } else {
                None
            },
            gender: if existing.gender.is_none() {
                profile.gender.clone()
            } else {
                None
            },
            image_url: if profile.image_url.is_some() && profile.image_url != existing.image_url {
                profile.image_url.clone()
            } else {
                None
            },
            ..Default::default()
        };

        if patch.nickname.is_some() || patch.gender.is_some() || patch.image_url.is_some() {
            if let Some(user) = UserRepo::update(pool, existing.id, &patch).await? {
                return Ok(user);
            }
        }
        return Ok(User {
            is_active: true,
            ..existing
        });
    }

    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: profile.email.clone(),
            password_hash: None,
            nickname: profile.nickname.clone(),
            is_active: true,
            gender: profile.gender.clone(),
            age: None,
            social_provider: Some(profile.provider.to_string()),
            social_id: Some(profile.social_id.clone()),
            image_url: profile.image_url.clone(),
        },
    )
    .await?;

    tracing::info!(
        user_id = user.id,
        provider = profile.provider,
        "Created account from social login"
    );
    Ok(user)
}

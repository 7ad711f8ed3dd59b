//! Handlers for the `/auth` resource: registration, email verification,
//! login / refresh / logout, and the password-reset flow.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use fansync_core::error::CoreError;
use fansync_core::types::DbId;
use fansync_db::models::session::CreateSession;
use fansync_db::models::user::{CreateUser, User, UserResponse};
use fansync_db::repositories::{SessionRepo, UserRepo};
use fansync_events::EmailMessage;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::auth::cookies::{auth_cookies, clear_auth_cookies, cookie_value, REFRESH_COOKIE};
use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::auth::signed_token::{SignedTokenError, PURPOSE_PASSWORD_RESET, PURPOSE_VERIFY_EMAIL};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, max = 30, message = "nickname must be 1-30 characters"))]
    pub nickname: String,
    pub gender: Option<String>,
    pub age: Option<i32>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`. The token may also arrive via the
/// `refresh` cookie, in which case the body can be empty.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Request body for `POST /auth/logout`.
#[derive(Debug, Default, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

/// Query string for the token-bearing GET endpoints
/// (`/auth/verify-email`, `/auth/password-reset/check-token`).
#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

/// Request body for `POST /auth/password-reset/request`.
#[derive(Debug, Deserialize)]
pub struct PasswordResetRequestBody {
    pub email: String,
}

/// Request body for `POST /auth/password-reset/reset`.
#[derive(Debug, Deserialize)]
pub struct PasswordResetBody {
    pub token: String,
    pub password: String,
}

/// Successful authentication response returned by login, refresh, and the
/// OAuth callbacks.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Registration + email verification
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an inactive account and email an activation link. The account
/// becomes usable once the link is visited within the token window.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    // 1. Validate payload shape and password strength.
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // 2. Hash and store. A duplicate email surfaces as 409 via uq_users_email.
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email,
            password_hash: Some(password_hash),
            nickname: input.nickname,
            is_active: false,
            gender: input.gender,
            age: input.age,
            social_provider: None,
            social_id: None,
            image_url: None,
        },
    )
    .await?;

    // 3. Send the activation link.
    send_verification_email(&state, &user).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}

/// GET /api/v1/auth/verify-email?token=...
///
/// Activate the account referenced by a valid token. Re-visiting the link
/// while the token is still valid succeeds again. An expired token removes
/// the still-inactive account so the email address can register again from
/// scratch; any other invalid token is rejected outright.
pub async fn verify_email(
    State(state): State<AppState>,
    Query(params): Query<TokenQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let token = require_token(params.token.as_deref())?;

    match state.token_signer.verify(PURPOSE_VERIFY_EMAIL, token) {
        Ok(user_id) => {
            let activated = UserRepo::activate(&state.pool, user_id).await?;
            if !activated {
                return Err(AppError::Core(CoreError::NotFound {
                    entity: "User",
                    id: user_id,
                }));
            }
            tracing::info!(user_id, "Email verified, account activated");
            Ok(Json(json!({ "message": "Email verified successfully" })))
        }
        Err(SignedTokenError::Expired { user_id }) => {
            UserRepo::delete(&state.pool, user_id).await?;
            tracing::info!(user_id, "Verification token expired, pending account removed");
            Err(AppError::Core(CoreError::Validation(
                "Verification token expired; the pending account has been removed".into(),
            )))
        }
        Err(_) => Err(AppError::Core(CoreError::Validation(
            "Invalid verification token".into(),
        ))),
    }
}

// ---------------------------------------------------------------------------
// Login / refresh / logout
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens in
/// the body and as `HttpOnly` cookies.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    // 1. Find user by email (lowercased at the repository boundary).
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    // 2. Unverified accounts cannot log in.
    if !user.is_active {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Account is not verified".into(),
        )));
    }

    // 3. Check if the account is temporarily locked.
    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    // 4. Verify password. Social-only accounts have no local password.
    let Some(stored_hash) = user.password_hash.as_deref() else {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    };
    let password_valid = verify_password(&input.password, stored_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        // 5. On failure: increment counter, lock if threshold exceeded.
        UserRepo::increment_failed_login(&state.pool, user.id).await?;

        let new_count = user.failed_login_count + 1;
        if new_count >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            UserRepo::lock_account(&state.pool, user.id, lock_until).await?;
            tracing::warn!(user_id = user.id, "Account locked after repeated failures");
        }

        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    // 6. On success: reset failed count, set last_login_at.
    UserRepo::record_successful_login(&state.pool, user.id).await?;

    // 7. Generate tokens, create a session, install the cookies.
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

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token (body field or `refresh` cookie) for new
/// access + refresh tokens. The old session is revoked (token rotation).
/// Cookie-only clients may POST with no body at all.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<RefreshRequest>>,
) -> AppResult<impl IntoResponse> {
    // 1. Resolve the presented refresh token.
    let presented = body
        .and_then(|Json(input)| input.refresh_token)
        .or_else(|| refresh_cookie(&headers))
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Refresh token is required".into()))
        })?;

    // 2. Find the matching active session by token hash.
    let token_hash = hash_refresh_token(&presented);
    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // 3. Revoke the old session (token rotation).
    SessionRepo::revoke(&state.pool, session.id).await?;

    // 4. The user must still exist and be active.
    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Account is not active".into(),
        )));
    }

    // 5. Generate new tokens and a new session.
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

/// POST /api/v1/auth/logout
///
/// Revoke the presented refresh token's session (all of the caller's
/// sessions when none is presented) and clear the auth cookies. The body
/// is optional. Returns 204 No Content.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
    headers: HeaderMap,
    body: Option<Json<LogoutRequest>>,
) -> AppResult<impl IntoResponse> {
    let presented = body
        .and_then(|Json(input)| input.refresh_token)
        .or_else(|| refresh_cookie(&headers));

    match presented {
        Some(token) => {
            let token_hash = hash_refresh_token(&token);
            if let Some(session) =
                SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash).await?
            {
                // Only the session owner may revoke it.
                if session.user_id == auth_user.user_id {
                    SessionRepo::revoke(&state.pool, session.id).await?;
                }
            }
        }
        None => {
            SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
        }
    }

    Ok((StatusCode::NO_CONTENT, clear_auth_cookies()))
}

// ---------------------------------------------------------------------------
// Password reset
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/password-reset/request
///
/// Email a reset link to the given address. Unknown addresses return 404.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(input): Json<PasswordResetRequestBody>,
) -> AppResult<Json<serde_json::Value>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::NotFound("No account with that email address".into()))?;

    send_password_reset_email(&state, &user).await?;

    Ok(Json(
        json!({ "message": "Password reset link has been emailed" }),
    ))
}

/// GET /api/v1/auth/password-reset/check-token?token=...
///
/// Report whether a reset token is still usable. The frontend calls this
/// before showing the new-password form. Expiry here is non-destructive.
pub async fn check_password_reset_token(
    State(state): State<AppState>,
    Query(params): Query<TokenQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let token = require_token(params.token.as_deref())?;
    let user_id = verify_reset_token(&state, token)?;

    // The account may have been deleted since the email went out.
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    Ok(Json(json!({ "message": "Token is valid", "user_id": user_id })))
}

/// POST /api/v1/auth/password-reset/reset
///
/// Set a new password for the account referenced by a valid reset token.
/// All existing sessions are revoked.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<PasswordResetBody>,
) -> AppResult<Json<serde_json::Value>> {
    let user_id = verify_reset_token(&state, &input.token)?;

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;

    // Force re-login everywhere with the new password.
    SessionRepo::revoke_all_for_user(&state.pool, user.id).await?;

    tracing::info!(user_id = user.id, "Password reset completed");
    Ok(Json(json!({ "message": "Password updated successfully" })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist a session row, and build the
/// response body shared by login, refresh, and the OAuth callbacks.
pub(crate) async fn create_auth_response(
    state: &AppState,
    user: &User,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, user.role(), &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = CreateSession {
        user_id: user.id,
        refresh_token_hash: refresh_hash,
        expires_at,
        user_agent: None,
        ip_address: None,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        token_type: "Bearer",
        expires_in,
        user: UserResponse::from(user.clone()),
    })
}

fn require_token(token: Option<&str>) -> Result<&str, AppError> {
    token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Token was not provided".into()))
}

/// Verify a password-reset token. Unlike email verification, an expired
/// token here is harmless: the caller simply requests a new link.
fn verify_reset_token(state: &AppState, token: &str) -> Result<DbId, AppError> {
    match state.token_signer.verify(PURPOSE_PASSWORD_RESET, token) {
        Ok(user_id) => Ok(user_id),
        Err(SignedTokenError::Expired { .. }) => Err(AppError::Core(CoreError::Validation(
            "Reset token expired. Request a new one.".into(),
        ))),
        Err(_) => Err(AppError::Core(CoreError::Validation(
            "Invalid reset token".into(),
        ))),
    }
}

fn refresh_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|header| cookie_value(header, REFRESH_COOKIE))
        .map(str::to_string)
}

async fn send_verification_email(state: &AppState, user: &User) -> AppResult<()> {
    let token = state.token_signer.sign(PURPOSE_VERIFY_EMAIL, user.id);
    let link = format!("{}/verify-email/?token={}", state.config.site_url, token);

    let message = EmailMessage::new(
        user.email.clone(),
        "이메일 인증 요청",
        format!("회원가입을 환영합니다. 아래 링크를 클릭하여 이메일 인증을 완료해주세요.\n{link}"),
    );
    state
        .mailer
        .send(&message)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to send verification email: {e}")))
}

async fn send_password_reset_email(state: &AppState, user: &User) -> AppResult<()> {
    let token = state.token_signer.sign(PURPOSE_PASSWORD_RESET, user.id);
    let link = format!(
        "{}/password-reset/check-token?token={}",
        state.config.site_url, token
    );

    let message = EmailMessage::new(
        user.email.clone(),
        "비밀번호 재설정 요청",
        format!("비밀번호를 재설정하려면 다음 링크를 클릭하세요:\n{link}"),
    );
    state
        .mailer
        .send(&message)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to send password reset email: {e}")))
}

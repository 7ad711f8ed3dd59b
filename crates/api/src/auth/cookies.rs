//! `Set-Cookie` helpers for the `access` and `refresh` auth cookies.
//!
//! Login, refresh, and the OAuth callbacks install both cookies alongside the
//! JSON token payload so browser clients work without storing tokens in JS.
//! Logout expires them.

use axum::http::header::SET_COOKIE;
use axum::http::HeaderName;
use axum::response::AppendHeaders;

use crate::auth::jwt::JwtConfig;

/// Cookie carrying the JWT access token.
pub const ACCESS_COOKIE: &str = "access";

/// Cookie carrying the opaque refresh token.
pub const REFRESH_COOKIE: &str = "refresh";

fn build_cookie(name: &str, value: &str, max_age_secs: i64) -> String {
    format!("{name}={value}; Path=/; Max-Age={max_age_secs}; HttpOnly; Secure; SameSite=Lax")
}

/// Response headers installing both auth cookies, with lifetimes matching the
/// corresponding token expiries.
pub fn auth_cookies(
    access_token: &str,
    refresh_token: &str,
    jwt: &JwtConfig,
) -> AppendHeaders<[(HeaderName, String); 2]> {
    let access_max_age = jwt.access_token_expiry_mins * 60;
    let refresh_max_age = jwt.refresh_token_expiry_days * 24 * 60 * 60;

    AppendHeaders([
        (
            SET_COOKIE,
            build_cookie(ACCESS_COOKIE, access_token, access_max_age),
        ),
        (
            SET_COOKIE,
            build_cookie(REFRESH_COOKIE, refresh_token, refresh_max_age),
        ),
    ])
}

/// Response headers expiring both auth cookies immediately.
pub fn clear_auth_cookies() -> AppendHeaders<[(HeaderName, String); 2]> {
    AppendHeaders([
        (SET_COOKIE, build_cookie(ACCESS_COOKIE, "", 0)),
        (SET_COOKIE, build_cookie(REFRESH_COOKIE, "", 0)),
    ])
}

/// Extract a cookie value from a `Cookie` request header string.
///
/// Used by the auth extractor to fall back to the `access` cookie when no
/// `Authorization` header is present.
pub fn cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k == name).then_some(v)
    })
}

//! # Session Middleware
//!
//! Runs on every request. It reads the session token from the
//! `access_token` cookie, verifies it, and attaches an [`AuthSession`]
//! extension that handlers can inspect. It never rejects a request:
//! a missing or invalid token just means the request proceeds anonymously.
//!
//! ## Sliding sessions
//! When a verified token has fewer than 3.5 days of lifetime left, the
//! middleware looks the user up and overwrites the cookie with a fresh
//! 7-day token. This keeps active users logged in without re-authenticating.
//! The refresh is best-effort: if the user row has disappeared or issuing
//! fails, the request keeps its still-valid original token and continues.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;

use crate::db::users;
use crate::error::AppError;
use crate::state::AppState;
use crate::token::{needs_refresh, AuthSession, Claims, Identity, TOKEN_LIFETIME_DAYS};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "access_token";

/// Build the session cookie for a freshly issued token
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::days(TOKEN_LIFETIME_DAYS))
        .build()
}

/// A cookie that clears the session on the client
///
/// Logout is client-side only: the token itself stays cryptographically
/// valid until its natural expiry.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

/// Attach the caller's session and rotate near-expiry tokens
///
/// Steps, none of which halt the request:
/// 1. No cookie: proceed anonymously
/// 2. Verification failure: proceed anonymously (fail-open)
/// 3. Success: insert `AuthSession::Authenticated` with the *decoded*
///    claims into the request extensions
/// 4. Under 3.5 days remaining: reissue and overwrite the cookie, unless
///    the handler wrote the session cookie itself (login, logout)
pub async fn sliding_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> (CookieJar, Response) {
    let session = match jar.get(SESSION_COOKIE) {
        Some(cookie) => state.tokens.verify(cookie.value()),
        None => AuthSession::Anonymous,
    };

    // Verification and the refresh decision are separate steps: the
    // identity attached below always comes from the original token even
    // when a fresh one is being issued.
    let refreshed = match &session {
        AuthSession::Authenticated(claims) if needs_refresh(claims, Utc::now().timestamp()) => {
            reissue(&state, claims).await
        }
        _ => None,
    };

    request.extensions_mut().insert(session);

    let response = next.run(request).await;

    // The handler wins any cookie conflict: login and logout write the
    // session cookie themselves, and a refresh must not resurrect a
    // session that logout just cleared.
    let jar = match refreshed {
        Some(token) if !sets_session_cookie(&response) => jar.add(session_cookie(token)),
        _ => jar,
    };

    (jar, response)
}

/// Whether the handler's response already carries its own session cookie
fn sets_session_cookie(response: &Response) -> bool {
    response
        .headers()
        .get_all(axum::http::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| {
            v.strip_prefix(SESSION_COOKIE)
                .is_some_and(|rest| rest.starts_with('='))
        })
}

/// Best-effort token reissue during the sliding refresh
///
/// Returns None on any failure so the middleware keeps serving the
/// original token instead of breaking the request.
async fn reissue(state: &AppState, claims: &Claims) -> Option<String> {
    let user = match users::find_by_id(&state.db, &claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            // User deleted since the token was issued; skip the refresh
            // and let the token age out naturally
            tracing::debug!("skipping token refresh: user {} no longer exists", claims.sub);
            return None;
        }
        Err(e) => {
            tracing::error!("token refresh lookup failed: {:?}", e);
            return None;
        }
    };

    match state.tokens.issue(&user) {
        Ok(token) => {
            tracing::debug!("refreshed session token for {}", user.username);
            Some(token)
        }
        Err(e) => {
            tracing::error!("token refresh signing failed: {:?}", e);
            None
        }
    }
}

/// Extractor for handlers that require a logged-in caller
///
/// Pulls the identity out of the `AuthSession` extension set by
/// [`sliding_session`]; anonymous requests get a 401 before the handler
/// body runs.
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthSession>() {
            Some(AuthSession::Authenticated(claims)) => Ok(claims.identity()),
            _ => Err(AppError::Unauthorized),
        }
    }
}

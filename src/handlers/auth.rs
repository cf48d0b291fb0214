use crate::db::users;
use crate::error::{AppError, AppResult};
use crate::middleware::session::{clear_session_cookie, session_cookie};
use crate::state::AppState;
use crate::token::{AuthSession, Identity};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

/// Request body for register and login
///
/// Both fields are optional so that a missing field reaches the handler
/// (register answers 400, login answers 401) instead of being rejected
/// by the JSON extractor.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

// Username rule: 3-20 ASCII alphanumerics ([A-Za-z0-9]{3,20})
fn valid_username(username: &str) -> bool {
    (3..=20).contains(&username.len()) && username.chars().all(|c| c.is_ascii_alphanumeric())
}

/// POST /api/auth/register
///
/// Creates an account and logs it in: 200 with the serialized user (hash
/// excluded) and a session cookie, 400 on invalid input, 409 if the
/// username is taken.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<Credentials>,
) -> AppResult<impl IntoResponse> {
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    if !valid_username(&username) {
        return Err(AppError::Validation(
            "username must be 3-20 alphanumeric characters".to_string(),
        ));
    }
    if password.is_empty() {
        return Err(AppError::Validation("password is required".to_string()));
    }

    // Friendly duplicate check; the UNIQUE constraint is the real guard
    // against the race between two concurrent registrations
    if users::find_by_username(&state.db, &username).await?.is_some() {
        return Err(AppError::Conflict);
    }

    let password_hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST)?;
    let user = users::create_user(&state.db, &username, &password_hash).await?;
    tracing::debug!("registered user {}", user.username);

    let token = state.tokens.issue(&user)?;
    Ok((jar.add(session_cookie(token)), Json(user)))
}

/// POST /api/auth/login
///
/// 200 with the serialized user and a session cookie on success. Missing
/// fields, unknown username and wrong password all produce the same bare
/// 401, leaking nothing about which part was wrong.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<Credentials>,
) -> AppResult<impl IntoResponse> {
    let (username, password) = match (req.username, req.password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => return Err(AppError::Unauthorized),
    };

    let user = users::find_by_username(&state.db, &username)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !bcrypt::verify(&password, &user.password_hash)? {
        tracing::debug!("failed login attempt for {}", username);
        return Err(AppError::Unauthorized);
    }

    let token = state.tokens.issue(&user)?;
    tracing::debug!("user {} logged in", user.username);
    Ok((jar.add(session_cookie(token)), Json(user)))
}

/// GET /api/auth/check
///
/// Returns the identity the session middleware attached, 401 if the
/// request is anonymous.
pub async fn check(Extension(session): Extension<AuthSession>) -> AppResult<Json<Identity>> {
    match session {
        AuthSession::Authenticated(claims) => Ok(Json(claims.identity())),
        AuthSession::Anonymous => Err(AppError::Unauthorized),
    }
}

/// POST /api/auth/logout
///
/// Clears the cookie and answers 204. The token itself is not revoked;
/// it simply ages out.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.add(clear_session_cookie()), StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rule() {
        assert!(valid_username("abc"));
        assert!(valid_username("Alice99"));
        assert!(valid_username("a".repeat(20).as_str()));

        assert!(!valid_username(""));
        assert!(!valid_username("ab"));
        assert!(!valid_username("a".repeat(21).as_str()));
        assert!(!valid_username("has space"));
        assert!(!valid_username("under_score"));
        assert!(!valid_username("héllo"));
    }
}

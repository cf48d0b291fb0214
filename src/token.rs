//! # Token Service
//!
//! Issues and verifies the signed, time-limited identity tokens that back
//! the session cookie.
//!
//! ## Key Concepts
//! - **Claims**: the payload embedded in each token: user id (`sub`),
//!   username, issued-at and expiry timestamps (unix seconds)
//! - **Sliding session**: tokens live for 7 days; once fewer than 3.5 days
//!   remain, the session middleware reissues a fresh one
//! - **Fail-open verification**: any verification failure (expired,
//!   malformed, bad signature) folds into `AuthSession::Anonymous`, so a
//!   bad token degrades to "not logged in" instead of an error response

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::db::models::User;

/// How long a freshly issued token stays valid
pub const TOKEN_LIFETIME_DAYS: i64 = 7;

/// Remaining lifetime below which the middleware reissues a token (3.5 days)
const REFRESH_THRESHOLD_SECS: i64 = 60 * 60 * 84;

/// Payload carried inside each session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's id
    pub sub: String,
    /// Username at issuance time
    pub username: String,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds), `iat` + 7 days
    pub exp: i64,
}

impl Claims {
    /// The identity these claims prove, as exposed to handlers
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.sub.clone(),
            username: self.username.clone(),
        }
    }
}

/// The authenticated identity attached to a request
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
}

/// Outcome of verifying a session token
///
/// An explicit two-state type rather than a `Result`: callers match on it
/// and cannot accidentally treat a swallowed verification error as a
/// logged-in user.
#[derive(Debug, Clone)]
pub enum AuthSession {
    /// Token verified; the decoded claims identify the user
    Authenticated(Claims),
    /// No token, or a token that failed verification
    Anonymous,
}

/// Issues and verifies session tokens with a shared secret
///
/// The encoding/decoding keys are derived once from the secret at startup
/// and shared across requests via `AppState`.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Produce a signed token for `user`, expiring 7 days from now
    ///
    /// No side effects beyond signing; tokens are never persisted.
    pub fn issue(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: (now + chrono::Duration::days(TOKEN_LIFETIME_DAYS)).timestamp(),
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
    }

    /// Validate signature and expiry, folding every failure mode into
    /// `Anonymous`
    ///
    /// Callers get no signal about *why* a token was rejected.
    pub fn verify(&self, token: &str) -> AuthSession {
        match jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default()) {
            Ok(data) => AuthSession::Authenticated(data.claims),
            Err(_) => AuthSession::Anonymous,
        }
    }
}

/// Refresh policy: true when fewer than 3.5 days of lifetime remain
///
/// Pure function of the claims and the clock, so the policy is testable
/// without the middleware or a running service.
pub fn needs_refresh(claims: &Claims, now: i64) -> bool {
    claims.exp - now < REFRESH_THRESHOLD_SECS
}

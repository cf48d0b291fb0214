//! # Blog Auth Server
//!
//! A minimal blog backend: user registration/login with bcrypt-hashed
//! passwords and cookie-based JWTs, a sliding-session middleware that
//! rotates near-expiry tokens, and a data model for posts.
//!
//! The router is built here (rather than in `main`) so integration tests
//! can drive the full middleware + handler stack in-process.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod token;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::auth;
use crate::handlers::health::health_check;
use crate::handlers::posts;
use crate::middleware::session::sliding_session;
use crate::state::AppState;

/// Build the application router
///
/// Every route sits behind the session middleware, which attaches an
/// `AuthSession` extension and handles the sliding token refresh. The
/// middleware never rejects; routes that need a logged-in caller use the
/// `Identity` extractor or check the extension themselves.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/check", get(auth::check))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/posts", get(posts::list_posts).post(posts::create_post))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            sliding_session,
        ))
        .with_state(state)
}

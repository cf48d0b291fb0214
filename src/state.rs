//! # Application State
//!
//! This module defines the shared state that's accessible to all request handlers.
//! In Axum, state is how you share resources (database connections, the token
//! service) across different parts of your application.
//!
//! ## The State Pattern
//! Instead of creating new database connections for each request, we:
//! 1. Create a connection pool once at startup
//! 2. Store it in AppState
//! 3. Axum clones the state for each request (cheap: the pool is already
//!    clone-able and the token service sits behind an Arc)

use crate::config::Config;
use crate::token::TokenService;
use anyhow::Result;
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// The pool maintains multiple reusable SQLite connections and
    /// manages their lifecycle itself.
    pub db: SqlitePool,

    /// Token service for issuing and verifying session tokens
    ///
    /// Holds the pre-built signing keys, so wrapped in Arc rather than
    /// re-deriving them per request.
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Initialize application state
    ///
    /// Connects to the database, runs migrations (the `sqlx::migrate!`
    /// macro embeds everything under ./migrations at compile time) and
    /// builds the token service from the configured secret.
    ///
    /// # Errors
    /// Returns an error if the database connection or migrations fail.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = SqlitePool::connect(&config.database_url).await?;
        sqlx::migrate!("./migrations").run(&db).await?;

        let tokens = Arc::new(TokenService::new(config.jwt_secret.as_bytes()));

        Ok(AppState { db, tokens })
    }
}

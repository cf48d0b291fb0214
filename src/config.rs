//! # Configuration Management
//!
//! This module handles loading configuration from environment variables.
//! It uses the "12-factor app" methodology where configuration comes from the environment.
//!
//! ## Environment Variables
//! - `HOST`: Server bind address (default: 127.0.0.1)
//! - `PORT`: Server port (default: 8080)
//! - `DATABASE_URL`: SQLite database connection string
//! - `JWT_SECRET`: Secret key used to sign and verify session tokens (required)

use anyhow::{Context, Result};
use std::env;

/// Application configuration
///
/// All fields are public for easy access from other modules.
/// Everything except the signing secret has a development default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host/IP address to bind to
    /// Examples: "127.0.0.1" (localhost only), "0.0.0.0" (all interfaces)
    pub host: String,

    /// Server port number (1-65535)
    pub port: u16,

    /// SQLite database connection URL
    /// The "mode=rwc" parameter means: read, write, create if not exists
    pub database_url: String,

    /// Secret key for signing session tokens
    ///
    /// Anyone who knows this key can mint valid tokens, so it is never
    /// given a default; the server refuses to start without it.
    pub jwt_secret: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Loads variables from a .env file first (if present) using dotenvy,
    /// then reads each value from the environment, falling back to
    /// defaults where one exists.
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (dotenvy doesn't error if file missing)
        dotenvy::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),

            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,

            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:blog.db?mode=rwc".to_string()),

            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
        })
    }

    /// Get the socket address to bind the server to
    ///
    /// Combines host and port into a format suitable for
    /// `tokio::net::TcpListener::bind()`. Example: "127.0.0.1:8080"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

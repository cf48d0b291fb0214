//! # Error Handling
//!
//! This module defines the application error type and converts it into
//! HTTP responses.
//!
//! ## Taxonomy
//! - `Validation` → 400 with a JSON error body
//! - `Unauthorized` → 401, status only
//! - `Conflict` → 409, status only
//! - everything else (store, hashing, signing) → 500 with a generic body
//!
//! 401 and 409 carry no body: a failed login must look the same whether
//! the username or the password was wrong.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-wide error type
///
/// The `#[from]` conversions let handlers use the `?` operator on sqlx,
/// bcrypt and jsonwebtoken results directly.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database errors (SQLx library errors)
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing/verification errors
    #[error("password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// Token signing errors
    ///
    /// Only issuance failures end up here. Token *verification* failures
    /// never become errors at all: the session middleware folds them
    /// into an anonymous session instead.
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Malformed client input (400)
    #[error("validation failed: {0}")]
    Validation(String),

    /// Missing or invalid credentials/session (401)
    #[error("unauthorized")]
    Unauthorized,

    /// Duplicate resource, e.g. an already-taken username (409)
    #[error("conflict")]
    Conflict,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Database(e) => {
                // Log details server-side, return a generic message
                tracing::error!("Database error: {:?}", e);
                internal_error()
            }
            AppError::Hash(e) => {
                tracing::error!("Password hashing error: {:?}", e);
                internal_error()
            }
            AppError::Token(e) => {
                tracing::error!("Token signing error: {:?}", e);
                internal_error()
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            // Status only, no body
            AppError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            AppError::Conflict => StatusCode::CONFLICT.into_response(),
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal server error" })),
    )
        .into_response()
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

//! # Database Models
//!
//! This module defines the data structures that map to database tables.
//! These structs represent rows in the database and include serialization
//! for JSON API responses.
//!
//! ## Why Strings for dates?
//! SQLite stores timestamps as text (RFC3339 format), and RFC3339 strings
//! sort chronologically, which is all the queries here need.

use crate::token::Identity;
use chrono::Utc;
use serde::Serialize;
use sqlx::types::Json;
use uuid::Uuid;

/// User account information
///
/// ## Serialization
/// `password_hash` is marked `skip_serializing`: a `User` can be returned
/// straight from a handler and the hash can never appear in a response.
/// The plaintext password is never stored at all.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique identifier (UUID v4)
    pub id: String,

    /// Unique username, 3-20 ASCII alphanumerics
    pub username: String,

    /// bcrypt hash of the user's password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the account was created (RFC3339 timestamp)
    pub created_at: String,

    /// When the account was last updated (RFC3339 timestamp)
    pub updated_at: String,
}

impl User {
    /// Create a new user with a generated ID and timestamps
    ///
    /// Takes the already-derived password hash; hashing happens in the
    /// register handler so this constructor stays synchronous.
    pub fn new(username: String, password_hash: String) -> Self {
        let now = Utc::now().to_rfc3339();

        Self {
            id: Uuid::new_v4().to_string(),
            username,
            password_hash,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// A blog post
///
/// The author fields are a denormalized snapshot taken at creation time:
/// if the user later changes their username, existing posts keep the old
/// one. Tags are an ordered list, stored as a JSON array in a TEXT column.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Post {
    /// Unique identifier (UUID v4)
    pub id: String,

    pub title: String,

    pub body: String,

    /// Ordered tag list, serialized as a JSON array in SQLite
    pub tags: Json<Vec<String>>,

    /// Publication timestamp (RFC3339), defaults to creation time
    pub published_at: String,

    /// Author snapshot: user id at creation time
    pub user_id: String,

    /// Author snapshot: username at creation time
    pub username: String,
}

impl Post {
    /// Create a new post authored by `author`, published now
    pub fn new(title: String, body: String, tags: Vec<String>, author: &Identity) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            body,
            tags: Json(tags),
            published_at: Utc::now().to_rfc3339(),
            user_id: author.id.clone(),
            username: author.username.clone(),
        }
    }
}

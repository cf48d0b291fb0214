//! # HTTP Request Handlers
//!
//! This module contains all the HTTP route handlers (controllers).
//!
//! ## Submodules
//! - `health`: Health check endpoint (for monitoring)
//! - `auth`: Authentication endpoints (register, login, check, logout)
//! - `posts`: Blog post endpoints (create, list)
//!
//! ## Handler Pattern
//! Handlers are async functions that:
//! 1. Extract data from the request (state, cookies, JSON body, identity)
//! 2. Call business logic (database operations, token operations)
//! 3. Return a response, or an `AppError` that maps to a status code

pub mod auth;
pub mod health;
pub mod posts;

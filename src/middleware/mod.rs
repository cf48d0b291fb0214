//! # Middleware Module
//!
//! Middleware intercepts HTTP requests before they reach the route handlers.
//!
//! ## Our Middleware
//! - `session`: decodes the session cookie, attaches the caller's identity
//!   to the request, and transparently rotates near-expiry tokens

pub mod session;

//! # Health Check Handler
//!
//! Simple endpoint to check if the server is running.
//! Used by load balancers and monitoring systems.

use axum::Json;
use serde_json::{json, Value};

/// Health check endpoint
///
/// Always answers 200 with a small JSON body; this handler never fails,
/// so it returns `Json<Value>` directly instead of `AppResult`.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "blog-auth-server"
    }))
}

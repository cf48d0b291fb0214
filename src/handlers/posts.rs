use crate::db::models::Post;
use crate::db::posts;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::token::Identity;
use axum::{extract::State, Json};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// POST /api/posts
///
/// Requires a logged-in caller (the `Identity` extractor rejects
/// anonymous requests with 401). The created post snapshots the author's
/// id and username as they are right now.
pub async fn create_post(
    State(state): State<AppState>,
    author: Identity,
    Json(req): Json<CreatePostRequest>,
) -> AppResult<Json<Post>> {
    if req.title.trim().is_empty() || req.body.trim().is_empty() {
        return Err(AppError::Validation("title and body are required".to_string()));
    }

    let post = posts::create_post(&state.db, &req.title, &req.body, req.tags, &author).await?;
    Ok(Json(post))
}

/// GET /api/posts
///
/// Lists all posts, newest first. Open to anonymous callers.
pub async fn list_posts(State(state): State<AppState>) -> AppResult<Json<Vec<Post>>> {
    Ok(Json(posts::list_recent(&state.db).await?))
}

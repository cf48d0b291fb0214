use crate::db::models::Post;
use crate::error::AppResult;
use crate::token::Identity;
use sqlx::SqlitePool;

pub async fn create_post(
    pool: &SqlitePool,
    title: &str,
    body: &str,
    tags: Vec<String>,
    author: &Identity,
) -> AppResult<Post> {
    let post = Post::new(title.to_string(), body.to_string(), tags, author);

    sqlx::query(
        "INSERT INTO posts (id, title, body, tags, published_at, user_id, username)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&post.id)
    .bind(&post.title)
    .bind(&post.body)
    .bind(&post.tags)
    .bind(&post.published_at)
    .bind(&post.user_id)
    .bind(&post.username)
    .execute(pool)
    .await?;

    Ok(post)
}

pub async fn list_recent(pool: &SqlitePool) -> AppResult<Vec<Post>> {
    // RFC3339 strings sort chronologically, so ORDER BY on the text
    // column gives newest-first
    let posts = sqlx::query_as::<_, Post>("SELECT * FROM posts ORDER BY published_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(posts)
}

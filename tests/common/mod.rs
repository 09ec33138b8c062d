//! Shared helper functions for integration tests.

use chrono::{DateTime, Utc};
use feed_core::store::EventStore;
use sqlx::PgPool;
use uuid::Uuid;

#[allow(dead_code)]
pub async fn create_user(store: &EventStore, username: &str) -> Uuid {
    store
        .create_user(username)
        .await
        .expect("failed to create test user")
        .id
}

#[allow(dead_code)]
pub async fn create_post(store: &EventStore, author_id: Uuid, content: &str) -> Uuid {
    store
        .create_post(author_id, content)
        .await
        .expect("failed to create test post")
        .id
}

#[allow(dead_code)]
pub async fn create_comment(
    store: &EventStore,
    post_id: Uuid,
    author_id: Uuid,
    parent_id: Option<Uuid>,
    content: &str,
) -> Uuid {
    store
        .create_comment(post_id, author_id, parent_id, content)
        .await
        .expect("failed to create test comment")
        .id
}

/// Pin a comment's creation time so sibling-order assertions don't depend
/// on sub-microsecond timestamp ties.
#[allow(dead_code)]
pub async fn set_comment_created_at(pool: &PgPool, comment_id: Uuid, at: DateTime<Utc>) {
    sqlx::query("UPDATE comments SET created_at = $1 WHERE id = $2")
        .bind(at)
        .bind(comment_id)
        .execute(pool)
        .await
        .expect("failed to backdate comment");
}

/// Insert a post-like with an explicit timestamp, bypassing the registrar,
/// for window-boundary tests.
#[allow(dead_code)]
pub async fn like_post_at(pool: &PgPool, user_id: Uuid, post_id: Uuid, at: DateTime<Utc>) {
    sqlx::query("INSERT INTO post_likes (user_id, post_id, created_at) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(post_id)
        .bind(at)
        .execute(pool)
        .await
        .expect("failed to insert backdated post like");
}

/// Insert a comment-like with an explicit timestamp.
#[allow(dead_code)]
pub async fn like_comment_at(pool: &PgPool, user_id: Uuid, comment_id: Uuid, at: DateTime<Utc>) {
    sqlx::query("INSERT INTO comment_likes (user_id, comment_id, created_at) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(comment_id)
        .bind(at)
        .execute(pool)
        .await
        .expect("failed to insert backdated comment like");
}

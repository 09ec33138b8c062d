//! Demo-data seeder: a couple of users, a post with a nested comment
//! thread, and some likes.
//!
//! Idempotent - users are upserted with `ON CONFLICT DO NOTHING` and
//! everything else is looked up before being created, so the seeder can be
//! run repeatedly against the same database.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{FeedError, FeedResult};
use crate::likes::{register_like, LikeTarget};
use crate::store::EventStore;

async fn ensure_user(pool: &PgPool, username: &str) -> FeedResult<Uuid> {
    sqlx::query("INSERT INTO users (username) VALUES ($1) ON CONFLICT (username) DO NOTHING")
        .bind(username)
        .execute(pool)
        .await?;
    let id: Uuid = sqlx::query_scalar("SELECT id FROM users WHERE username = $1")
        .bind(username)
        .fetch_one(pool)
        .await?;
    Ok(id)
}

async fn ensure_post(store: &EventStore, author_id: Uuid, content: &str) -> FeedResult<Uuid> {
    let existing: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM posts WHERE author_id = $1 AND content = $2")
            .bind(author_id)
            .bind(content)
            .fetch_optional(store.pool())
            .await?;
    match existing {
        Some(id) => Ok(id),
        None => Ok(store.create_post(author_id, content).await?.id),
    }
}

async fn ensure_comment(
    store: &EventStore,
    post_id: Uuid,
    author_id: Uuid,
    parent_id: Option<Uuid>,
    content: &str,
) -> FeedResult<Uuid> {
    let existing: Option<Uuid> = sqlx::query_scalar(
        "SELECT id FROM comments WHERE post_id = $1 AND author_id = $2 AND content = $3",
    )
    .bind(post_id)
    .bind(author_id)
    .bind(content)
    .fetch_optional(store.pool())
    .await?;
    match existing {
        Some(id) => Ok(id),
        None => Ok(store
            .create_comment(post_id, author_id, parent_id, content)
            .await?
            .id),
    }
}

async fn ensure_like(store: &EventStore, user_id: Uuid, target: LikeTarget) -> FeedResult<()> {
    match register_like(store, user_id, target).await {
        Ok(_) => Ok(()),
        Err(FeedError::AlreadyLiked) => Ok(()),
        Err(err) => Err(err),
    }
}

/// Seed the database with a small, recognizable discussion.
pub async fn seed_database(pool: &PgPool) -> FeedResult<()> {
    let store = EventStore::new(pool.clone());

    log::info!("seeding users");
    let alice = ensure_user(pool, "alice").await?;
    let bob = ensure_user(pool, "bob").await?;
    let carol = ensure_user(pool, "carol").await?;

    log::info!("seeding posts and comments");
    let post = ensure_post(&store, alice, "Welcome to the feed!").await?;
    let root = ensure_comment(&store, post, bob, None, "First!").await?;
    let reply = ensure_comment(&store, post, carol, Some(root), "Second, technically.").await?;
    ensure_comment(&store, post, bob, Some(reply), "Fair enough.").await?;

    log::info!("seeding likes");
    ensure_like(&store, bob, LikeTarget::Post(post)).await?;
    ensure_like(&store, carol, LikeTarget::Post(post)).await?;
    ensure_like(&store, alice, LikeTarget::Comment(root)).await?;

    log::info!("seeding complete");
    Ok(())
}

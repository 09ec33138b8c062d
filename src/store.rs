//! Event Store: the only component that touches SQL.
//!
//! Wraps a `PgPool` and exposes the narrow contracts the rest of the crate
//! is built on: constraint-enforcing inserts, the single bulk comment read,
//! and the windowed like-event scan. Every read here is one round trip.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{FeedError, FeedResult};
use crate::models::{Comment, CommentLike, CommentRow, LikeEventRow, Post, PostLike, User};

/// Unique constraint guarding (user, post) like pairs.
pub const POST_LIKE_CONSTRAINT: &str = "post_likes_user_post_key";
/// Unique constraint guarding (user, comment) like pairs.
pub const COMMENT_LIKE_CONSTRAINT: &str = "comment_likes_user_comment_key";

/// Database operations for the feed engine.
#[derive(Clone)]
pub struct EventStore {
    pool: PgPool,
}

impl EventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a user with a unique handle.
    pub async fn create_user(&self, username: &str) -> FeedResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username)
            VALUES ($1)
            RETURNING id, username, created_at
            "#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Create a post. Id and `created_at` are server-assigned.
    pub async fn create_post(&self, author_id: Uuid, content: &str) -> FeedResult<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (author_id, content)
            VALUES ($1, $2)
            RETURNING id, author_id, content, created_at
            "#,
        )
        .bind(author_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    /// Create a comment, optionally as a reply to `parent_id`.
    ///
    /// The guarded insert only produces a row when the parent is NULL or is
    /// a comment on the same post, so cross-post parenting is rejected at
    /// the storage layer rather than in application logic.
    pub async fn create_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        parent_id: Option<Uuid>,
        content: &str,
    ) -> FeedResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (post_id, author_id, parent_id, content)
            SELECT $1::uuid, $2::uuid, $3::uuid, $4::text
            WHERE $3::uuid IS NULL
               OR EXISTS (
                    SELECT 1 FROM comments parent
                    WHERE parent.id = $3 AND parent.post_id = $1
               )
            RETURNING id, post_id, author_id, parent_id, content, created_at
            "#,
        )
        .bind(post_id)
        .bind(author_id)
        .bind(parent_id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;

        comment.ok_or_else(|| FeedError::ConstraintViolation {
            constraint: None,
            message: format!(
                "parent comment {:?} does not exist on post {}",
                parent_id, post_id
            ),
        })
    }

    /// Record a (user, post) like with a single atomic insert inside a
    /// minimal transaction. No existence pre-check: the unique constraint
    /// decides the winner under concurrent duplicate attempts.
    pub async fn insert_post_like(&self, user_id: Uuid, post_id: Uuid) -> FeedResult<PostLike> {
        let mut tx = self.pool.begin().await?;

        let like = sqlx::query_as::<_, PostLike>(
            r#"
            INSERT INTO post_likes (user_id, post_id)
            VALUES ($1, $2)
            RETURNING id, user_id, post_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(like)
    }

    /// Record a (user, comment) like. Same contract as [`insert_post_like`].
    ///
    /// [`insert_post_like`]: EventStore::insert_post_like
    pub async fn insert_comment_like(
        &self,
        user_id: Uuid,
        comment_id: Uuid,
    ) -> FeedResult<CommentLike> {
        let mut tx = self.pool.begin().await?;

        let like = sqlx::query_as::<_, CommentLike>(
            r#"
            INSERT INTO comment_likes (user_id, comment_id)
            VALUES ($1, $2)
            RETURNING id, user_id, comment_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(comment_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(like)
    }

    /// Fetch every comment on a post in one query, each row carrying its
    /// author summary and like count. Ordered by creation time ascending
    /// (id as tie-break), which is the sibling order the tree assembler
    /// preserves.
    pub async fn comments_for_post(&self, post_id: Uuid) -> FeedResult<Vec<CommentRow>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                c.id,
                c.parent_id,
                c.author_id,
                u.username AS author_username,
                c.content,
                c.created_at,
                COUNT(cl.id) AS like_count
            FROM comments c
            JOIN users u ON u.id = c.author_id
            LEFT JOIN comment_likes cl ON cl.comment_id = c.id
            WHERE c.post_id = $1
            GROUP BY c.id, u.id
            ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        log::debug!(
            "fetched {} comment rows for post {}",
            rows.len(),
            post_id
        );
        Ok(rows)
    }

    /// Scan both like streams for events created within `[since, until]`,
    /// each annotated with the liked content's author.
    ///
    /// The two streams are concatenated with UNION ALL before any grouping
    /// happens. Joining a user to both streams at once would multiply rows
    /// (P post-likes x C comment-likes) and inflate karma; UNION without
    /// ALL would collapse distinct events.
    pub async fn recent_like_events(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> FeedResult<Vec<LikeEventRow>> {
        let rows = sqlx::query_as::<_, LikeEventRow>(
            r#"
            SELECT t.author_id, u.username AS author_username, t.kind, t.created_at
            FROM (
                SELECT p.author_id AS author_id, 'post'::text AS kind, pl.created_at AS created_at
                FROM post_likes pl
                JOIN posts p ON p.id = pl.post_id
                UNION ALL
                SELECT c.author_id, 'comment'::text, cl.created_at
                FROM comment_likes cl
                JOIN comments c ON c.id = cl.comment_id
            ) t
            JOIN users u ON u.id = t.author_id
            WHERE t.created_at >= $1 AND t.created_at <= $2
            ORDER BY t.created_at ASC
            "#,
        )
        .bind(since)
        .bind(until)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user. Karma is never stored here; it is always derived
/// from the like-event streams at read time.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// A top-level post in the feed.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A comment on a post. `parent_id` is `None` for root comments and
/// otherwise points at another comment on the same post.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A (user, post) like pair. At most one per pair, enforced by the
/// `post_likes_user_post_key` unique constraint.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PostLike {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A (user, comment) like pair. At most one per pair, enforced by the
/// `comment_likes_user_comment_key` unique constraint.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CommentLike {
    pub id: Uuid,
    pub user_id: Uuid,
    pub comment_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Denormalized author identity embedded in read models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: Uuid,
    pub username: String,
}

/// One row of the bulk comment read: the comment, its author summary and
/// its like count, all carried by a single query.
#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub author_id: Uuid,
    pub author_username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub like_count: i64,
}

/// Discriminator for the two like-event streams.
pub const LIKE_KIND_POST: &str = "post";
pub const LIKE_KIND_COMMENT: &str = "comment";

/// One like event from the concatenated window scan, attributed to the
/// liked content's author. Rows are never deduplicated; every qualifying
/// like appears exactly once.
#[derive(Debug, Clone, FromRow)]
pub struct LikeEventRow {
    /// Author of the liked post or comment (the user the karma goes to).
    pub author_id: Uuid,
    pub author_username: String,
    /// Either [`LIKE_KIND_POST`] or [`LIKE_KIND_COMMENT`].
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

//! Like Registrar: exactly-once like recording per (user, target).
//!
//! There is deliberately no check-then-insert here. Concurrent duplicate
//! attempts race at the storage layer and the unique constraint admits a
//! single winner; the loser's insert fails and is mapped to
//! [`FeedError::AlreadyLiked`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FeedError, FeedResult};
use crate::store::{EventStore, COMMENT_LIKE_CONSTRAINT, POST_LIKE_CONSTRAINT};

/// Karma weight of a like on a post.
pub const POST_LIKE_WEIGHT: i64 = 5;
/// Karma weight of a like on a comment.
pub const COMMENT_LIKE_WEIGHT: i64 = 1;

/// What a like is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum LikeTarget {
    Post(Uuid),
    Comment(Uuid),
}

impl LikeTarget {
    pub fn id(&self) -> Uuid {
        match self {
            LikeTarget::Post(id) | LikeTarget::Comment(id) => *id,
        }
    }

    /// Karma weight this like contributes to the target's author.
    pub fn weight(&self) -> i64 {
        match self {
            LikeTarget::Post(_) => POST_LIKE_WEIGHT,
            LikeTarget::Comment(_) => COMMENT_LIKE_WEIGHT,
        }
    }
}

/// A successfully recorded like. `weight` is what the caller adds to the
/// target's displayed like count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target: LikeTarget,
    pub created_at: DateTime<Utc>,
    pub weight: i64,
}

/// Record a like exactly once per (user, target).
///
/// On a duplicate attempt the unique-constraint rejection comes back as
/// `AlreadyLiked` - an expected outcome callers must not retry. Referential
/// breaches (liking a nonexistent target) and storage faults keep their own
/// error kinds and stay distinguishable.
pub async fn register_like(
    store: &EventStore,
    user_id: Uuid,
    target: LikeTarget,
) -> FeedResult<LikeRecord> {
    let result = match target {
        LikeTarget::Post(post_id) => store
            .insert_post_like(user_id, post_id)
            .await
            .map(|like| LikeRecord {
                id: like.id,
                user_id: like.user_id,
                target,
                created_at: like.created_at,
                weight: POST_LIKE_WEIGHT,
            }),
        LikeTarget::Comment(comment_id) => store
            .insert_comment_like(user_id, comment_id)
            .await
            .map(|like| LikeRecord {
                id: like.id,
                user_id: like.user_id,
                target,
                created_at: like.created_at,
                weight: COMMENT_LIKE_WEIGHT,
            }),
    };

    match result {
        Ok(record) => {
            log::debug!(
                "user {} liked {:?} (weight {})",
                user_id,
                target,
                record.weight
            );
            Ok(record)
        }
        Err(err)
            if err.violates_constraint(POST_LIKE_CONSTRAINT)
                || err.violates_constraint(COMMENT_LIKE_CONSTRAINT) =>
        {
            Err(FeedError::AlreadyLiked)
        }
        Err(err) => Err(err),
    }
}

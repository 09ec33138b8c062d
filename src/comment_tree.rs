//! Tree Assembler: flat comment rows in, nested forest out.
//!
//! One bulk read, then O(N) in-memory linking. No recursion anywhere, so
//! thread depth is bounded only by memory, not by stack size.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FeedError, FeedResult};
use crate::models::{AuthorSummary, CommentRow};
use crate::store::EventStore;

/// One comment with its nested replies, siblings ordered by creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentNode {
    pub id: Uuid,
    pub author: AuthorSummary,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub like_count: i64,
    pub children: Vec<CommentNode>,
}

impl CommentNode {
    fn from_row(row: CommentRow) -> Self {
        CommentNode {
            id: row.id,
            author: AuthorSummary {
                id: row.author_id,
                username: row.author_username,
            },
            content: row.content,
            created_at: row.created_at,
            like_count: row.like_count,
            children: Vec::new(),
        }
    }
}

/// Load the full comment forest for a post: exactly one storage round trip
/// regardless of comment count or nesting depth.
pub async fn comment_tree(store: &EventStore, post_id: Uuid) -> FeedResult<Vec<CommentNode>> {
    let rows = store.comments_for_post(post_id).await?;
    assemble(rows)
}

/// Link a flat, time-ordered set of comment rows into a forest.
///
/// A parent id that is absent from the set means the data is corrupt
/// (referential integrity guarantees every parent is fetched with its
/// post), so the row is never promoted to root; the whole assembly fails
/// with [`FeedError::Integrity`] instead.
pub fn assemble(rows: Vec<CommentRow>) -> FeedResult<Vec<CommentNode>> {
    // First pass: id -> node arena plus adjacency in fetch order. Fetch
    // order is creation order, so sibling sequences come out sorted without
    // a second sort.
    let mut nodes: HashMap<Uuid, CommentNode> = HashMap::with_capacity(rows.len());
    let mut children_of: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    let mut parents: Vec<(Uuid, Option<Uuid>)> = Vec::with_capacity(rows.len());

    for row in rows {
        parents.push((row.id, row.parent_id));
        nodes.insert(row.id, CommentNode::from_row(row));
    }

    let mut roots: Vec<Uuid> = Vec::new();
    for (id, parent_id) in parents {
        match parent_id {
            None => roots.push(id),
            Some(pid) => {
                if !nodes.contains_key(&pid) {
                    return Err(FeedError::Integrity(format!(
                        "comment {} references parent {} missing from its post",
                        id, pid
                    )));
                }
                children_of.entry(pid).or_default().push(id);
            }
        }
    }

    // Second pass: explicit-stack depth-first construction. Each stack
    // frame holds a partially built node and the ids of its not-yet-built
    // children; a node is attached to its parent only once its own subtree
    // is complete.
    let mut forest: Vec<CommentNode> = Vec::with_capacity(roots.len());
    for root_id in roots {
        let root = nodes
            .remove(&root_id)
            .ok_or_else(|| FeedError::Integrity(format!("duplicate comment id {}", root_id)))?;
        let root_children = children_of.remove(&root_id).unwrap_or_default();
        let mut stack: Vec<(CommentNode, std::vec::IntoIter<Uuid>)> =
            vec![(root, root_children.into_iter())];

        loop {
            let (_, pending) = stack
                .last_mut()
                .ok_or_else(|| FeedError::Integrity("empty assembly stack".into()))?;

            if let Some(child_id) = pending.next() {
                let child = nodes.remove(&child_id).ok_or_else(|| {
                    FeedError::Integrity(format!("duplicate comment id {}", child_id))
                })?;
                let grandchildren = children_of.remove(&child_id).unwrap_or_default();
                stack.push((child, grandchildren.into_iter()));
            } else {
                let (finished, _) = stack.pop().ok_or_else(|| {
                    FeedError::Integrity("empty assembly stack".into())
                })?;
                match stack.last_mut() {
                    Some((parent, _)) => parent.children.push(finished),
                    None => {
                        forest.push(finished);
                        break;
                    }
                }
            }
        }
    }

    // Anything left over was never reached from a root, which can only
    // happen if the parent relation stopped being a forest.
    if !nodes.is_empty() {
        return Err(FeedError::Integrity(format!(
            "{} comments unreachable from any root (cycle in parent links)",
            nodes.len()
        )));
    }

    Ok(forest)
}

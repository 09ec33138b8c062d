//! Karma Aggregator: trailing-window weighted leaderboard.
//!
//! Karma is never stored. Every request recomputes it from the two like
//! streams, which are concatenated (UNION ALL in the store) rather than
//! joined, so a user's P post-likes and C comment-likes contribute P + C
//! events and never P x C.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FeedError, FeedResult};
use crate::likes::{COMMENT_LIKE_WEIGHT, POST_LIKE_WEIGHT};
use crate::models::{LIKE_KIND_COMMENT, LIKE_KIND_POST};
use crate::store::EventStore;

/// Length of the trailing karma window, in hours.
pub const KARMA_WINDOW_HOURS: i64 = 24;
/// Default leaderboard length.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: Uuid,
    pub username: String,
    pub karma: i64,
}

/// Top-`k` users by karma earned within `[now - 24h, now]`, both bounds
/// inclusive.
///
/// Post-likes weigh 5, comment-likes weigh 1, each event counted exactly
/// once against the liked content's author. Output is sorted by karma
/// descending with ascending user id as the tie-break; users with no
/// qualifying events are absent rather than listed with zero.
pub async fn leaderboard(
    store: &EventStore,
    now: DateTime<Utc>,
    k: usize,
) -> FeedResult<Vec<LeaderboardEntry>> {
    let since = now - Duration::hours(KARMA_WINDOW_HOURS);
    let events = store.recent_like_events(since, now).await?;
    log::debug!(
        "aggregating {} like events in window [{}, {}]",
        events.len(),
        since,
        now
    );

    let mut totals: HashMap<Uuid, (String, i64)> = HashMap::new();
    for event in events {
        let weight = match event.kind.as_str() {
            LIKE_KIND_POST => POST_LIKE_WEIGHT,
            LIKE_KIND_COMMENT => COMMENT_LIKE_WEIGHT,
            other => {
                return Err(FeedError::Integrity(format!(
                    "unknown like event kind {:?}",
                    other
                )))
            }
        };
        let entry = totals
            .entry(event.author_id)
            .or_insert_with(|| (event.author_username, 0));
        entry.1 += weight;
    }

    let mut entries: Vec<LeaderboardEntry> = totals
        .into_iter()
        .map(|(user_id, (username, karma))| LeaderboardEntry {
            user_id,
            username,
            karma,
        })
        .collect();

    entries.sort_by(|a, b| b.karma.cmp(&a.karma).then(a.user_id.cmp(&b.user_id)));
    entries.truncate(k);
    Ok(entries)
}

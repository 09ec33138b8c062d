//! Data-access and aggregation engine for a community discussion feed.
//!
//! Three operations do the real work, all against the same Postgres-backed
//! [`store::EventStore`]:
//!
//! - [`likes::register_like`] records a like exactly once per
//!   (user, target), letting the storage unique constraint resolve races.
//! - [`comment_tree::comment_tree`] rebuilds an arbitrarily deep comment
//!   forest from a single bulk read.
//! - [`karma::leaderboard`] computes the trailing-24h weighted leaderboard
//!   from the two like-event streams without join fan-out.

pub mod comment_tree;
pub mod config;
pub mod error;
pub mod karma;
pub mod likes;
pub mod models;
pub mod seeder;
pub mod store;

pub use comment_tree::{comment_tree, CommentNode};
pub use error::{FeedError, FeedResult};
pub use karma::{leaderboard, LeaderboardEntry};
pub use likes::{register_like, LikeRecord, LikeTarget};
pub use store::EventStore;

use config::Config;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Open a connection pool using the crate configuration.
pub async fn connect_pool(config: &Config) -> FeedResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(FeedError::Database)?;
    log::info!("database connection pool established");
    Ok(pool)
}

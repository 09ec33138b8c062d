//! Error taxonomy for the feed engine.
//!
//! Expected domain outcomes (`AlreadyLiked`) are separate variants from
//! storage faults so callers can tell "don't retry" from "may retry".

use thiserror::Error;

/// Result type for feed operations
pub type FeedResult<T> = Result<T, FeedError>;

#[derive(Error, Debug)]
pub enum FeedError {
    /// The (user, target) pair already has a like on record. Expected
    /// outcome of a duplicate attempt, never retried.
    #[error("already liked")]
    AlreadyLiked,

    /// A storage-level invariant was broken: a unique or referential
    /// constraint rejected the write. `constraint` carries the Postgres
    /// constraint name when the driver reports one.
    #[error("constraint violation: {message}")]
    ConstraintViolation {
        constraint: Option<String>,
        message: String,
    },

    /// Data inconsistency detected while reading, e.g. a comment whose
    /// parent is missing from its own post's comment set. Indicates
    /// corruption rather than a normal race.
    #[error("data integrity fault: {0}")]
    Integrity(String),

    /// Anything else from the storage layer (connection loss, timeouts,
    /// malformed rows). Callers may retry these.
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for FeedError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() || db_err.is_foreign_key_violation() {
                return FeedError::ConstraintViolation {
                    constraint: db_err.constraint().map(str::to_string),
                    message: db_err.message().to_string(),
                };
            }
        }
        FeedError::Database(err)
    }
}

impl FeedError {
    /// True when the error is the rejection of a duplicate like attempt.
    pub fn is_already_liked(&self) -> bool {
        matches!(self, FeedError::AlreadyLiked)
    }

    /// True for constraint violations against the named constraint.
    pub fn violates_constraint(&self, name: &str) -> bool {
        matches!(
            self,
            FeedError::ConstraintViolation { constraint: Some(c), .. } if c == name
        )
    }
}

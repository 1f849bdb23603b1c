//! Traits the use cases depend on, implemented in `infrastructure`.
//!
//! Both ports are async because the real adapters do file I/O on the tokio
//! runtime.  Unit tests use the `mockall`-generated `MockBoardStore` and
//! `MockScoreSource`.

use std::path::PathBuf;

use async_trait::async_trait;
use bingo_core::{BoardSnapshot, FeedEntry};
use thiserror::Error;

/// Error type for board persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing board store at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but is not a valid username → snapshot map.
    #[error("board store at {path} is corrupt: {message}")]
    Corrupt { path: PathBuf, message: String },

    /// The snapshot could not be encoded for writing.
    #[error("failed to encode board store: {0}")]
    Encode(String),
}

/// Error type for score feed access.
#[derive(Debug, Error)]
pub enum FeedError {
    /// A file system I/O error occurred.
    #[error("I/O error reading score feed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The feed document could not be parsed.
    #[error("score feed at {path} is malformed: {message}")]
    Malformed { path: PathBuf, message: String },

    /// No feed is configured.
    #[error("no score feed configured; set [feed] path in the config file")]
    NotConfigured,
}

/// Persists one board snapshot per user.
///
/// Saves are whole-board replacements; the last write wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Returns the stored snapshot for `user`, or `None` if they have never saved.
    async fn load(&self, user: &str) -> Result<Option<BoardSnapshot>, StoreError>;

    /// Replaces the stored snapshot for `user`.
    async fn save(&self, user: &str, snapshot: &BoardSnapshot) -> Result<(), StoreError>;

    /// Lists every user with a stored board, sorted by name.
    async fn users(&self) -> Result<Vec<String>, StoreError>;
}

/// Supplies the current tournament scores.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreSource: Send + Sync {
    /// Fetches the raw feed rows.
    async fn fetch(&self) -> Result<Vec<FeedEntry>, FeedError>;
}

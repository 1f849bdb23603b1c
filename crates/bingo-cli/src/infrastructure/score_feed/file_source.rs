//! [`ScoreSource`] that reads a JSON leaderboard file.
//!
//! Two layouts are accepted, a bare array of rows or an object with a
//! `players` array:
//!
//! ```json
//! [{ "name": "Chris Gotterup", "score": -15 }, { "name": "Tom Kim", "score": "E" }]
//! { "players": [{ "name": "Chris Gotterup", "score": "-15", "position": "1" }] }
//! ```
//!
//! Extra fields on each row (position, total strokes, ...) are ignored.

use std::path::PathBuf;

use async_trait::async_trait;
use bingo_core::FeedEntry;
use serde::Deserialize;
use tracing::debug;

use crate::application::ports::{FeedError, ScoreSource};

#[derive(Deserialize)]
#[serde(untagged)]
enum FeedDocument {
    Rows(Vec<FeedEntry>),
    Players { players: Vec<FeedEntry> },
}

impl FeedDocument {
    fn into_entries(self) -> Vec<FeedEntry> {
        match self {
            FeedDocument::Rows(rows) => rows,
            FeedDocument::Players { players } => players,
        }
    }
}

/// Reads the feed file on every [`fetch`](ScoreSource::fetch).
pub struct FileScoreSource {
    path: PathBuf,
}

impl FileScoreSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ScoreSource for FileScoreSource {
    async fn fetch(&self) -> Result<Vec<FeedEntry>, FeedError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FeedError::Io {
                path: self.path.clone(),
                source,
            })?;
        let document: FeedDocument =
            serde_json::from_str(&content).map_err(|e| FeedError::Malformed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        let entries = document.into_entries();
        debug!(path = %self.path.display(), rows = entries.len(), "score feed read");
        Ok(entries)
    }
}

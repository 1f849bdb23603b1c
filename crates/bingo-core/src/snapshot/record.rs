//! Snapshot document and its error type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::board::{BoardError, GolferAssignment};

/// Serialized form of a board at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub cells: Vec<Option<GolferAssignment>>,
    pub used_names: Vec<String>,
    pub last_saved: DateTime<Utc>,
}

/// Reasons a snapshot cannot be turned back into a board.
#[derive(Debug, Error, PartialEq)]
pub enum SnapshotError {
    /// The cells themselves are invalid (wrong count, duplicate golfer, zero
    /// salary, blank name).
    #[error("invalid board cells: {0}")]
    Board(#[from] BoardError),

    /// `usedNames` lists a different set of golfers than the cells hold.
    #[error("usedNames {listed:?} does not match the golfers on the board {on_board:?}")]
    UsedNamesMismatch {
        listed: Vec<String>,
        on_board: Vec<String>,
    },

    /// The document is not valid snapshot JSON.
    #[error("malformed board JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Json(err.to_string())
    }
}

//! Conversion between [`Board`] and [`BoardSnapshot`], and the JSON text form.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::warn;

use super::record::{BoardSnapshot, SnapshotError};
use crate::domain::board::{name_key, Board};

/// Captures `board` as a snapshot stamped with `at`.
pub fn serialize(board: &Board, at: DateTime<Utc>) -> BoardSnapshot {
    BoardSnapshot {
        cells: board.cells().to_vec(),
        used_names: board.used_names(),
        last_saved: at,
    }
}

/// Rebuilds a board from a snapshot.
///
/// # Errors
///
/// Returns [`SnapshotError::Board`] if the cells are not a valid board and
/// [`SnapshotError::UsedNamesMismatch`] if `usedNames` disagrees with them
/// (compared case-insensitively, ignoring order).
pub fn deserialize(snapshot: &BoardSnapshot) -> Result<Board, SnapshotError> {
    let board = Board::from_cells(snapshot.cells.clone())?;

    let listed: BTreeSet<String> = snapshot.used_names.iter().map(|n| name_key(n)).collect();
    let on_board: BTreeSet<String> = board.used_names().iter().map(|n| name_key(n)).collect();
    if listed.len() != snapshot.used_names.len() || listed != on_board {
        return Err(SnapshotError::UsedNamesMismatch {
            listed: snapshot.used_names.clone(),
            on_board: board.used_names(),
        });
    }

    Ok(board)
}

/// Like [`deserialize`], but falls back to an empty board when the snapshot
/// is invalid.  The failure is logged at `warn` level.
pub fn deserialize_or_empty(snapshot: &BoardSnapshot) -> Board {
    deserialize(snapshot).unwrap_or_else(|err| {
        warn!(error = %err, last_saved = %snapshot.last_saved, "discarding invalid board snapshot");
        Board::new()
    })
}

/// Renders a snapshot as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`SnapshotError::Json`] if serialization fails.
pub fn encode_json(snapshot: &BoardSnapshot) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Parses a snapshot from JSON text.  The cells are not validated; pass the
/// result to [`deserialize`] for that.
///
/// # Errors
///
/// Returns [`SnapshotError::Json`] if `text` is not a snapshot document.
pub fn decode_json(text: &str) -> Result<BoardSnapshot, SnapshotError> {
    Ok(serde_json::from_str(text)?)
}

//! LeaderboardUseCase: ranks every stored board by its best line.
//!
//! Lower totals rank higher (golf scoring).  Players tied on total share a
//! rank and the next rank is skipped ("1, 2, 2, 4").  Boards with no complete
//! scored line are listed after every ranked board, unranked.

use bingo_core::{deserialize_or_empty, BestLine, Board, ScoreTable};
use tracing::{debug, warn};

use super::board_session::SessionError;
use super::ports::BoardStore;

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// 1-based competition rank, `None` when the board has no qualifying line.
    pub rank: Option<usize>,
    pub user: String,
    /// Number of filled cells on the user's board.
    pub filled: usize,
    pub best: Option<BestLine>,
}

impl LeaderboardEntry {
    pub fn total(&self) -> Option<i64> {
        self.best.as_ref().map(|best| best.total)
    }
}

/// Loads every user's board from `store` and ranks them against `scores`.
///
/// Boards that fail validation, or whose stored entry cannot be read at all,
/// count as empty, exactly as when a player opens them.
///
/// # Errors
///
/// Returns [`SessionError::Store`] if the store cannot be listed or read.
pub async fn build_leaderboard(
    store: &dyn BoardStore,
    scores: &ScoreTable,
) -> Result<Vec<LeaderboardEntry>, SessionError> {
    let mut entries = Vec::new();
    for user in store.users().await? {
        let board = match store.load(&user).await? {
            Some(snapshot) => deserialize_or_empty(&snapshot),
            None => {
                // Listed but unreadable: shown as an empty, unranked board.
                warn!(user = %user, "stored board unreadable; listing it as empty");
                Board::new()
            }
        };
        entries.push(LeaderboardEntry {
            rank: None,
            filled: board.filled_count(),
            best: bingo_core::best_line(&board, scores),
            user,
        });
    }

    rank_entries(&mut entries);
    debug!(boards = entries.len(), "leaderboard built");
    Ok(entries)
}

/// Sorts by total (unscored last, then by user name) and assigns ranks.
fn rank_entries(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| {
        (a.total().is_none(), a.total(), &a.user).cmp(&(b.total().is_none(), b.total(), &b.user))
    });

    let mut previous: Option<(i64, usize)> = None;
    for (position, entry) in entries.iter_mut().enumerate() {
        let Some(total) = entry.total() else {
            continue;
        };
        let rank = match previous {
            Some((previous_total, previous_rank)) if previous_total == total => previous_rank,
            _ => position + 1,
        };
        entry.rank = Some(rank);
        previous = Some((total, rank));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

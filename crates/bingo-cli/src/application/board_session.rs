//! BoardSessionUseCase: one player's board between load and save.
//!
//! The session owns the player's current [`Board`] and swaps it for the new
//! value every time a rules operation succeeds.  Rejected operations leave the
//! board exactly as it was.
//!
//! # Architecture
//!
//! The session depends only on the [`BoardStore`] trait and on `bingo_core`
//! values.  The geometry and catalog are shared (`Arc`) because every session
//! in a process uses the same tournament configuration.

use std::sync::Arc;

use bingo_core::{
    best_line, clear_cell, deserialize_or_empty, serialize, validate_and_assign,
    zone_budget_status, Board, BestLine, BoardGeometry, BoardSnapshot, CellIndex,
    GolferAssignment, GolferCatalog, RuleViolation, ScoreTable, ZoneStatus, CELL_COUNT,
};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use super::ports::{BoardStore, FeedError, StoreError};

/// Error type for board session and leaderboard operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("user name must not be empty")]
    EmptyUser,

    #[error("'{0}' is not in the golfer catalog")]
    UnknownGolfer(String),

    #[error(transparent)]
    Rule(#[from] RuleViolation),

    #[error("board store error: {0}")]
    Store(#[from] StoreError),

    #[error("score feed error: {0}")]
    Feed(#[from] FeedError),
}

/// A loaded board for one user.
pub struct BoardSession {
    user: String,
    board: Board,
    last_saved: Option<DateTime<Utc>>,
    geometry: Arc<BoardGeometry>,
    catalog: Arc<GolferCatalog>,
    store: Arc<dyn BoardStore>,
}

impl BoardSession {
    /// Loads `user`'s board from `store`.
    ///
    /// A user with no stored board starts empty.  A stored snapshot that fails
    /// validation (wrong cell count, duplicate golfer, ...) is discarded with
    /// a warning and the session starts empty.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyUser`] for a blank user name and
    /// [`SessionError::Store`] if the store cannot be read.
    pub async fn open(
        user: &str,
        geometry: Arc<BoardGeometry>,
        catalog: Arc<GolferCatalog>,
        store: Arc<dyn BoardStore>,
    ) -> Result<Self, SessionError> {
        let user = user.trim();
        if user.is_empty() {
            return Err(SessionError::EmptyUser);
        }

        let (board, last_saved) = match store.load(user).await? {
            Some(snapshot) => (deserialize_or_empty(&snapshot), Some(snapshot.last_saved)),
            None => (Board::new(), None),
        };
        info!(user, filled = board.filled_count(), "board session opened");

        Ok(Self {
            user: user.to_string(),
            board,
            last_saved,
            geometry,
            catalog,
            store,
        })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    /// Timestamp of the snapshot this session was loaded from or last saved as.
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    /// Places the catalog golfer called `golfer_name` in cell `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownGolfer`] if the name is not in the
    /// catalog, or [`SessionError::Rule`] if the rules refuse the placement.
    pub fn place(&mut self, golfer_name: &str, index: CellIndex) -> Result<GolferAssignment, SessionError> {
        let golfer = self
            .catalog
            .lookup(golfer_name)
            .cloned()
            .ok_or_else(|| SessionError::UnknownGolfer(golfer_name.trim().to_string()))?;

        match validate_and_assign(&self.board, index, &golfer, &self.geometry) {
            Ok(next) => {
                self.board = next;
                info!(user = %self.user, golfer = %golfer.name, cell = index, "golfer placed");
                Ok(golfer)
            }
            Err(violation) => {
                warn!(user = %self.user, golfer = %golfer.name, cell = index, %violation, "placement refused");
                Err(violation.into())
            }
        }
    }

    /// Empties cell `index`, returning the golfer that was there.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Rule`] if `index` is off the board.
    pub fn clear(&mut self, index: CellIndex) -> Result<Option<GolferAssignment>, SessionError> {
        let (next, removed) = clear_cell(&self.board, index)?;
        self.board = next;
        if let Some(golfer) = &removed {
            info!(user = %self.user, golfer = %golfer.name, cell = index, "cell cleared");
        }
        Ok(removed)
    }

    /// Clears all 25 cells.
    pub fn reset(&mut self) {
        self.board = self.board.cleared();
        info!(user = %self.user, "board reset");
    }

    /// Scores the current board against `scores`.
    pub fn best_line(&self, scores: &ScoreTable) -> Option<BestLine> {
        best_line(&self.board, scores)
    }

    /// Per-zone budget summary of the current board.
    pub fn zone_status(&self) -> Vec<ZoneStatus> {
        zone_budget_status(&self.board, &self.geometry)
    }

    /// Catalog golfers not yet on the board.
    pub fn available_golfers(&self) -> Vec<GolferAssignment> {
        self.catalog.available(&self.board).cloned().collect()
    }

    /// The fill counter shown under the board, e.g. `"Filled: 7 / 25"`.
    pub fn filled_summary(&self) -> String {
        format!("Filled: {} / {}", self.board.filled_count(), CELL_COUNT)
    }

    /// Writes the current board to the store stamped with `at`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if the write fails; the session keeps
    /// its in-memory board either way.
    pub async fn save(&mut self, at: DateTime<Utc>) -> Result<BoardSnapshot, SessionError> {
        let snapshot = serialize(&self.board, at);
        self.store.save(&self.user, &snapshot).await?;
        self.last_saved = Some(at);
        info!(user = %self.user, filled = self.board.filled_count(), "board saved");
        Ok(snapshot)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockBoardStore;
    use bingo_core::BudgetScope;
    use chrono::TimeZone;

    fn catalog() -> Arc<GolferCatalog> {
        Arc::new(
            GolferCatalog::new(vec![
                GolferAssignment::new("Scottie Scheffler", 14_000),
                GolferAssignment::new("Collin Morikawa", 10_000),
                GolferAssignment::new("Shane Lowry", 8_000),
                GolferAssignment::new("Hideki Matsuyama", 9_000),
                GolferAssignment::new("Matt Fitzpatrick", 8_000),
            ])
            .unwrap(),
        )
    }

    fn empty_store() -> MockBoardStore {
        let mut store = MockBoardStore::new();
        store.expect_load().returning(|_| Ok(None));
        store
    }

    async fn open_with(store: MockBoardStore) -> BoardSession {
        BoardSession::open(
            "alice",
            Arc::new(BoardGeometry::standard()),
            catalog(),
            Arc::new(store),
        )
        .await
        .expect("session must open")
    }

    #[tokio::test]
    async fn test_open_without_stored_board_starts_empty() {
        let session = open_with(empty_store()).await;

        assert!(session.board().is_empty());
        assert_eq!(session.last_saved(), None);
        assert_eq!(session.filled_summary(), "Filled: 0 / 25");
    }

    #[tokio::test]
    async fn test_open_rejects_blank_user() {
        let result = BoardSession::open(
            "   ",
            Arc::new(BoardGeometry::standard()),
            catalog(),
            Arc::new(MockBoardStore::new()),
        )
        .await;

        assert!(matches!(result, Err(SessionError::EmptyUser)));
    }

    #[tokio::test]
    async fn test_open_discards_invalid_snapshot() {
        // Arrange: a stored snapshot with the wrong number of cells.
        let mut store = MockBoardStore::new();
        store.expect_load().returning(|_| {
            Ok(Some(BoardSnapshot {
                cells: vec![None; 3],
                used_names: Vec::new(),
                last_saved: Utc::now(),
            }))
        });

        // Act
        let session = open_with(store).await;

        // Assert
        assert!(session.board().is_empty());
    }

    #[tokio::test]
    async fn test_place_unknown_golfer_is_rejected() {
        let mut session = open_with(empty_store()).await;

        let result = session.place("Bobby Jones", 0);

        assert!(matches!(result, Err(SessionError::UnknownGolfer(name)) if name == "Bobby Jones"));
        assert!(session.board().is_empty());
    }

    #[tokio::test]
    async fn test_place_resolves_name_case_insensitively() {
        let mut session = open_with(empty_store()).await;

        let golfer = session.place("shane lowry", 6).expect("placement allowed");

        assert_eq!(golfer.name, "Shane Lowry");
        assert_eq!(session.board().position_of("Shane Lowry"), Some(6));
        assert_eq!(session.available_golfers().len(), 4);
    }

    #[tokio::test]
    async fn test_refused_placement_leaves_board_unchanged() {
        // Arrange: three orange corners hold 32 000.
        let mut session = open_with(empty_store()).await;
        session.place("Scottie Scheffler", 0).unwrap();
        session.place("Collin Morikawa", 4).unwrap();
        session.place("Shane Lowry", 20).unwrap();
        let before = session.board().clone();

        // Act
        let result = session.place("Hideki Matsuyama", 24);

        // Assert
        assert!(matches!(
            result,
            Err(SessionError::Rule(RuleViolation::BudgetExceeded {
                scope: BudgetScope::Zone,
                remaining: 8_000,
                ..
            }))
        ));
        assert_eq!(session.board(), &before);
        assert!(session.place("Matt Fitzpatrick", 24).is_ok());
    }

    #[tokio::test]
    async fn test_clear_and_reset() {
        let mut session = open_with(empty_store()).await;
        session.place("Shane Lowry", 6).unwrap();
        session.place("Scottie Scheffler", 7).unwrap();

        let removed = session.clear(6).unwrap();
        assert_eq!(removed.map(|g| g.name), Some("Shane Lowry".to_string()));
        assert_eq!(session.filled_summary(), "Filled: 1 / 25");

        session.reset();
        assert!(session.board().is_empty());
    }

    #[tokio::test]
    async fn test_save_writes_snapshot_for_user() {
        // Arrange
        let mut store = empty_store();
        store
            .expect_save()
            .withf(|user, snapshot| user.to_string() == "alice" && snapshot.used_names == ["Shane Lowry"])
            .times(1)
            .returning(|_, _| Ok(()));
        let mut session = open_with(store).await;
        session.place("Shane Lowry", 6).unwrap();
        let at = Utc.with_ymd_and_hms(2026, 7, 20, 9, 0, 0).unwrap();

        // Act
        let snapshot = session.save(at).await.expect("save must succeed");

        // Assert
        assert_eq!(snapshot.last_saved, at);
        assert_eq!(session.last_saved(), Some(at));
    }

    #[tokio::test]
    async fn test_save_failure_is_reported() {
        let mut store = empty_store();
        store.expect_save().returning(|_, _| {
            Err(StoreError::Encode("disk full".to_string()))
        });
        let mut session = open_with(store).await;

        let result = session.save(Utc::now()).await;

        assert!(matches!(result, Err(SessionError::Store(_))));
        assert_eq!(session.last_saved(), None);
    }
}

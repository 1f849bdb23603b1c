//! # bingo-core
//!
//! Rules engine for Golf Bingo: the board geometry, the salary-budget
//! checkpoints applied when golfers are placed, the best-line scorer, and the
//! flat snapshot format used to persist a board.
//!
//! This crate is used by the `golf-bingo` command-line front end and by any
//! other presentation layer that wants to host a board.  It has no
//! dependencies on file systems, network sockets, async runtimes, or UI
//! frameworks: every operation takes immutable values and returns new ones.
//!
//! # Architecture overview
//!
//! A player drafts 25 golfers onto a 5×5 grid.  The grid is split into colour
//! **zones**, each with a salary budget, and scored along the 12 bingo
//! **lines** (5 rows, 5 columns, 2 diagonals) against live scores to par.
//!
//! - **`domain`** – The value types: [`Board`], [`GolferAssignment`], the
//!   [`BoardGeometry`] that partitions the 25 cells into budgeted zones, and
//!   the [`GolferCatalog`] of draftable golfers.
//!
//! - **`rules`** – Pure functions over those values.  [`validate_and_assign`]
//!   enforces the "last-cell checkpoint" budget rule; [`compute_best_line`]
//!   finds the lowest-scoring complete line(s).
//!
//! - **`snapshot`** – Conversion between a [`Board`] and the storage-agnostic
//!   [`BoardSnapshot`] record (`cells`, `usedNames`, `lastSaved`).

pub mod domain;
pub mod rules;
pub mod snapshot;

// Re-export the most-used types at the crate root so callers can write
// `bingo_core::Board` instead of `bingo_core::domain::board::Board`.
pub use domain::board::{Board, BoardError, CellIndex, GolferAssignment};
pub use domain::catalog::{CatalogError, GolferCatalog};
pub use domain::geometry::{BoardGeometry, GeometryError, LineId, Zone, CELL_COUNT, LINE_COUNT};
pub use rules::scoring::{
    best_line, compute_best_line, score_lines, BestLine, FeedEntry, FeedScore, LineScore,
    ScoreTable,
};
pub use rules::validator::{
    clear_cell, validate_and_assign, zone_budget_status, BudgetScope, RuleViolation, ZoneStatus,
};
pub use snapshot::codec::{decode_json, deserialize, deserialize_or_empty, encode_json, serialize};
pub use snapshot::record::{BoardSnapshot, SnapshotError};

//! Application layer use cases for the Golf Bingo front end.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (the pure rules in `bingo_core`) and the infrastructure (files, clocks,
//! the terminal).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain values to fulfil a player goal (e.g., "put Jon
//!   Rahm in cell 12 and keep the board saved").
//! - **Depend on abstractions** (the [`BoardStore`](ports::BoardStore) and
//!   [`ScoreSource`](ports::ScoreSource) traits) rather than concrete
//!   adapters, so tests can swap in mocks.
//! - **Contain no file system access** of their own.
//!
//! # Sub-modules
//!
//! - **`ports`** – The storage and score-feed traits plus their error types.
//! - **`board_session`** – One player's board: load, place, clear, reset,
//!   score, save.
//! - **`leaderboard`** – Ranks every stored board by its best line.

pub mod board_session;
pub mod leaderboard;
pub mod ports;

//! Board rules: pure functions over [`Board`](crate::Board) values.
//!
//! - [`validator`] decides whether a golfer may be placed in a cell, applying
//!   the salary-budget checkpoints, and clears cells.
//! - [`scoring`] finds the lowest-scoring complete line(s) against a table of
//!   live scores to par.
//!
//! Nothing here performs I/O or keeps state between calls.  A presentation
//! layer calls these on every drop, clear, and score refresh, and owns the
//! resulting board.

pub mod scoring;
pub mod validator;

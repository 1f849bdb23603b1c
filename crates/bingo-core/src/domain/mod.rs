//! Domain entities for Golf Bingo.
//!
//! This module contains pure value types with no infrastructure dependencies.
//! Everything here can be compiled and tested on any platform without a file
//! system, a network, or a running async runtime.
//!
//! - [`geometry`] – the fixed 5×5 grid: which cells form each of the 12 lines
//!   and how the 25 cells are partitioned into budgeted colour zones.
//! - [`board`] – the 25 cells of a player's board and the golfers in them.
//! - [`catalog`] – the draftable golfers and their salaries for a tournament.
//!
//! The zone table and the catalog change from tournament to tournament, so
//! both are built from data at startup rather than compiled in.

/// Board geometry: lines, zones, and the zone-partition invariant.
pub mod geometry;

pub mod board;
pub mod catalog;

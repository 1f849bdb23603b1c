//! Infrastructure layer for the Golf Bingo front end.
//!
//! Contains the adapters at the edge of the program: the TOML configuration,
//! the JSON board store, the score feed with its TTL cache, and plain-text
//! rendering for the terminal.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `bingo_core`, but MUST NOT be imported by the `application` layer.

pub mod score_feed;
pub mod storage;
pub mod terminal;

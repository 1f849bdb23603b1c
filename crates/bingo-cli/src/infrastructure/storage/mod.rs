//! Storage infrastructure: configuration and board persistence.
//!
//! - `config` reads and writes the TOML configuration file, including the
//!   zone table and golfer catalog for the current tournament.
//! - `board_store` keeps every player's board in a single `boards.json` file
//!   keyed by user name.

pub mod board_store;
pub mod config;

//! Score feed infrastructure.
//!
//! - `file_source` reads tournament scores from a JSON file that an external
//!   job keeps up to date.
//! - `cache` wraps any [`ScoreSource`](crate::application::ports::ScoreSource)
//!   with a time-to-live so repeated scoring does not re-read the feed, and
//!   keeps serving the last good scores when a refresh fails.

pub mod cache;
pub mod file_source;

pub use cache::{CachedScoreFeed, FeedStatus};
pub use file_source::FileScoreSource;

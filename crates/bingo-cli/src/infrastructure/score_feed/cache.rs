//! Time-to-live cache in front of a [`ScoreSource`].
//!
//! The cache holds the last successfully parsed [`ScoreTable`].  Within the
//! TTL, [`CachedScoreFeed::scores`] returns it without touching the source.
//! After the TTL the source is fetched again; if that fetch fails and an older
//! table exists, the older table is served as backup data and the failure is
//! logged.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bingo_core::ScoreTable;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::application::ports::{FeedError, ScoreSource};

struct CacheEntry {
    table: Arc<ScoreTable>,
    fetched_at: Instant,
    updated_at: DateTime<Utc>,
}

/// Snapshot of the cache state, for the `best-line` status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedStatus {
    /// Time since the last successful fetch, `None` if there has been none.
    pub age: Option<Duration>,
    /// `true` while the cached table is younger than the TTL.
    pub valid: bool,
    pub last_update: Option<DateTime<Utc>>,
    pub ttl: Duration,
    /// Golfers in the cached table.
    pub golfers: usize,
}

/// Score source wrapper with an explicit TTL.
pub struct CachedScoreFeed {
    source: Arc<dyn ScoreSource>,
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl CachedScoreFeed {
    pub fn new(source: Arc<dyn ScoreSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// Returns the current score table, refreshing it if the TTL has elapsed.
    ///
    /// # Errors
    ///
    /// Returns the source's [`FeedError`] only when the fetch fails and there
    /// is no earlier table to fall back on.
    pub async fn scores(&self) -> Result<Arc<ScoreTable>, FeedError> {
        let mut entry = self.entry.lock().await;
        if let Some(cached) = entry.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&cached.table));
            }
        }
        self.refresh_locked(&mut entry).await
    }

    /// Fetches from the source regardless of the TTL.
    ///
    /// # Errors
    ///
    /// Same as [`CachedScoreFeed::scores`].
    pub async fn refresh(&self) -> Result<Arc<ScoreTable>, FeedError> {
        let mut entry = self.entry.lock().await;
        self.refresh_locked(&mut entry).await
    }

    pub async fn status(&self) -> FeedStatus {
        let entry = self.entry.lock().await;
        match entry.as_ref() {
            Some(cached) => {
                let age = cached.fetched_at.elapsed();
                FeedStatus {
                    age: Some(age),
                    valid: age < self.ttl,
                    last_update: Some(cached.updated_at),
                    ttl: self.ttl,
                    golfers: cached.table.len(),
                }
            }
            None => FeedStatus {
                age: None,
                valid: false,
                last_update: None,
                ttl: self.ttl,
                golfers: 0,
            },
        }
    }

    async fn refresh_locked(
        &self,
        entry: &mut Option<CacheEntry>,
    ) -> Result<Arc<ScoreTable>, FeedError> {
        match self.source.fetch().await {
            Ok(rows) => {
                let table = Arc::new(ScoreTable::from_feed(rows));
                debug!(golfers = table.len(), skipped = table.skipped(), "score cache refreshed");
                *entry = Some(CacheEntry {
                    table: Arc::clone(&table),
                    fetched_at: Instant::now(),
                    updated_at: Utc::now(),
                });
                Ok(table)
            }
            Err(err) => match entry.as_ref() {
                Some(stale) => {
                    warn!(error = %err, last_update = %stale.updated_at, "score feed refresh failed; serving cached scores");
                    Ok(Arc::clone(&stale.table))
                }
                None => Err(err),
            },
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

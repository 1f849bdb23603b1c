//! JSON file implementation of [`BoardStore`].
//!
//! Every board lives in one pretty-printed JSON object keyed by user name:
//!
//! ```json
//! {
//!   "alice": { "cells": [...], "usedNames": [...], "lastSaved": "..." },
//!   "bob":   { ... }
//! }
//! ```
//!
//! Entries are decoded one at a time, so a single damaged board is reported
//! as "no board" for that user (with a warning) instead of making the whole
//! file unreadable.  Writes go to a temporary file that is then renamed over
//! `boards.json`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bingo_core::BoardSnapshot;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::application::ports::{BoardStore, StoreError};

/// Board store backed by a single `boards.json` file.
pub struct JsonFileBoardStore {
    path: PathBuf,
    /// Serialises read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileBoardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the raw user → document map.  A missing file is an empty map.
    async fn read_all(&self) -> Result<BTreeMap<String, Value>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    async fn write_boards(&self, boards: &BTreeMap<String, Value>) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await.map_err(io_error(dir))?;
        }

        let content =
            serde_json::to_string_pretty(boards).map_err(|e| StoreError::Encode(e.to_string()))?;
        let staging = self.path.with_extension("json.tmp");
        let mut file = tokio::fs::File::create(&staging)
            .await
            .map_err(io_error(&staging))?;
        file.write_all(content.as_bytes())
            .await
            .map_err(io_error(&staging))?;
        // Bytes must be on disk before the rename makes them visible.
        file.sync_all().await.map_err(io_error(&staging))?;
        drop(file);
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(io_error(&self.path))?;
        Ok(())
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Io { path, source }
}

#[async_trait]
impl BoardStore for JsonFileBoardStore {
    async fn load(&self, user: &str) -> Result<Option<BoardSnapshot>, StoreError> {
        let mut boards = self.read_all().await?;
        let Some(value) = boards.remove(user) else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                warn!(user, path = %self.path.display(), error = %e, "ignoring unreadable stored board");
                Ok(None)
            }
        }
    }

    async fn save(&self, user: &str, snapshot: &BoardSnapshot) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut boards = self.read_all().await?;
        let value = serde_json::to_value(snapshot).map_err(|e| StoreError::Encode(e.to_string()))?;
        boards.insert(user.to_string(), value);
        self.write_boards(&boards).await?;
        debug!(user, path = %self.path.display(), "board written");
        Ok(())
    }

    async fn users(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.read_all().await?.into_keys().collect())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

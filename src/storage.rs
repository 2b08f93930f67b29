// ABOUTME: Key-value storage trait with in-memory and JSON-file backends
// ABOUTME: The file store keeps the whole map in one document, rewritten atomically on mutation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChefMate Contributors

//! # Key-Value Storage
//!
//! Persistence layer for recipe history. [`KeyValueStore`] keeps the history
//! store independent of where data lives: [`MemoryStore`] backs tests and
//! `--memory` sessions, [`FileStore`] persists a single JSON document under
//! the platform data directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dashmap::DashMap;
use tracing::debug;

use crate::errors::AppError;

/// Pluggable key-value storage backend
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Store `value` under `key`, replacing any existing value
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// Remove the value stored under `key`; no-op if absent
    fn remove(&self, key: &str) -> Result<(), AppError>;

    /// All keys currently present, in no particular order
    fn keys(&self) -> Result<Vec<String>, AppError>;
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, AppError> {
        Ok(self.entries.iter().map(|entry| entry.key().clone()).collect())
    }
}

/// File-backed store persisting one JSON object of key-value pairs
///
/// The document is loaded once at open and rewritten in full after every
/// mutation, via a temp file in the same directory so readers never observe
/// a partial write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open (or create) the store at `path`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the parent directory cannot be created or
    /// an existing document cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::storage(format!(
                    "failed to create storage directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let entries = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| {
                AppError::storage(format!("failed to read {}: {e}", path.display()))
            })?;
            serde_json::from_str(&raw).map_err(|e| {
                AppError::storage(format!("corrupt history file {}: {e}", path.display()))
            })?
        } else {
            HashMap::new()
        };

        debug!(path = %path.display(), "Opened file store");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing document
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), AppError> {
        let serialized = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serialized)
            .map_err(|e| AppError::storage(format!("failed to write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            AppError::storage(format!("failed to replace {}: {e}", self.path.display()))
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, AppError> {
        self.entries
            .lock()
            .map_err(|_| AppError::storage("history store lock poisoned"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut entries = self.lock()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut entries = self.lock()?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, AppError> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}

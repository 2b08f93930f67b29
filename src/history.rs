// ABOUTME: Timestamp-keyed recipe history over the key-value store with change broadcast
// ABOUTME: Listing filters by key prefix, sorts newest-first, and caps at the five most recent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChefMate Contributors

//! # Recipe History Store
//!
//! Persists generated recipes under `chefmate-recipe-<epoch-millis>` keys
//! and reconstructs a sorted, title-derived list for display. Entries are
//! immutable once created; the only mutations are save and delete. Saves
//! in the same millisecond overwrite each other, a known limitation of the
//! timestamp-keyed scheme.
//!
//! Writes broadcast a [`HistoryEvent`] so other observers (a history panel,
//! another session) can refresh without polling.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::errors::AppError;
use crate::extractor::extract_title;
use crate::storage::KeyValueStore;

/// Namespace prefix for history keys
pub const HISTORY_KEY_PREFIX: &str = "chefmate-recipe-";

/// Maximum entries returned by [`RecipeHistoryStore::list`]
pub const MAX_HISTORY_ENTRIES: usize = 5;

/// One persisted past recipe with its derived display title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Storage key encoding the save timestamp
    pub id: String,
    /// Display title derived from the first markdown line
    pub title: String,
    /// Raw recipe markdown
    pub text: String,
    /// Save time in epoch milliseconds
    pub timestamp: i64,
}

impl HistoryEntry {
    /// Save time as a UTC datetime, if the timestamp is representable
    #[must_use]
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Change notification emitted after history writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEvent {
    /// A recipe was saved under the given key
    Saved(String),
    /// The recipe under the given key was deleted
    Deleted(String),
}

/// Recipe history over a pluggable key-value store
pub struct RecipeHistoryStore {
    store: Arc<dyn KeyValueStore>,
    events: broadcast::Sender<HistoryEvent>,
}

impl RecipeHistoryStore {
    /// Create a history store over the given storage backend
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self { store, events }
    }

    /// Subscribe to change notifications
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<HistoryEvent> {
        self.events.subscribe()
    }

    /// Persist a recipe under a fresh timestamp key
    ///
    /// # Errors
    ///
    /// Returns a storage error if the underlying write fails.
    pub fn save(&self, recipe_text: &str) -> Result<HistoryEntry, AppError> {
        let timestamp = Utc::now().timestamp_millis();
        let id = format!("{HISTORY_KEY_PREFIX}{timestamp}");
        self.store.set(&id, recipe_text)?;
        debug!(id = %id, "Saved recipe to history");

        // Receiver-less send just means nobody is listening yet.
        let _ = self.events.send(HistoryEvent::Saved(id.clone()));

        Ok(HistoryEntry {
            title: extract_title(recipe_text),
            text: recipe_text.to_owned(),
            id,
            timestamp,
        })
    }

    /// List the most recent entries, newest first
    ///
    /// Keys outside the history namespace, or whose timestamp suffix does
    /// not parse, are skipped. At most [`MAX_HISTORY_ENTRIES`] entries are
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the underlying reads fail.
    pub fn list(&self) -> Result<Vec<HistoryEntry>, AppError> {
        let mut keyed: Vec<(i64, String)> = self
            .store
            .keys()?
            .into_iter()
            .filter_map(|key| {
                let suffix = key.strip_prefix(HISTORY_KEY_PREFIX)?;
                let timestamp = suffix.parse::<i64>().ok()?;
                Some((timestamp, key))
            })
            .collect();

        keyed.sort_by(|a, b| b.0.cmp(&a.0));
        keyed.truncate(MAX_HISTORY_ENTRIES);

        let mut entries = Vec::with_capacity(keyed.len());
        for (timestamp, id) in keyed {
            let Some(text) = self.store.get(&id)? else {
                continue;
            };
            entries.push(HistoryEntry {
                title: extract_title(&text),
                text,
                id,
                timestamp,
            });
        }
        Ok(entries)
    }

    /// Delete the entry stored under `id`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the underlying removal fails.
    pub fn delete(&self, id: &str) -> Result<(), AppError> {
        self.store.remove(id)?;
        debug!(id = %id, "Deleted recipe from history");
        let _ = self.events.send(HistoryEvent::Deleted(id.to_owned()));
        Ok(())
    }
}

impl std::fmt::Debug for RecipeHistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeHistoryStore").finish_non_exhaustive()
    }
}

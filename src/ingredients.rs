// ABOUTME: Ordered, duplicate-free ingredient list with trim/blank/duplicate validation
// ABOUTME: Insertion order is display order; entries are immutable once added
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChefMate Contributors

//! # Ingredient Store
//!
//! Holds the working list of ingredients the user has entered. Values are
//! trimmed on entry and must be unique (case-sensitive exact match after
//! trimming). Validation failures are returned to the caller for inline
//! display and never abort the session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failure when adding an ingredient
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The input was empty (or whitespace-only) after trimming
    #[error("Please enter an ingredient.")]
    Blank,
    /// The trimmed value already exists in the list
    #[error("\"{0}\" is already in your ingredient list.")]
    Duplicate(String),
}

/// Ordered, duplicate-free list of ingredient strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientStore {
    items: Vec<String>,
}

impl IngredientStore {
    /// Create an empty store
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add an ingredient, trimming surrounding whitespace first
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Blank`] if the trimmed value is empty, or
    /// [`ValidationError::Duplicate`] if an equal value is already present.
    pub fn add(&mut self, raw: &str) -> Result<(), ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Blank);
        }
        if self.items.iter().any(|item| item == trimmed) {
            return Err(ValidationError::Duplicate(trimmed.to_owned()));
        }
        self.items.push(trimmed.to_owned());
        Ok(())
    }

    /// Remove the matching entry; silently does nothing if absent
    pub fn remove(&mut self, value: &str) {
        if let Some(position) = self.items.iter().position(|item| item == value) {
            self.items.remove(position);
        }
    }

    /// Empty the list
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Current ingredients in insertion order
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of ingredients
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the exact (trimmed) value is present
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.items.iter().any(|item| item == value.trim())
    }
}

// ABOUTME: Application state for the recipe workspace with reducer-style event handling
// ABOUTME: Owns ingredients, preferences, the current recipe, the inline error, and the loading flag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChefMate Contributors

//! # Recipe Workspace
//!
//! Explicit application-state struct in place of ambient globals: every UI
//! or network-completion event is a [`WorkspaceEvent`] applied by
//! [`RecipeWorkspace::apply`]. The convenience methods wrap validation and
//! emit the matching events, so a front end can use either surface.

use crate::extractor::extract_ingredients;
use crate::ingredients::{IngredientStore, ValidationError};
use crate::preferences::PreferenceState;

/// Discrete event mutating workspace state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceEvent {
    /// A validated ingredient was added
    IngredientAdded(String),
    /// An ingredient was removed
    IngredientRemoved(String),
    /// Ingredients and preferences were cleared
    Cleared,
    /// A generation request was issued
    GenerationStarted,
    /// Generation completed with recipe markdown
    GenerationSucceeded(String),
    /// Generation failed with a user-facing message
    GenerationFailed(String),
    /// A historical recipe was loaded back into the workspace
    RecipeLoaded(String),
}

/// Mutable state of one recipe-building session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeWorkspace {
    ingredients: IngredientStore,
    preferences: PreferenceState,
    current_recipe: Option<String>,
    error: Option<String>,
    loading: bool,
}

impl RecipeWorkspace {
    /// Create an empty workspace
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current ingredient list
    #[must_use]
    pub const fn ingredients(&self) -> &IngredientStore {
        &self.ingredients
    }

    /// Current preferences (mutable so UI controls can bind to the fields)
    pub fn preferences_mut(&mut self) -> &mut PreferenceState {
        &mut self.preferences
    }

    /// Current preferences
    #[must_use]
    pub const fn preferences(&self) -> &PreferenceState {
        &self.preferences
    }

    /// The current recipe markdown, if one has been generated or loaded
    #[must_use]
    pub fn current_recipe(&self) -> Option<&str> {
        self.current_recipe.as_deref()
    }

    /// The inline error message to display, if any
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a generation request is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Validate and add an ingredient
    ///
    /// On success the inline error is cleared; on failure it is set to the
    /// validation message and the list is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ValidationError`].
    pub fn add_ingredient(&mut self, raw: &str) -> Result<(), ValidationError> {
        match self.ingredients.add(raw) {
            Ok(()) => {
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Remove an ingredient
    pub fn remove_ingredient(&mut self, value: &str) {
        self.apply(WorkspaceEvent::IngredientRemoved(value.to_owned()));
    }

    /// Clear all ingredients and reset preferences
    pub fn clear_all(&mut self) {
        self.apply(WorkspaceEvent::Cleared);
    }

    /// Mark a generation request as started
    pub fn begin_generation(&mut self) {
        self.apply(WorkspaceEvent::GenerationStarted);
    }

    /// Record the outcome of a generation request
    ///
    /// Success replaces the current recipe; failure records the message and
    /// leaves the prior recipe and ingredients untouched. Both clear the
    /// loading flag.
    pub fn finish_generation(&mut self, outcome: Result<String, String>) {
        match outcome {
            Ok(recipe) => self.apply(WorkspaceEvent::GenerationSucceeded(recipe)),
            Err(message) => self.apply(WorkspaceEvent::GenerationFailed(message)),
        }
    }

    /// Load a historical recipe back into the workspace
    ///
    /// The recipe becomes current, and when ingredient extraction yields at
    /// least one item the ingredient list is replaced with the extracted
    /// items. Extraction returning nothing leaves the list unchanged.
    pub fn load_recipe(&mut self, text: &str) {
        self.apply(WorkspaceEvent::RecipeLoaded(text.to_owned()));
    }

    /// Apply one state-transition event
    pub fn apply(&mut self, event: WorkspaceEvent) {
        match event {
            WorkspaceEvent::IngredientAdded(value) => {
                if self.ingredients.add(&value).is_ok() {
                    self.error = None;
                }
            }
            WorkspaceEvent::IngredientRemoved(value) => {
                self.ingredients.remove(&value);
            }
            WorkspaceEvent::Cleared => {
                self.ingredients.clear();
                self.preferences.reset();
                self.error = None;
            }
            WorkspaceEvent::GenerationStarted => {
                self.loading = true;
                self.error = None;
            }
            WorkspaceEvent::GenerationSucceeded(recipe) => {
                self.current_recipe = Some(recipe);
                self.loading = false;
            }
            WorkspaceEvent::GenerationFailed(message) => {
                self.error = Some(message);
                self.loading = false;
            }
            WorkspaceEvent::RecipeLoaded(text) => {
                let extracted = extract_ingredients(&text);
                if !extracted.is_empty() {
                    self.ingredients.clear();
                    for item in extracted {
                        // Duplicates inside the recipe body collapse silently.
                        let _ = self.ingredients.add(&item);
                    }
                }
                self.current_recipe = Some(text);
                self.error = None;
            }
        }
    }
}

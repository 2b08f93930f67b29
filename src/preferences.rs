// ABOUTME: Cuisine, meal-type, and dietary-restriction preference state
// ABOUTME: Maps the "Any" sentinel and blank values to "no preference" when building requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChefMate Contributors

//! # Preference State
//!
//! Preferences are plain mutable fields driven directly by user controls.
//! The selectable fields use the `"Any"` sentinel for "no preference"; the
//! free-text dietary restrictions field uses the empty string. Both map to
//! `None` in [`PreferenceSelection`], the shape the prompt builder consumes.

use serde::{Deserialize, Serialize};

/// Sentinel value meaning "no preference" for selectable fields
pub const ANY: &str = "Any";

/// Mutable preference fields as edited by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceState {
    /// Preferred cuisine, or [`ANY`]
    pub cuisine: String,
    /// Preferred meal type, or [`ANY`]
    pub meal_type: String,
    /// Free-text dietary restrictions, empty when unset
    pub dietary_restrictions: String,
}

impl Default for PreferenceState {
    fn default() -> Self {
        Self {
            cuisine: ANY.to_owned(),
            meal_type: ANY.to_owned(),
            dietary_restrictions: String::new(),
        }
    }
}

impl PreferenceState {
    /// Restore all fields to their unset values
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Resolve the current fields into request-ready optional values
    #[must_use]
    pub fn selection(&self) -> PreferenceSelection {
        PreferenceSelection {
            cuisine: resolve(&self.cuisine),
            meal_type: resolve(&self.meal_type),
            dietary_restrictions: resolve(&self.dietary_restrictions),
        }
    }
}

/// Preferences with sentinel and blank values resolved to `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceSelection {
    /// Preferred cuisine, if any
    pub cuisine: Option<String>,
    /// Preferred meal type, if any
    pub meal_type: Option<String>,
    /// Dietary restrictions, if any
    pub dietary_restrictions: Option<String>,
}

fn resolve(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == ANY {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

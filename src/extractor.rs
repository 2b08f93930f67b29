// ABOUTME: Heuristic markdown parsing to recover ingredient lists and recipe titles
// ABOUTME: Extraction failures are logged and yield empty results, never errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChefMate Contributors

//! # Ingredient Extractor
//!
//! Recovers a candidate ingredient list from AI-generated recipe markdown,
//! used when a historical recipe is loaded back into the workspace. The
//! format is model-produced and loosely structured, so parsing is heuristic
//! by design: anything unrecognizable is simply an empty result.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

static INGREDIENTS_HEADING: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^#{1,6}\s*.*\bingredients\b").ok());

static HEADING_LINE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^#{1,6}\s").ok());

static BULLET_LINE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\s*[-*]\s*(.*)$").ok());

static LEADING_HEADING_MARKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^#+\s+").ok());

/// Extract the bullet items under an "ingredients" heading
///
/// Finds the first heading line containing "ingredients" (any depth,
/// case-insensitive), captures lines until the next heading or end of text,
/// and keeps the `-`/`*` bullet items with markers and whitespace stripped.
/// Returns an empty vec when no heading is found.
#[must_use]
pub fn extract_ingredients(markdown: &str) -> Vec<String> {
    let (Some(heading), Some(any_heading), Some(bullet)) = (
        INGREDIENTS_HEADING.as_ref(),
        HEADING_LINE.as_ref(),
        BULLET_LINE.as_ref(),
    ) else {
        return Vec::new();
    };

    let mut lines = markdown.lines();
    if !lines.any(|line| heading.is_match(line)) {
        debug!("No ingredients heading found in recipe markdown");
        return Vec::new();
    }

    let mut ingredients = Vec::new();
    for line in lines {
        if any_heading.is_match(line) {
            break;
        }
        if let Some(captures) = bullet.captures(line) {
            let item = captures
                .get(1)
                .map(|m| m.as_str().trim())
                .unwrap_or_default();
            if !item.is_empty() {
                ingredients.push(item.to_owned());
            }
        }
    }
    ingredients
}

/// Derive a display title from recipe markdown
///
/// The title is the first line with any leading `#` heading markers
/// stripped; "Untitled Recipe" when that line is empty or identical to the
/// whole text.
#[must_use]
pub fn extract_title(markdown: &str) -> String {
    let first_line = markdown.lines().next().unwrap_or_default();
    let title = LEADING_HEADING_MARKER.as_ref().map_or_else(
        || first_line.to_owned(),
        |marker| marker.replace(first_line, "").into_owned(),
    );

    if title.is_empty() || title == markdown {
        "Untitled Recipe".to_owned()
    } else {
        title
    }
}

// ABOUTME: Tests for heuristic markdown ingredient extraction and title derivation
// ABOUTME: Exercises heading depths, bullet styles, section boundaries, and fallback behavior
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChefMate Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chefmate::extractor::{extract_ingredients, extract_title};

#[test]
fn test_basic_extraction() {
    let markdown = "## Ingredients\n- Egg\n- Flour\n## Steps\n1. Mix";
    assert_eq!(extract_ingredients(markdown), vec!["Egg", "Flour"]);
}

#[test]
fn test_no_ingredients_heading_yields_empty() {
    assert_eq!(extract_ingredients("no ingredients heading"), Vec::<String>::new());
    assert_eq!(extract_ingredients(""), Vec::<String>::new());
}

#[test]
fn test_heading_depth_and_case_are_flexible() {
    let markdown = "#### iNgReDiEnTs\n* Butter\n* Sugar";
    assert_eq!(extract_ingredients(markdown), vec!["Butter", "Sugar"]);
}

#[test]
fn test_decorated_heading_still_matches() {
    let markdown = "## **Ingredients:**\n- Salt\n";
    assert_eq!(extract_ingredients(markdown), vec!["Salt"]);
}

#[test]
fn test_capture_stops_at_next_heading() {
    let markdown = concat!(
        "# Tortilla\n",
        "## Ingredients\n",
        "- Potatoes\n",
        "- Eggs\n",
        "## Preparation\n",
        "- This bullet is a step, not an ingredient\n",
    );
    assert_eq!(extract_ingredients(markdown), vec!["Potatoes", "Eggs"]);
}

#[test]
fn test_non_bullet_lines_inside_section_are_skipped() {
    let markdown = "## Ingredients\nYou will need:\n- Rice\n1. numbered lines do not count\n- Peas\n";
    assert_eq!(extract_ingredients(markdown), vec!["Rice", "Peas"]);
}

#[test]
fn test_indented_bullets_and_surrounding_whitespace() {
    let markdown = "## Ingredients\n   - 2 cups flour  \n\t* 1 tsp salt\n";
    assert_eq!(extract_ingredients(markdown), vec!["2 cups flour", "1 tsp salt"]);
}

#[test]
fn test_empty_bullets_are_discarded() {
    let markdown = "## Ingredients\n- \n-\n- Milk\n";
    assert_eq!(extract_ingredients(markdown), vec!["Milk"]);
}

#[test]
fn test_section_running_to_end_of_text() {
    let markdown = "Intro text\n## Ingredients\n- Lemon\n- Honey";
    assert_eq!(extract_ingredients(markdown), vec!["Lemon", "Honey"]);
}

#[test]
fn test_title_strips_heading_markers() {
    assert_eq!(extract_title("# Lemon Cake\nBody"), "Lemon Cake");
    assert_eq!(extract_title("### Deep Heading\nBody"), "Deep Heading");
}

#[test]
fn test_title_keeps_plain_first_line_when_body_follows() {
    assert_eq!(extract_title("Lemon Cake\nBody"), "Lemon Cake");
}

#[test]
fn test_title_fallbacks() {
    assert_eq!(extract_title(""), "Untitled Recipe");
    assert_eq!(extract_title("\nBody"), "Untitled Recipe");
    assert_eq!(extract_title("one plain line only"), "Untitled Recipe");
}

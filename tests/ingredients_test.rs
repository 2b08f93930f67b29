// ABOUTME: Unit tests for the ingredient store validation rules
// ABOUTME: Covers trim, blank, duplicate, ordering, removal, and clear behavior
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChefMate Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chefmate::ingredients::{IngredientStore, ValidationError};

#[test]
fn test_add_trims_and_appends() {
    let mut store = IngredientStore::new();
    store.add("  Eggs  ").unwrap();
    assert_eq!(store.items(), ["Eggs"]);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_add_increases_count_by_exactly_one() {
    let mut store = IngredientStore::new();
    for (index, name) in ["Eggs", "Flour", "Milk"].iter().enumerate() {
        store.add(name).unwrap();
        assert_eq!(store.len(), index + 1);
        assert_eq!(
            store.items().iter().filter(|item| item == name).count(),
            1
        );
    }
}

#[test]
fn test_blank_input_is_rejected() {
    let mut store = IngredientStore::new();
    assert_eq!(store.add(""), Err(ValidationError::Blank));
    assert_eq!(store.add("   "), Err(ValidationError::Blank));
    assert!(store.is_empty());
}

#[test]
fn test_duplicate_is_rejected_case_sensitively() {
    let mut store = IngredientStore::new();
    store.add("Eggs").unwrap();

    assert_eq!(
        store.add("Eggs"),
        Err(ValidationError::Duplicate("Eggs".to_owned()))
    );
    // Whitespace differences collapse to the same value
    assert_eq!(
        store.add("  Eggs "),
        Err(ValidationError::Duplicate("Eggs".to_owned()))
    );
    assert_eq!(store.len(), 1);

    // Case differences are distinct entries, matching observed behavior
    store.add("eggs").unwrap();
    assert_eq!(store.len(), 2);
}

#[test]
fn test_insertion_order_is_preserved() {
    let mut store = IngredientStore::new();
    store.add("Rice").unwrap();
    store.add("Beans").unwrap();
    store.add("Onion").unwrap();
    assert_eq!(store.items(), ["Rice", "Beans", "Onion"]);
}

#[test]
fn test_remove_is_noop_when_absent() {
    let mut store = IngredientStore::new();
    store.add("Rice").unwrap();
    store.remove("Pasta");
    assert_eq!(store.items(), ["Rice"]);
}

#[test]
fn test_remove_deletes_single_match() {
    let mut store = IngredientStore::new();
    store.add("Rice").unwrap();
    store.add("Beans").unwrap();
    store.remove("Rice");
    assert_eq!(store.items(), ["Beans"]);
}

#[test]
fn test_clear_empties_the_list() {
    let mut store = IngredientStore::new();
    store.add("Rice").unwrap();
    store.add("Beans").unwrap();
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn test_contains_matches_trimmed_value() {
    let mut store = IngredientStore::new();
    store.add("Rice").unwrap();
    assert!(store.contains(" Rice "));
    assert!(!store.contains("rice"));
}

#[test]
fn test_validation_messages_are_user_facing() {
    assert_eq!(ValidationError::Blank.to_string(), "Please enter an ingredient.");
    assert_eq!(
        ValidationError::Duplicate("Eggs".to_owned()).to_string(),
        "\"Eggs\" is already in your ingredient list."
    );
}

// ABOUTME: Tests for the workspace state machine and its reducer-style event handling
// ABOUTME: Covers inline errors, clear-all semantics, generation outcomes, and history reload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChefMate Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chefmate::preferences::ANY;
use chefmate::workspace::{RecipeWorkspace, WorkspaceEvent};

#[test]
fn test_add_ingredient_success_clears_prior_error() {
    let mut workspace = RecipeWorkspace::new();
    assert!(workspace.add_ingredient("").is_err());
    assert!(workspace.error().is_some());

    workspace.add_ingredient("Eggs").unwrap();
    assert!(workspace.error().is_none());
    assert_eq!(workspace.ingredients().items(), ["Eggs"]);
}

#[test]
fn test_add_duplicate_sets_inline_error_and_keeps_list() {
    let mut workspace = RecipeWorkspace::new();
    workspace.add_ingredient("Eggs").unwrap();
    assert!(workspace.add_ingredient(" Eggs ").is_err());

    assert_eq!(
        workspace.error(),
        Some("\"Eggs\" is already in your ingredient list.")
    );
    assert_eq!(workspace.ingredients().len(), 1);
}

#[test]
fn test_clear_all_resets_ingredients_preferences_and_error() {
    let mut workspace = RecipeWorkspace::new();
    workspace.add_ingredient("Eggs").unwrap();
    workspace.preferences_mut().cuisine = "Italian".into();
    workspace.preferences_mut().dietary_restrictions = "vegan".into();
    let _ = workspace.add_ingredient("");

    workspace.clear_all();

    assert!(workspace.ingredients().is_empty());
    assert_eq!(workspace.preferences().cuisine, ANY);
    assert_eq!(workspace.preferences().dietary_restrictions, "");
    assert!(workspace.error().is_none());
}

#[test]
fn test_generation_success_updates_recipe_and_clears_loading() {
    let mut workspace = RecipeWorkspace::new();
    workspace.add_ingredient("Eggs").unwrap();

    workspace.begin_generation();
    assert!(workspace.is_loading());

    workspace.finish_generation(Ok("# Omelette\nSteps".to_owned()));
    assert!(!workspace.is_loading());
    assert_eq!(workspace.current_recipe(), Some("# Omelette\nSteps"));
    assert!(workspace.error().is_none());
}

#[test]
fn test_generation_failure_keeps_prior_recipe_and_ingredients() {
    let mut workspace = RecipeWorkspace::new();
    workspace.add_ingredient("Eggs").unwrap();
    workspace.finish_generation(Ok("# First Recipe\nBody".to_owned()));

    workspace.begin_generation();
    workspace.finish_generation(Err("Unable to generate recipe.".to_owned()));

    assert!(!workspace.is_loading());
    assert_eq!(workspace.current_recipe(), Some("# First Recipe\nBody"));
    assert_eq!(workspace.ingredients().items(), ["Eggs"]);
    assert_eq!(workspace.error(), Some("Unable to generate recipe."));
}

#[test]
fn test_load_recipe_repopulates_ingredients() {
    let mut workspace = RecipeWorkspace::new();
    workspace.add_ingredient("Stale Item").unwrap();

    workspace.load_recipe("# Pancakes\n## Ingredients\n- Flour\n- Milk\n## Steps\n1. Mix");

    assert_eq!(workspace.ingredients().items(), ["Flour", "Milk"]);
    assert!(workspace.current_recipe().unwrap().starts_with("# Pancakes"));
}

#[test]
fn test_load_recipe_without_ingredients_section_keeps_list() {
    let mut workspace = RecipeWorkspace::new();
    workspace.add_ingredient("Eggs").unwrap();

    workspace.load_recipe("# Mystery Dish\nNo sections at all");

    assert_eq!(workspace.ingredients().items(), ["Eggs"]);
    assert_eq!(
        workspace.current_recipe(),
        Some("# Mystery Dish\nNo sections at all")
    );
}

#[test]
fn test_apply_events_directly() {
    let mut workspace = RecipeWorkspace::new();
    workspace.apply(WorkspaceEvent::IngredientAdded("Rice".to_owned()));
    workspace.apply(WorkspaceEvent::IngredientAdded("Beans".to_owned()));
    workspace.apply(WorkspaceEvent::IngredientRemoved("Rice".to_owned()));

    assert_eq!(workspace.ingredients().items(), ["Beans"]);

    workspace.apply(WorkspaceEvent::GenerationStarted);
    workspace.apply(WorkspaceEvent::GenerationFailed("nope".to_owned()));
    assert!(!workspace.is_loading());
    assert_eq!(workspace.error(), Some("nope"));
}

#[test]
fn test_duplicate_bullets_collapse_on_load() {
    let mut workspace = RecipeWorkspace::new();
    workspace.load_recipe("## Ingredients\n- Egg\n- Egg\n- Flour\n## Steps\n1. Mix");
    assert_eq!(workspace.ingredients().items(), ["Egg", "Flour"]);
}

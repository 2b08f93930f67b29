// ABOUTME: Main library entry point for the ChefMate recipe suggestion engine
// ABOUTME: Provides ingredient state, Gemini-backed generation, and local recipe history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChefMate Contributors

#![deny(unsafe_code)]

//! # ChefMate
//!
//! A recipe-suggestion engine: give it the ingredients you have (plus
//! optional cuisine, meal-type, and dietary preferences) and it asks Google
//! Gemini for a markdown-formatted recipe, with ordered model fallback and
//! retry/backoff around the API call. Generated recipes can be persisted to
//! a local, capped history and reloaded later, repopulating the ingredient
//! list from the recipe body.
//!
//! ## Architecture
//!
//! - **`ingredients` / `preferences`**: validated workspace input state
//! - **`llm`**: provider abstraction and the Gemini implementation
//! - **`pipeline`**: prompt construction, backend fallback, retry/backoff
//! - **`storage` / `history`**: key-value persistence and the recipe history
//! - **`extractor`**: heuristic markdown ingredient/title recovery
//! - **`workspace`**: reducer-style application state tying it together
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chefmate::llm::GeminiProvider;
//! use chefmate::pipeline::RecipeRequestPipeline;
//! use chefmate::preferences::PreferenceSelection;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), chefmate::errors::AppError> {
//!     let provider = Arc::new(GeminiProvider::from_env()?);
//!     let pipeline = RecipeRequestPipeline::new(provider);
//!     let ingredients = vec!["Eggs".to_owned(), "Flour".to_owned()];
//!     let recipe = pipeline
//!         .generate(&ingredients, &PreferenceSelection::default())
//!         .await?;
//!     println!("{recipe}");
//!     Ok(())
//! }
//! ```

/// Environment-only application configuration
pub mod config;
/// Unified error handling
pub mod errors;
/// Markdown ingredient and title extraction
pub mod extractor;
/// Persisted recipe history
pub mod history;
/// Ingredient list state and validation
pub mod ingredients;
/// LLM provider abstraction and the Gemini implementation
pub mod llm;
/// Structured logging setup
pub mod logging;
/// Recipe generation pipeline with fallback and retry
pub mod pipeline;
/// Preference state
pub mod preferences;
/// Key-value storage backends
pub mod storage;
/// Reducer-style application state
pub mod workspace;

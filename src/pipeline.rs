// ABOUTME: Recipe generation pipeline with ordered model fallback and retry/backoff
// ABOUTME: Only transient rate-limit failures are retried; all other errors skip to the next backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChefMate Contributors

//! # Recipe Request Pipeline
//!
//! Turns the ingredient list and preferences into a prompt, then walks an
//! ordered list of backend descriptors. Each backend gets up to
//! `max_attempts` tries with exponential backoff on rate-limit failures;
//! any other failure moves straight to the next backend. Attempts execute
//! strictly in sequence, so at most one request is in flight.
//!
//! When every backend fails, the caller receives one synthesized
//! user-facing message. The last underlying error is logged, never shown.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::errors::{AppError, ErrorCode};
use crate::llm::prompts::{build_user_prompt, RECIPE_SYSTEM_PROMPT};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::preferences::PreferenceSelection;

/// Primary model, chosen for its higher quota limits
pub const PRIMARY_MODEL: &str = "gemini-1.5-flash";

/// Fallback model tried after the primary is exhausted
pub const FALLBACK_MODEL: &str = "gemini-pro";

/// Message returned when every backend has failed
const ALL_BACKENDS_EXHAUSTED_MESSAGE: &str = "Unable to generate recipe. The API rate limit \
    has been reached. Please try again in a few minutes or check your Gemini API key \
    configuration.";

/// One named backend the pipeline may route a request to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendDescriptor {
    /// Model identifier passed to the provider
    pub model: String,
}

impl BackendDescriptor {
    /// Create a descriptor for the given model
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

/// Retry policy applied uniformly to every backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum attempts per backend, including the first
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each subsequent retry
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Recipe generation pipeline over an ordered list of backends
pub struct RecipeRequestPipeline {
    provider: Arc<dyn LlmProvider>,
    backends: Vec<BackendDescriptor>,
    retry: RetryPolicy,
}

impl RecipeRequestPipeline {
    /// Create a pipeline with the default backend order and retry policy
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            backends: vec![
                BackendDescriptor::new(PRIMARY_MODEL),
                BackendDescriptor::new(FALLBACK_MODEL),
            ],
            retry: RetryPolicy::default(),
        }
    }

    /// Override the backend order
    #[must_use]
    pub fn with_backends(mut self, backends: Vec<BackendDescriptor>) -> Self {
        self.backends = backends;
        self
    }

    /// Override the retry policy
    #[must_use]
    pub const fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Configured backends in attempt order
    #[must_use]
    pub fn backends(&self) -> &[BackendDescriptor] {
        &self.backends
    }

    /// Generate a markdown recipe for the given ingredients and preferences
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::MissingRequiredField`] when the ingredient list
    /// is empty (no network call is made), or
    /// [`ErrorCode::ExternalServiceUnavailable`] with a user-facing message
    /// when every backend has failed.
    pub async fn generate(
        &self,
        ingredients: &[String],
        preferences: &PreferenceSelection,
    ) -> Result<String, AppError> {
        if ingredients.is_empty() {
            return Err(AppError::missing_field(
                "Please provide a list of ingredients.",
            ));
        }

        let user_prompt = build_user_prompt(ingredients, preferences);
        let mut last_error: Option<AppError> = None;

        for backend in &self.backends {
            debug!(model = %backend.model, "Attempting recipe generation");
            match self.attempt_backend(backend, &user_prompt).await {
                Ok(recipe) => {
                    info!(model = %backend.model, "Recipe generated");
                    return Ok(recipe);
                }
                Err(e) => {
                    warn!(model = %backend.model, error = %e, "Backend failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        if let Some(e) = last_error {
            warn!(error = %e, "All backends exhausted");
        }
        Err(AppError::new(
            ErrorCode::ExternalServiceUnavailable,
            ALL_BACKENDS_EXHAUSTED_MESSAGE,
        ))
    }

    /// Run one backend through the retry loop
    ///
    /// Rate-limit errors are retried up to the attempt budget with doubling
    /// backoff; any other error ends this backend's allotment immediately.
    async fn attempt_backend(
        &self,
        backend: &BackendDescriptor,
        user_prompt: &str,
    ) -> Result<String, AppError> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(RECIPE_SYSTEM_PROMPT),
            ChatMessage::user(user_prompt),
        ])
        .with_model(backend.model.clone());

        let mut delay = self.retry.base_delay;
        let mut attempt = 1;

        loop {
            match self.provider.complete(&request).await {
                Ok(response) => return Ok(response.content),
                Err(e) if e.code.is_transient() && attempt < self.retry.max_attempts => {
                    debug!(
                        model = %backend.model,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Rate limited, backing off before retry"
                    );
                    sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl std::fmt::Debug for RecipeRequestPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeRequestPipeline")
            .field("provider", &self.provider.name())
            .field("backends", &self.backends)
            .field("retry", &self.retry)
            .finish()
    }
}

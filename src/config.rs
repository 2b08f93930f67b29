// ABOUTME: Environment-only application configuration with fail-fast validation
// ABOUTME: Resolves API key, backend model order, retry knobs, and the history storage path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChefMate Contributors

//! # Application Configuration
//!
//! Configuration is environment-only; there is no config file. Missing
//! required values and malformed numeric values fail at startup rather
//! than falling back silently.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `GEMINI_API_KEY` | required |
//! | `CHEFMATE_MODELS` | `gemini-1.5-flash,gemini-pro` |
//! | `CHEFMATE_MAX_RETRIES` | `3` |
//! | `CHEFMATE_RETRY_BASE_MS` | `1000` |
//! | `CHEFMATE_HISTORY_PATH` | `<data dir>/chefmate/history.json` |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{AppError, ErrorCode};
use crate::llm::gemini::GEMINI_API_KEY_ENV;
use crate::pipeline::{BackendDescriptor, RetryPolicy, FALLBACK_MODEL, PRIMARY_MODEL};

/// Environment variable overriding the backend model order (comma-separated)
pub const MODELS_ENV: &str = "CHEFMATE_MODELS";

/// Environment variable overriding the per-backend attempt budget
pub const MAX_RETRIES_ENV: &str = "CHEFMATE_MAX_RETRIES";

/// Environment variable overriding the initial backoff delay in milliseconds
pub const RETRY_BASE_MS_ENV: &str = "CHEFMATE_RETRY_BASE_MS";

/// Environment variable overriding the history file location
pub const HISTORY_PATH_ENV: &str = "CHEFMATE_HISTORY_PATH";

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Gemini API key
    pub api_key: String,
    /// Ordered backend models, primary first
    pub backends: Vec<BackendDescriptor>,
    /// Retry policy applied per backend
    pub retry: RetryPolicy,
    /// Location of the history document
    pub history_path: PathBuf,
}

impl AppConfig {
    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns a config error when `GEMINI_API_KEY` is absent, when a
    /// numeric override does not parse, or when `CHEFMATE_MODELS` is set
    /// but contains no model names.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = env::var(GEMINI_API_KEY_ENV).map_err(|_| {
            AppError::new(
                ErrorCode::ConfigMissing,
                format!("{GEMINI_API_KEY_ENV} environment variable not set"),
            )
        })?;

        Ok(Self {
            api_key,
            backends: backends_from_env()?,
            retry: retry_from_env()?,
            history_path: history_path_from_env()?,
        })
    }
}

fn backends_from_env() -> Result<Vec<BackendDescriptor>, AppError> {
    let Ok(raw) = env::var(MODELS_ENV) else {
        return Ok(vec![
            BackendDescriptor::new(PRIMARY_MODEL),
            BackendDescriptor::new(FALLBACK_MODEL),
        ]);
    };

    let backends: Vec<BackendDescriptor> = raw
        .split(',')
        .map(str::trim)
        .filter(|model| !model.is_empty())
        .map(BackendDescriptor::new)
        .collect();

    if backends.is_empty() {
        return Err(AppError::config(format!(
            "{MODELS_ENV} is set but contains no model names"
        )));
    }
    Ok(backends)
}

fn retry_from_env() -> Result<RetryPolicy, AppError> {
    let mut retry = RetryPolicy::default();

    if let Ok(raw) = env::var(MAX_RETRIES_ENV) {
        retry.max_attempts = raw.parse().map_err(|_| {
            AppError::config(format!("{MAX_RETRIES_ENV} must be a positive integer: {raw:?}"))
        })?;
        if retry.max_attempts == 0 {
            return Err(AppError::config(format!("{MAX_RETRIES_ENV} must be at least 1")));
        }
    }

    if let Ok(raw) = env::var(RETRY_BASE_MS_ENV) {
        let millis: u64 = raw.parse().map_err(|_| {
            AppError::config(format!(
                "{RETRY_BASE_MS_ENV} must be milliseconds as an integer: {raw:?}"
            ))
        })?;
        retry.base_delay = Duration::from_millis(millis);
    }

    Ok(retry)
}

fn history_path_from_env() -> Result<PathBuf, AppError> {
    if let Ok(path) = env::var(HISTORY_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    dirs::data_dir()
        .map(|dir| dir.join("chefmate").join("history.json"))
        .ok_or_else(|| {
            AppError::config(format!(
                "no platform data directory available; set {HISTORY_PATH_ENV}"
            ))
        })
}

// ABOUTME: Structured logging setup with env-selected level and output format
// ABOUTME: Wraps tracing-subscriber with pretty, compact, and JSON formatters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChefMate Contributors

//! # Logging
//!
//! Structured logging via `tracing`. The filter honors `RUST_LOG` with a
//! `CHEFMATE_LOG_LEVEL` fallback; `CHEFMATE_LOG_FORMAT` selects the output
//! format (`pretty` by default, `compact` or `json` for constrained or
//! machine-read environments).

use std::env;

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable selecting the default log level
pub const LOG_LEVEL_ENV: &str = "CHEFMATE_LOG_LEVEL";

/// Environment variable selecting the output format
pub const LOG_FORMAT_ENV: &str = "CHEFMATE_LOG_FORMAT";

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
    /// JSON format for machine-read logs
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        match env::var(LOG_FORMAT_ENV).unwrap_or_default().to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Initialize the global tracing subscriber
///
/// # Errors
///
/// Returns an error if a subscriber has already been installed.
pub fn init_logging() -> Result<()> {
    let default_level = env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_owned());
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chefmate={default_level}")));

    match LogFormat::from_env() {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .try_init()?,
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(false))
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()?,
    }
    Ok(())
}

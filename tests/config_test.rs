// ABOUTME: Tests for environment-only configuration resolution and fail-fast validation
// ABOUTME: Runs serially because the cases mutate process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChefMate Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::time::Duration;

use serial_test::serial;

use chefmate::config::{
    AppConfig, HISTORY_PATH_ENV, MAX_RETRIES_ENV, MODELS_ENV, RETRY_BASE_MS_ENV,
};
use chefmate::errors::ErrorCode;
use chefmate::llm::gemini::GEMINI_API_KEY_ENV;

fn clear_chefmate_env() {
    for var in [
        GEMINI_API_KEY_ENV,
        MODELS_ENV,
        MAX_RETRIES_ENV,
        RETRY_BASE_MS_ENV,
        HISTORY_PATH_ENV,
    ] {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_missing_api_key_fails_fast() {
    clear_chefmate_env();
    let error = AppConfig::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigMissing);
    assert!(error.message.contains(GEMINI_API_KEY_ENV));
}

#[test]
#[serial]
fn test_defaults_when_only_api_key_is_set() {
    clear_chefmate_env();
    env::set_var(GEMINI_API_KEY_ENV, "test-key");
    env::set_var(HISTORY_PATH_ENV, "/tmp/chefmate-test/history.json");

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.api_key, "test-key");
    let models: Vec<&str> = config
        .backends
        .iter()
        .map(|backend| backend.model.as_str())
        .collect();
    assert_eq!(models, ["gemini-1.5-flash", "gemini-pro"]);
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.retry.base_delay, Duration::from_secs(1));

    clear_chefmate_env();
}

#[test]
#[serial]
fn test_model_list_override() {
    clear_chefmate_env();
    env::set_var(GEMINI_API_KEY_ENV, "test-key");
    env::set_var(HISTORY_PATH_ENV, "/tmp/chefmate-test/history.json");
    env::set_var(MODELS_ENV, " gemini-2.0-flash , gemini-1.5-pro ,");

    let config = AppConfig::from_env().unwrap();
    let models: Vec<&str> = config
        .backends
        .iter()
        .map(|backend| backend.model.as_str())
        .collect();
    assert_eq!(models, ["gemini-2.0-flash", "gemini-1.5-pro"]);

    clear_chefmate_env();
}

#[test]
#[serial]
fn test_empty_model_list_is_config_error() {
    clear_chefmate_env();
    env::set_var(GEMINI_API_KEY_ENV, "test-key");
    env::set_var(MODELS_ENV, " , ,");

    let error = AppConfig::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);

    clear_chefmate_env();
}

#[test]
#[serial]
fn test_retry_overrides() {
    clear_chefmate_env();
    env::set_var(GEMINI_API_KEY_ENV, "test-key");
    env::set_var(HISTORY_PATH_ENV, "/tmp/chefmate-test/history.json");
    env::set_var(MAX_RETRIES_ENV, "5");
    env::set_var(RETRY_BASE_MS_ENV, "250");

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.retry.max_attempts, 5);
    assert_eq!(config.retry.base_delay, Duration::from_millis(250));

    clear_chefmate_env();
}

#[test]
#[serial]
fn test_malformed_retry_values_are_rejected() {
    clear_chefmate_env();
    env::set_var(GEMINI_API_KEY_ENV, "test-key");
    env::set_var(MAX_RETRIES_ENV, "many");

    let error = AppConfig::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);

    env::set_var(MAX_RETRIES_ENV, "0");
    let error = AppConfig::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);

    clear_chefmate_env();
}

#[test]
#[serial]
fn test_history_path_override() {
    clear_chefmate_env();
    env::set_var(GEMINI_API_KEY_ENV, "test-key");
    env::set_var(HISTORY_PATH_ENV, "/tmp/elsewhere/history.json");

    let config = AppConfig::from_env().unwrap();
    assert_eq!(
        config.history_path,
        std::path::PathBuf::from("/tmp/elsewhere/history.json")
    );

    clear_chefmate_env();
}

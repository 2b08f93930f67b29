// ABOUTME: Google Gemini LLM provider implementation over the Generative Language API
// ABOUTME: Maps HTTP 429 responses to transient rate-limit errors the pipeline can retry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChefMate Contributors

//! # Gemini Provider
//!
//! Implementation of the [`LlmProvider`] trait for Google's Gemini models
//! via the `generateContent` endpoint.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio: <https://makersuite.google.com/app/apikey>
//!
//! System messages are sent in the dedicated `system_instruction` field;
//! assistant messages are mapped to Gemini's `model` role.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, MessageRole, TokenUsage};
use crate::errors::AppError;

/// Environment variable for the Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default model to use when a request does not name one
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    total: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini LLM provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    default_model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            default_model: DEFAULT_MODEL.to_owned(),
        }
    }

    /// Create a provider from the `GEMINI_API_KEY` environment variable
    ///
    /// # Errors
    ///
    /// Returns a config error if the environment variable is not set.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = env::var(GEMINI_API_KEY_ENV).map_err(|_| {
            AppError::config(format!("{GEMINI_API_KEY_ENV} environment variable not set"))
        })?;
        Ok(Self::new(api_key))
    }

    /// Set a custom default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    fn build_url(&self, model: &str) -> String {
        format!(
            "{API_BASE_URL}/{model}:generateContent?key={}",
            self.api_key
        )
    }

    /// Convert a chat request to the Gemini wire format
    ///
    /// System messages become the `system_instruction`; multiple system
    /// messages are concatenated with blank lines.
    fn build_gemini_request(request: &ChatRequest) -> GeminiRequest {
        let system_text = request
            .messages
            .iter()
            .filter(|message| message.role == MessageRole::System)
            .map(|message| message.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let contents = request
            .messages
            .iter()
            .filter(|message| message.role != MessageRole::System)
            .map(|message| GeminiContent {
                role: Some(match message.role {
                    MessageRole::Assistant => "model".to_owned(),
                    _ => "user".to_owned(),
                }),
                parts: vec![GeminiPart {
                    text: message.content.clone(),
                }],
            })
            .collect();

        let generation_config = if request.temperature.is_some() || request.max_tokens.is_some() {
            Some(GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            })
        } else {
            None
        };

        GeminiRequest {
            system_instruction: if system_text.is_empty() {
                None
            } else {
                Some(GeminiContent {
                    role: None,
                    parts: vec![GeminiPart { text: system_text }],
                })
            },
            contents,
            generation_config,
        }
    }

    /// Map a non-success API response to an application error
    ///
    /// HTTP 429 becomes a transient rate-limit error with a user-friendly
    /// message so the pipeline can retry with backoff.
    fn map_api_error(status: u16, body: &str) -> AppError {
        let api_message = serde_json::from_str::<GeminiResponse>(body)
            .ok()
            .and_then(|response| response.error)
            .map_or_else(|| body.to_owned(), |error| error.message);

        if status == 429 {
            let hint = Self::extract_retry_hint(&api_message)
                .map_or_else(String::new, |wait| format!(" Suggested wait: {wait}."));
            return AppError::rate_limited(format!(
                "Gemini quota exceeded, please try again shortly.{hint}"
            ));
        }
        AppError::external_service("Gemini", format!("API error (status {status}): {api_message}"))
    }

    /// Extract the wait time from Gemini quota messages
    ///
    /// Example input: "... Please retry in 6.406453963s."
    fn extract_retry_hint(message: &str) -> Option<String> {
        let after = message.split("Please retry in ").nth(1)?;
        let hint = after
            .split_whitespace()
            .next()?
            .trim_end_matches('.')
            .to_owned();
        if hint.is_empty() {
            None
        } else {
            Some(hint)
        }
    }

    fn parse_response(model: &str, body: &str) -> Result<ChatResponse, AppError> {
        let response: GeminiResponse = serde_json::from_str(body).map_err(|e| {
            error!(error = %e, "Failed to parse Gemini response");
            AppError::internal(format!("Failed to parse Gemini response: {e}"))
        })?;

        if let Some(error) = response.error {
            return Err(AppError::external_service("Gemini", error.message));
        }

        let candidate = response
            .candidates
            .and_then(|mut candidates| {
                if candidates.is_empty() {
                    None
                } else {
                    Some(candidates.remove(0))
                }
            })
            .ok_or_else(|| AppError::external_service("Gemini", "response had no candidates"))?;

        let content = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let usage = response.usage_metadata.map(|metadata| TokenUsage {
            prompt_tokens: metadata.prompt.unwrap_or(0),
            completion_tokens: metadata.candidates.unwrap_or(0),
            total_tokens: metadata.total.unwrap_or(0),
        });

        Ok(ChatResponse {
            content,
            model: model.to_owned(),
            usage,
            finish_reason: candidate.finish_reason,
        })
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn display_name(&self) -> &'static str {
        "Google Gemini"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::STREAMING | LlmCapabilities::JSON_MODE | LlmCapabilities::SYSTEM_MESSAGES
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let url = self.build_url(model);
        let gemini_request = Self::build_gemini_request(request);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service("Gemini", format!("HTTP request failed: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::external_service("Gemini", format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &body));
        }

        Self::parse_response(model, &body)
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("default_model", &self.default_model)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::errors::ErrorCode;
    use crate::llm::ChatMessage;

    #[test]
    fn test_system_messages_become_system_instruction() {
        let request = ChatRequest::new(vec![
            ChatMessage::system("You are a recipe assistant."),
            ChatMessage::user("I have eggs."),
        ]);
        let wire = GeminiProvider::build_gemini_request(&request);
        let instruction = wire.system_instruction.unwrap();
        assert_eq!(instruction.parts[0].text, "You are a recipe assistant.");
        assert_eq!(wire.contents.len(), 1);
        assert_eq!(wire.contents[0].role.as_deref(), Some("user"));
    }

    #[test]
    fn test_assistant_role_maps_to_model() {
        let request = ChatRequest::new(vec![
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
        ]);
        let wire = GeminiProvider::build_gemini_request(&request);
        assert_eq!(wire.contents[1].role.as_deref(), Some("model"));
    }

    #[test]
    fn test_429_maps_to_rate_limited() {
        let body = r#"{"error":{"message":"Quota exceeded. Please retry in 6.4s."}}"#;
        let error = GeminiProvider::map_api_error(429, body);
        assert_eq!(error.code, ErrorCode::ExternalRateLimited);
        assert!(error.message.contains("6.4s"));
    }

    #[test]
    fn test_other_status_maps_to_service_error() {
        let error = GeminiProvider::map_api_error(500, "oops");
        assert_eq!(error.code, ErrorCode::ExternalServiceError);
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let body = r##"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "# Frittata\n"}, {"text": "Steps"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 20, "totalTokenCount": 30}
        }"##;
        let response = GeminiProvider::parse_response("gemini-1.5-flash", body).unwrap();
        assert_eq!(response.content, "# Frittata\nSteps");
        assert_eq!(response.usage.unwrap().total_tokens, 30);
        assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
    }

    #[test]
    fn test_parse_response_without_candidates_is_error() {
        let error = GeminiProvider::parse_response("gemini-1.5-flash", "{}").unwrap_err();
        assert_eq!(error.code, ErrorCode::ExternalServiceError);
    }
}

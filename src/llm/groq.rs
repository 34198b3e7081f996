// ABOUTME: Groq LLM provider implementation for recipe generation
// ABOUTME: Talks to Groq's OpenAI-compatible chat completions endpoint with configurable base URL and model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

//! # Groq Provider
//!
//! Implementation of the `LlmProvider` trait for Groq's OpenAI-compatible API.
//!
//! ## Configuration
//!
//! - `GROQ_API_KEY`: API key from the Groq Console
//! - `LLM_BASE_URL`: defaults to `https://api.groq.com/openai/v1`
//! - `LLM_MODEL`: defaults to `openai/gpt-oss-20b`
//! - `LLM_TIMEOUT_SECS`: per-request timeout, defaults to 60
//!
//! Any OpenAI-compatible endpoint works when `LLM_BASE_URL` points at it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use super::{ChatChoice, ChatMessage, ChatRequest, ChatResponse, LlmProvider, TokenUsage};
use crate::config::LlmConfig;
use crate::constants::{defaults, limits};
use crate::errors::AppError;

/// Service name used in error messages
const SERVICE: &str = "Groq";

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct GroqRequest<'a> {
    model: &'a str,
    messages: Vec<GroqMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct GroqMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatMessage> for GroqMessage<'a> {
    fn from(msg: &'a ChatMessage) -> Self {
        Self {
            role: msg.role.as_str(),
            content: &msg.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    #[serde(default)]
    choices: Vec<GroqChoice>,
    #[serde(default)]
    usage: Option<GroqUsage>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    #[serde(default)]
    message: Option<GroqResponseMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

#[derive(Debug, Deserialize)]
struct GroqErrorResponse {
    error: GroqErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GroqErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Groq LLM provider
pub struct GroqProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GroqProvider {
    /// Create a provider for the public Groq endpoint with default model and timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(api_key: impl Into<String>) -> Result<Self, AppError> {
        Self::from_config(&LlmConfig {
            api_key: Some(api_key.into()),
            base_url: defaults::LLM_BASE_URL.to_owned(),
            model: defaults::LLM_MODEL.to_owned(),
            timeout_secs: defaults::LLM_TIMEOUT_SECS,
        })
    }

    /// Create a provider from server configuration
    ///
    /// A missing API key is accepted here and reported on the first completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn from_config(config: &LlmConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            model: config.model.clone(),
        })
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    fn api_key(&self) -> Result<&str, AppError> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::config(
                "Missing GROQ_API_KEY environment variable. Get your API key from https://console.groq.com/keys",
            )
        })
    }

    /// Parse error response from Groq API
    fn parse_error_response(status: StatusCode, body: &str) -> AppError {
        let Ok(error_response) = serde_json::from_str::<GroqErrorResponse>(body) else {
            return AppError::external_service(
                SERVICE,
                format!(
                    "API error ({status}): {}",
                    body.chars()
                        .take(limits::ERROR_BODY_PREVIEW_CHARS)
                        .collect::<String>()
                ),
            );
        };

        let message = error_response.error.message;
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::external_auth_failed(
                SERVICE,
                format!("API authentication failed: {message}"),
            ),
            StatusCode::TOO_MANY_REQUESTS => {
                AppError::external_rate_limited(SERVICE, format!("Rate limit exceeded: {message}"))
            }
            StatusCode::BAD_REQUEST => {
                AppError::external_service(SERVICE, format!("Request rejected: {message}"))
            }
            _ => {
                let error_type = error_response
                    .error
                    .error_type
                    .unwrap_or_else(|| "unknown".to_owned());
                AppError::external_service(SERVICE, format!("{error_type} - {message}"))
            }
        }
    }
}

#[async_trait]
impl LlmProvider for GroqProvider {
    fn name(&self) -> &'static str {
        "groq"
    }

    fn display_name(&self) -> &'static str {
        "Groq"
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let api_key = self.api_key()?;
        let model = request.model.as_deref().unwrap_or(&self.model);

        debug!("Sending chat completion request to Groq");

        let groq_request = GroqRequest {
            model,
            messages: request.messages.iter().map(GroqMessage::from).collect(),
            stream: false,
        };

        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .bearer_auth(api_key)
            .json(&groq_request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to Groq API: {}", e);
                AppError::external_service(SERVICE, format!("Failed to connect: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read Groq API response: {}", e);
            AppError::external_service(SERVICE, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            warn!(%status, "Groq API returned an error status");
            return Err(Self::parse_error_response(status, &body));
        }

        let groq_response: GroqResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse Groq API response: {}", e);
            AppError::external_service(SERVICE, format!("Failed to parse response: {e}"))
        })?;

        let choices: Vec<ChatChoice> = groq_response
            .choices
            .into_iter()
            .map(|choice| ChatChoice {
                content: choice.message.and_then(|message| message.content),
                finish_reason: choice.finish_reason,
            })
            .collect();

        if choices.is_empty() {
            warn!("Groq API returned no choices");
        }
        debug!(
            choices = choices.len(),
            chars = choices
                .first()
                .and_then(|c| c.content.as_deref())
                .map_or(0, str::len),
            "Received response from Groq"
        );

        Ok(ChatResponse {
            choices,
            model: groq_response.model.unwrap_or_else(|| model.to_owned()),
            usage: groq_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
        })
    }
}

//! OpenAI chat-completions backend.
//!
//! A thin reqwest client for the hosted translation service. Error mapping
//! is the interesting part: HTTP statuses are folded into
//! [`TranslationError`] variants so the retry loop upstream can distinguish
//! transient overload (429, 5xx) from permanent failures (bad key, 400)
//! without ever inspecting status codes itself.

use crate::error::{PipelineError, TranslationError};
use crate::providers::TranslationProvider;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com";
const PROVIDER_NAME: &str = "openai";

/// OpenAI client for the chat completions API.
pub struct OpenAiProvider {
    /// HTTP client with the per-call timeout baked in.
    client: Client,
    /// API key for bearer authentication.
    api_key: String,
    /// Chat model identifier, e.g. "gpt-4.1-mini".
    model: String,
    /// Base URL; empty means the public API.
    endpoint: String,
    /// Per-call timeout, kept for error reporting.
    timeout_secs: u64,
}

/// Chat completion request body.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

/// One chat message.
#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat completion response body (the fields we read).
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new provider.
    ///
    /// `endpoint` overrides the public API base URL (proxies, compatible
    /// servers); pass `None` for the default. `timeout_secs` bounds each
    /// HTTP call end to end.
    ///
    /// # Errors
    /// [`PipelineError::InvalidConfig`] when the HTTP client cannot be
    /// initialised (TLS backend failure). Falling back to a default client
    /// would drop the per-call timeout, so construction fails instead.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                PipelineError::InvalidConfig(format!("Failed to initialise HTTP client: {e}"))
            })?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.unwrap_or_default(),
            timeout_secs,
        })
    }

    fn api_url(&self) -> String {
        let base = if self.endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{base}/v1/chat/completions")
    }

    /// Fold a reqwest transport error into a [`TranslationError`].
    fn map_transport_error(&self, e: reqwest::Error) -> TranslationError {
        if e.is_timeout() {
            TranslationError::Timeout {
                provider: PROVIDER_NAME.to_string(),
                secs: self.timeout_secs,
            }
        } else {
            TranslationError::Network {
                provider: PROVIDER_NAME.to_string(),
                detail: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl TranslationProvider for OpenAiProvider {
    async fn translate(&self, prompt: &str) -> Result<String, TranslationError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        debug!(model = %self.model, prompt_chars = prompt.chars().count(), "sending translation request");

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable error body>".to_string());

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TranslationError::Auth {
                    provider: PROVIDER_NAME.to_string(),
                    detail: body,
                },
                StatusCode::TOO_MANY_REQUESTS => TranslationError::RateLimited {
                    provider: PROVIDER_NAME.to_string(),
                    retry_after_secs: retry_after,
                },
                _ => TranslationError::Api {
                    provider: PROVIDER_NAME.to_string(),
                    status: status.as_u16(),
                    message: body,
                },
            });
        }

        let parsed: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| TranslationError::MalformedResponse {
                    provider: PROVIDER_NAME.to_string(),
                    detail: e.to_string(),
                })?;

        // A successful call with no text is an empty translation, not an
        // error; the assembler drops empty paragraphs gracefully.
        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_api_url() {
        let p = OpenAiProvider::new("key", "gpt-4.1-mini", None, 120).unwrap();
        assert_eq!(p.api_url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn endpoint_override_trims_trailing_slash() {
        let p = OpenAiProvider::new(
            "key",
            "gpt-4.1-mini",
            Some("http://localhost:8080/".to_string()),
            120,
        )
        .unwrap();
        assert_eq!(p.api_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn constructor_keeps_the_configured_timeout() {
        let p = OpenAiProvider::new("key", "gpt-4.1-mini", None, 7).unwrap();
        assert_eq!(p.timeout_secs, 7);
    }

    #[test]
    fn request_serialises_single_user_message() {
        let request = ChatRequest {
            model: "gpt-4.1-mini".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "prompt".to_string(),
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4.1-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "prompt");
    }

    #[test]
    fn response_with_missing_content_parses_to_none() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }
}

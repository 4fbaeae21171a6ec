//! OpenAI-compatible chat-completion invoker.
//!
//! Gemini exposes this surface under `/v1beta/openai/`; any other
//! compatible endpoint works by changing the base URL.

use super::{validate_messages, InvocationError, ModelInvoker, ModelMessage};
use crate::config::ModelApiConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use service_core::observability::TracedClientExt;
use std::time::Duration;

/// Chat-completion invoker configuration.
#[derive(Clone)]
pub struct ChatCompletionsConfig {
    pub api_key: Secret<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl From<&ModelApiConfig> for ChatCompletionsConfig {
    fn from(config: &ModelApiConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        }
    }
}

/// Invoker backed by a remote `/chat/completions` endpoint.
pub struct ChatCompletionsInvoker {
    config: ChatCompletionsConfig,
    client: Client,
}

impl ChatCompletionsInvoker {
    pub fn new(config: ChatCompletionsConfig) -> Result<Self, InvocationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| InvocationError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ModelInvoker for ChatCompletionsInvoker {
    async fn invoke(
        &self,
        model_id: &str,
        messages: &[ModelMessage],
    ) -> Result<String, InvocationError> {
        validate_messages(messages)?;

        let request = ChatCompletionRequest {
            model: model_id,
            messages,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        tracing::debug!(
            model = %model_id,
            message_count = messages.len(),
            "Sending request to chat completion API"
        );

        let response = self
            .client
            .traced_post(&self.completions_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| InvocationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => InvocationError::RateLimited,
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    InvocationError::Unauthorized(error_text)
                }
                _ => InvocationError::Api {
                    status: status.as_u16(),
                    body: error_text,
                },
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            InvocationError::MalformedResponse(format!("Failed to parse response: {}", e))
        })?;

        if let Some(usage) = &completion.usage {
            tracing::info!(
                model = %model_id,
                input_tokens = usage.prompt_tokens.unwrap_or(0),
                output_tokens = usage.completion_tokens.unwrap_or(0),
                "Chat completion finished"
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                InvocationError::MalformedResponse("completion has no message content".to_string())
            })
    }
}

// ============================================================================
// Chat Completion API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ModelMessage],
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: Option<u32>,
    completion_tokens: Option<u32>,
}

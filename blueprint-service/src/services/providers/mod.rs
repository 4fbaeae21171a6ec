//! Model invoker abstractions and implementations.
//!
//! Handlers hold an `Arc<dyn ModelInvoker>`, so the real chat-completion
//! backend and the mock used in tests are interchangeable.

pub mod chat_completions;
pub mod mock;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use thiserror::Error;

/// Error type for invoker operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvocationError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Model API rejected the credential: {0}")]
    Unauthorized(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Model API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}

/// One element of a multimodal message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    /// Inline image as a `data:<mime>;base64,<payload>` URI.
    pub fn image(mime_type: &str, bytes: &[u8]) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: data_uri(mime_type, bytes),
            },
        }
    }
}

/// A single conversation turn sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

impl ModelMessage {
    /// The message shape every endpoint sends: one instruction, one image.
    pub fn user_with_image(instruction: &str, mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            role: "user".to_string(),
            content: vec![
                ContentPart::text(instruction),
                ContentPart::image(mime_type, bytes),
            ],
        }
    }
}

pub fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Check that at least one message carries exactly one text instruction and
/// exactly one data-URI image.
pub fn validate_messages(messages: &[ModelMessage]) -> Result<(), InvocationError> {
    let has_instruction_with_image = messages.iter().any(|message| {
        let texts = message
            .content
            .iter()
            .filter(|part| matches!(part, ContentPart::Text { .. }))
            .count();
        let images = message
            .content
            .iter()
            .filter(|part| {
                matches!(part, ContentPart::ImageUrl { image_url }
                    if image_url.url.starts_with("data:") && image_url.url.contains(";base64,"))
            })
            .count();
        texts == 1 && images == 1
    });

    if has_instruction_with_image {
        Ok(())
    } else {
        Err(InvocationError::InvalidRequest(
            "expected a message with one text instruction and one data URI image".to_string(),
        ))
    }
}

/// Backend that turns a conversation into the model's raw text answer.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Run one completion and return the first choice's content.
    async fn invoke(
        &self,
        model_id: &str,
        messages: &[ModelMessage],
    ) -> Result<String, InvocationError>;
}

//! Turning the model's raw text into something an endpoint can return.

use serde_json::{json, Value};

/// Message used when an endpoint insists on JSON and did not get it.
pub const INVALID_JSON_MESSAGE: &str = "Failed to generate valid JSON";

/// What to do when the model's text is not valid JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Reduce the text to `{"result": <contains "true">}`.
    BooleanResult,
    /// Report an error and keep the raw text for diagnosis.
    ErrorEnvelope,
}

/// Outcome of normalizing one model response.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelResult {
    Json(Value),
    Error {
        message: String,
        details: String,
        raw: String,
    },
}

/// Parse `raw` strictly as JSON, applying `fallback` on failure.
pub fn normalize(raw: &str, fallback: Fallback) -> ModelResult {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => ModelResult::Json(value),
        Err(parse_error) => {
            tracing::warn!(
                fallback = ?fallback,
                error = %parse_error,
                raw = %truncate(raw, 500),
                "Model returned invalid JSON"
            );

            match fallback {
                Fallback::BooleanResult => ModelResult::Json(json!({
                    "result": raw.to_ascii_lowercase().contains("true")
                })),
                Fallback::ErrorEnvelope => ModelResult::Error {
                    message: INVALID_JSON_MESSAGE.to_string(),
                    details: parse_error.to_string(),
                    raw: raw.to_string(),
                },
            }
        }
    }
}

/// First `max_chars` characters of `text`, on a char boundary.
pub fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

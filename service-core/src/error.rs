use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    /// A call to a third-party API failed. The message is shown to the caller.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// A third-party API answered, but not with something we can relay.
    #[error("{message}: {details}")]
    MalformedOutput {
        message: String,
        details: String,
        raw: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

/// JSON error envelope returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::InternalError(_)
            | AppError::Upstream(_)
            | AppError::MalformedOutput { .. }
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::BadRequest(err) => ErrorResponse {
                error: err.to_string(),
                details: None,
                raw_response: None,
            },
            AppError::PayloadTooLarge(msg) | AppError::Upstream(msg) => ErrorResponse {
                error: msg,
                details: None,
                raw_response: None,
            },
            AppError::InternalError(err) => ErrorResponse {
                error: "Internal server error".to_string(),
                details: Some(format!("{:#}", err)),
                raw_response: None,
            },
            AppError::MalformedOutput {
                message,
                details,
                raw,
            } => ErrorResponse {
                error: message,
                details: Some(details),
                raw_response: Some(raw),
            },
            AppError::ConfigError(err) => ErrorResponse {
                error: "Configuration error".to_string(),
                details: Some(err.to_string()),
                raw_response: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

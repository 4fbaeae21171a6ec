use crate::models::{report, Endpoint};
use crate::services::{extract_form, image_meta, normalize, ModelMessage, ModelResult};
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::rejection::BytesRejection,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde_json::Value;
use service_core::error::AppError;

const SCHEMA_MISMATCH_MESSAGE: &str = "Response did not match the expected schema";

/// POST on an analysis endpoint: upload -> model -> JSON.
pub async fn analyze(
    state: AppState,
    endpoint: Endpoint,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, AppError> {
    let body = body.map_err(|rejection| {
        tracing::info!(endpoint = endpoint.name(), error = %rejection.body_text(), "Rejected request body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(format!(
                "Upload exceeds the {} byte limit",
                state.config.max_upload_bytes
            ))
        } else {
            AppError::BadRequest(anyhow::anyhow!(rejection.body_text()))
        }
    })?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let form = extract_form(body, content_type).await.map_err(|e| {
        tracing::info!(endpoint = endpoint.name(), error = %e, "Rejected upload");
        AppError::BadRequest(anyhow::Error::new(e))
    })?;
    let file = &form.file;

    tracing::info!(
        endpoint = endpoint.name(),
        mime_type = %file.mime_type,
        bytes = file.bytes.len(),
        "Blueprint received"
    );

    let raw = if state.config.mock_responses {
        endpoint.fixture().to_string()
    } else {
        let model = endpoint.model(&state.config.models);
        let message = ModelMessage::user_with_image(
            &endpoint.instruction(&form.fields),
            &file.mime_type,
            &file.bytes,
        );

        state
            .invoker
            .invoke(model, std::slice::from_ref(&message))
            .await
            .map_err(|e| {
                tracing::error!(endpoint = endpoint.name(), model = %model, error = %e, "Model call failed");
                AppError::Upstream(e.to_string())
            })?
    };

    let mut value = match normalize(&raw, endpoint.fallback()) {
        ModelResult::Json(value) => value,
        ModelResult::Error {
            message,
            details,
            raw,
        } => {
            return Err(AppError::MalformedOutput {
                message,
                details,
                raw,
            })
        }
    };

    endpoint.check_schema(&value).map_err(|details| {
        tracing::warn!(endpoint = endpoint.name(), error = %details, "Model output failed schema check");
        AppError::MalformedOutput {
            message: SCHEMA_MISMATCH_MESSAGE.to_string(),
            details,
            raw: raw.clone(),
        }
    })?;

    if endpoint.reports_image_metadata() {
        let dimensions = image_meta::dimensions(&file.bytes).filter(|d| !d.is_empty());
        if let (Some(dimensions), Some(root)) = (dimensions, value.as_object_mut()) {
            root.insert("imageMetadata".to_string(), serde_json::json!(dimensions));
        }
    }

    if endpoint == Endpoint::GenerateReport {
        report::stamp_blueprint(
            &mut value,
            file.file_name.as_deref(),
            chrono::Local::now().date_naive(),
        );
    }

    tracing::info!(endpoint = endpoint.name(), "Blueprint analysis complete");

    Ok(Json(value))
}

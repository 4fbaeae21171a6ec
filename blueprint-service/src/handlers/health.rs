use crate::models::Endpoint;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "blueprint-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Nothing to wait on: the model API is only reached per request.
pub async fn readiness_check() -> impl IntoResponse {
    StatusCode::OK
}

/// GET on an analysis endpoint: a liveness message for that endpoint.
pub async fn endpoint_status(endpoint: Endpoint) -> impl IntoResponse {
    Json(json!({ "status": endpoint.status_message() }))
}

/// Bare OPTIONS request. CORS headers come from the router's CorsLayer.
pub async fn preflight() -> impl IntoResponse {
    StatusCode::OK
}

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use blueprint_service::config::{BlueprintConfig, ModelApiConfig, ModelConfig};
use blueprint_service::services::providers::mock::MockInvoker;
use blueprint_service::startup::{build_router, AppState};
use image::{ImageFormat, RgbImage};
use secrecy::Secret;
use serde_json::Value;
use service_core::config::{Config as CoreConfig, Environment};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

pub const BOUNDARY: &str = "----BlueprintTestBoundary7MA4YWxkTrZu0gW";

pub fn test_config(mock_responses: bool) -> BlueprintConfig {
    BlueprintConfig {
        common: CoreConfig {
            port: 0,
            environment: Environment::Dev,
        },
        model_api: ModelApiConfig {
            api_key: Secret::new("test-api-key".to_string()),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(5),
        },
        models: ModelConfig {
            rooms_model: "rooms-model".to_string(),
            validation_model: "validation-model".to_string(),
            report_model: "report-model".to_string(),
        },
        mock_responses,
        max_upload_bytes: 1024 * 1024,
    }
}

pub fn router_with(invoker: Arc<MockInvoker>) -> Router {
    router_with_config(test_config(false), invoker)
}

pub fn router_with_config(config: BlueprintConfig, invoker: Arc<MockInvoker>) -> Router {
    build_router(AppState { config, invoker })
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

/// One part of a hand-built multipart body.
pub struct Part<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(file_name) = part.file_name {
            disposition.push_str(&format!("; filename=\"{}\"", file_name));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// A body holding a single file field named `file`.
pub fn file_upload(file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    multipart_body(&[Part {
        name: "file",
        file_name: Some(file_name),
        content_type: Some(content_type),
        data,
    }])
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Vec::new();
    RgbImage::new(width, height)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .expect("Failed to encode PNG");
    buffer
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response is not JSON")
    };
    (status, body)
}

pub async fn post_upload(router: Router, path: &str, body: Vec<u8>) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, multipart_content_type())
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

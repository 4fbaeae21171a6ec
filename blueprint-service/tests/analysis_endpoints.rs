//! Upload -> model -> JSON pipeline tests, driven through the router with a
//! mock invoker.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use blueprint_service::models::Endpoint;
use blueprint_service::services::providers::mock::MockInvoker;
use blueprint_service::services::providers::ContentPart;
use blueprint_service::services::InvocationError;
use common::Part;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

fn instruction_and_image(invoker: &MockInvoker) -> (String, String) {
    let calls = invoker.calls();
    assert_eq!(calls.len(), 1, "expected exactly one model call");

    let mut text = None;
    let mut url = None;
    for part in &calls[0].messages[0].content {
        match part {
            ContentPart::Text { text: t } => text = Some(t.clone()),
            ContentPart::ImageUrl { image_url } => url = Some(image_url.url.clone()),
        }
    }
    (text.expect("no text part"), url.expect("no image part"))
}

#[tokio::test]
async fn part_without_filename_is_rejected() {
    let invoker = Arc::new(MockInvoker::replying(r#"{"result": true}"#));
    let png = common::png(1, 1);
    let body = common::multipart_body(&[Part {
        name: "file",
        file_name: None,
        content_type: Some("image/png"),
        data: &png,
    }]);

    let (status, body) =
        common::post_upload(common::router_with(invoker.clone()), "/api/validateBlueprint", body)
            .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No file found in request"}));
    assert!(invoker.calls().is_empty());
}

#[tokio::test]
async fn empty_body_is_rejected_without_calling_the_model() {
    let invoker = Arc::new(MockInvoker::replying(r#"{"result": true}"#));

    let (status, body) =
        common::post_upload(common::router_with(invoker.clone()), "/api/detectRooms", Vec::new())
            .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No data received"}));
    assert!(invoker.calls().is_empty());
}

#[tokio::test]
async fn non_multipart_body_is_rejected() {
    let invoker = Arc::new(MockInvoker::replying(r#"{"result": true}"#));

    let (status, body) = common::send(
        common::router_with(invoker.clone()),
        Request::builder()
            .method("POST")
            .uri("/api/validateBlueprint")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"file": "x"}"#))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Malformed multipart body"));
    assert!(invoker.calls().is_empty());
}

#[tokio::test]
async fn mixed_multipart_upload_is_accepted() {
    let invoker = Arc::new(MockInvoker::replying(r#"{"result": true}"#));
    let png = common::png(1, 1);

    let (status, body) = common::send(
        common::router_with(invoker.clone()),
        Request::builder()
            .method("POST")
            .uri("/api/validateBlueprint")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/mixed; boundary={}", common::BOUNDARY),
            )
            .body(Body::from(common::file_upload("plan.png", "image/png", &png)))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": true}));
    assert_eq!(invoker.calls().len(), 1);
}

#[tokio::test]
async fn validation_returns_model_json() {
    let invoker = Arc::new(MockInvoker::replying(r#"{"result": true}"#));
    let png = common::png(1, 1);

    let (status, body) = common::post_upload(
        common::router_with(invoker.clone()),
        "/api/validateBlueprint",
        common::file_upload("plan.png", "image/png", &png),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": true}));

    let calls = invoker.calls();
    assert_eq!(calls[0].model_id, "validation-model");
    assert_eq!(calls[0].messages.len(), 1);
    assert_eq!(calls[0].messages[0].role, "user");

    let (_, url) = instruction_and_image(&invoker);
    assert!(url.starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn validation_reduces_prose_to_boolean() {
    for (reply, expected) in [("Yes, this is true.", true), ("No, it is a photo.", false)] {
        let invoker = Arc::new(MockInvoker::replying(reply));

        let (status, body) = common::post_upload(
            common::router_with(invoker),
            "/api/validateBlueprint",
            common::file_upload("plan.png", "image/png", b"not really a png"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"result": expected}), "reply: {}", reply);
    }
}

#[tokio::test]
async fn missing_file_content_type_defaults_to_jpeg() {
    let invoker = Arc::new(MockInvoker::replying(r#"{"result": false}"#));
    let body = common::multipart_body(&[Part {
        name: "file",
        file_name: Some("scan"),
        content_type: None,
        data: b"\xff\xd8\xff\xe0",
    }]);

    let (status, _) =
        common::post_upload(common::router_with(invoker.clone()), "/api/validateBlueprint", body)
            .await;

    assert_eq!(status, StatusCode::OK);
    let (_, url) = instruction_and_image(&invoker);
    assert!(url.starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn detect_rooms_relays_json_unchanged() {
    let raw = Endpoint::DetectRooms.fixture();
    let invoker = Arc::new(MockInvoker::replying(raw));

    let (status, body) = common::post_upload(
        common::router_with(invoker.clone()),
        "/api/detectRooms",
        common::file_upload("plan.png", "image/png", &common::png(4, 4)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let expected: Value = serde_json::from_str(raw).unwrap();
    assert_eq!(body, expected);
    assert_eq!(invoker.calls()[0].model_id, "rooms-model");
}

#[tokio::test]
async fn detect_rooms_reports_invalid_json_with_raw_text() {
    let invoker = Arc::new(MockInvoker::replying("Sorry, I cannot"));

    let (status, body) = common::post_upload(
        common::router_with(invoker),
        "/api/detectRooms",
        common::file_upload("plan.png", "image/png", &common::png(1, 1)),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate valid JSON");
    assert_eq!(body["raw_response"], "Sorry, I cannot");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn output_in_the_wrong_shape_is_rejected() {
    let invoker = Arc::new(MockInvoker::replying(r#"{"result": true}"#));

    let (status, body) = common::post_upload(
        common::router_with(invoker),
        "/api/detectRoomShapes",
        common::file_upload("plan.png", "image/png", &common::png(1, 1)),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Response did not match the expected schema");
    assert_eq!(body["raw_response"], r#"{"result": true}"#);
}

#[tokio::test]
async fn model_failure_is_an_internal_error() {
    let invoker = Arc::new(MockInvoker::failing(InvocationError::RateLimited));

    let (status, body) = common::post_upload(
        common::router_with(invoker),
        "/api/detectRooms",
        common::file_upload("plan.png", "image/png", &common::png(1, 1)),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Rate limited"}));
}

#[tokio::test]
async fn detect_rooms_v2_adds_image_metadata() {
    let invoker = Arc::new(MockInvoker::replying(Endpoint::DetectRoomsV2.fixture()));

    let (status, body) = common::post_upload(
        common::router_with(invoker),
        "/api/detectRoomsV2",
        common::file_upload("plan.png", "image/png", &common::png(40, 30)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imageMetadata"], json!({"width": 40, "height": 30}));
    assert!(body["rooms"].as_array().is_some_and(|rooms| !rooms.is_empty()));
}

#[tokio::test]
async fn detect_rooms_v2_skips_metadata_for_undecodable_images() {
    let invoker = Arc::new(MockInvoker::replying(Endpoint::DetectRoomsV2.fixture()));

    let (status, body) = common::post_upload(
        common::router_with(invoker),
        "/api/detectRoomsV2",
        common::file_upload("plan.png", "image/png", b"garbage"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("imageMetadata").is_none());
}

#[tokio::test]
async fn report_is_stamped_with_file_name_and_date() {
    let invoker = Arc::new(MockInvoker::replying(Endpoint::GenerateReport.fixture()));
    let png = common::png(2, 2);
    let body = common::multipart_body(&[
        Part {
            name: "rooms",
            file_name: None,
            content_type: None,
            data: br#"{"rooms": [{"id": 1, "name": "Lobby"}]}"#,
        },
        Part {
            name: "file",
            file_name: Some("Floor Plan.png"),
            content_type: Some("image/png"),
            data: &png,
        },
    ]);

    let (status, body) =
        common::post_upload(common::router_with(invoker.clone()), "/api/generateReport", body)
            .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["blueprint"]["name"], "Floor Plan.png");
    assert_eq!(body["blueprint"]["facilityType"], "Administrative Office");

    let date = body["blueprint"]["uploadDate"].as_str().unwrap();
    assert_eq!(date.len(), 10);
    assert_eq!(date.matches('/').count(), 2);

    assert_eq!(invoker.calls()[0].model_id, "report-model");
    let (instruction, _) = instruction_and_image(&invoker);
    assert!(instruction.contains(r#""name": "Lobby""#));
}

#[tokio::test]
async fn mock_mode_serves_fixtures_without_the_model() {
    for endpoint in Endpoint::ALL {
        let invoker = Arc::new(MockInvoker::failing(InvocationError::Network(
            "unreachable".to_string(),
        )));
        let router = common::router_with_config(common::test_config(true), invoker.clone());

        let (status, body) = common::post_upload(
            router,
            endpoint.path(),
            common::file_upload("plan.png", "image/png", &common::png(8, 6)),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{}", endpoint.path());
        assert!(body.is_object());
        assert!(invoker.calls().is_empty());
    }
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let invoker = Arc::new(MockInvoker::replying(r#"{"result": true}"#));
    let mut config = common::test_config(false);
    config.max_upload_bytes = 1024;
    let router = common::router_with_config(config, invoker.clone());

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/validateBlueprint")
                .header(header::CONTENT_TYPE, common::multipart_content_type())
                .body(Body::from(common::file_upload(
                    "plan.png",
                    "image/png",
                    &vec![0u8; 4096],
                )))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"error": "Upload exceeds the 1024 byte limit"}));
    assert!(invoker.calls().is_empty());
}

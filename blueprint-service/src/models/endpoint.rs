//! Catalogue of the blueprint endpoints.
//!
//! Every endpoint runs the same upload -> model -> JSON pipeline; this is
//! where they differ.

use super::prompts;
use super::report::{ComplianceReport, ValidationResult};
use super::rooms::{BoundedRoomsResponse, ShapedRoomsResponse, WalledRoomsResponse};
use crate::config::ModelConfig;
use crate::services::normalizer::Fallback;
use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;

const ONLINE_MESSAGE: &str = "API is online. Use POST to upload files.";

/// Multipart text field carrying previously detected rooms.
pub const ROOMS_FIELD: &str = "rooms";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ValidateBlueprint,
    DetectRooms,
    DetectRoomShapes,
    DetectRoomsV2,
    GenerateReport,
}

impl Endpoint {
    pub const ALL: [Endpoint; 5] = [
        Endpoint::ValidateBlueprint,
        Endpoint::DetectRooms,
        Endpoint::DetectRoomShapes,
        Endpoint::DetectRoomsV2,
        Endpoint::GenerateReport,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::ValidateBlueprint => "/api/validateBlueprint",
            Endpoint::DetectRooms => "/api/detectRooms",
            Endpoint::DetectRoomShapes => "/api/detectRoomShapes",
            Endpoint::DetectRoomsV2 => "/api/detectRoomsV2",
            Endpoint::GenerateReport => "/api/generateReport",
        }
    }

    /// Short name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::ValidateBlueprint => "validate_blueprint",
            Endpoint::DetectRooms => "detect_rooms",
            Endpoint::DetectRoomShapes => "detect_room_shapes",
            Endpoint::DetectRoomsV2 => "detect_rooms_v2",
            Endpoint::GenerateReport => "generate_report",
        }
    }

    /// Body of the GET health response.
    pub fn status_message(self) -> &'static str {
        match self {
            Endpoint::DetectRoomsV2 => "Room Detection API is online",
            _ => ONLINE_MESSAGE,
        }
    }

    pub fn model(self, models: &ModelConfig) -> &str {
        match self {
            Endpoint::ValidateBlueprint => &models.validation_model,
            Endpoint::DetectRooms | Endpoint::DetectRoomShapes | Endpoint::DetectRoomsV2 => {
                &models.rooms_model
            }
            Endpoint::GenerateReport => &models.report_model,
        }
    }

    pub fn fallback(self) -> Fallback {
        match self {
            Endpoint::ValidateBlueprint => Fallback::BooleanResult,
            _ => Fallback::ErrorEnvelope,
        }
    }

    /// Whether the response gains `imageMetadata` from the upload.
    pub fn reports_image_metadata(self) -> bool {
        matches!(self, Endpoint::DetectRoomsV2)
    }

    /// The instruction text for one request. Report generation appends the
    /// caller's `rooms` field when present.
    pub fn instruction(self, fields: &BTreeMap<String, String>) -> Cow<'static, str> {
        let prompt = match self {
            Endpoint::ValidateBlueprint => prompts::VALIDATE_BLUEPRINT,
            Endpoint::DetectRooms => prompts::DETECT_ROOMS,
            Endpoint::DetectRoomShapes => prompts::DETECT_ROOM_SHAPES,
            Endpoint::DetectRoomsV2 => prompts::DETECT_ROOMS_V2,
            Endpoint::GenerateReport => prompts::GENERATE_REPORT,
        };

        match (self, fields.get(ROOMS_FIELD).map(|r| r.trim())) {
            (Endpoint::GenerateReport, Some(rooms)) if !rooms.is_empty() => Cow::Owned(format!(
                "{}\n\n{}\n{}",
                prompt,
                prompts::KNOWN_ROOMS_HEADING,
                rooms
            )),
            _ => Cow::Borrowed(prompt),
        }
    }

    /// Canned response served when mock responses are enabled.
    pub fn fixture(self) -> &'static str {
        match self {
            Endpoint::ValidateBlueprint => include_str!("../../fixtures/validate_blueprint.json"),
            Endpoint::DetectRooms => include_str!("../../fixtures/detect_rooms.json"),
            Endpoint::DetectRoomShapes => include_str!("../../fixtures/detect_room_shapes.json"),
            Endpoint::DetectRoomsV2 => include_str!("../../fixtures/detect_rooms_v2.json"),
            Endpoint::GenerateReport => include_str!("../../fixtures/generate_report.json"),
        }
    }

    /// Check `value` against this endpoint's response schema.
    pub fn check_schema(self, value: &Value) -> Result<(), String> {
        let parsed = match self {
            Endpoint::ValidateBlueprint => ValidationResult::deserialize(value).map(|_| Ok(())),
            Endpoint::DetectRooms => BoundedRoomsResponse::deserialize(value).map(|_| Ok(())),
            Endpoint::DetectRoomShapes => {
                ShapedRoomsResponse::deserialize(value).map(|r| r.check())
            }
            Endpoint::DetectRoomsV2 => WalledRoomsResponse::deserialize(value).map(|r| r.check()),
            Endpoint::GenerateReport => ComplianceReport::deserialize(value).map(|r| r.check()),
        };

        parsed.map_err(|e| e.to_string())?
    }
}

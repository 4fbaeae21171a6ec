//! Room detection response schemas.
//!
//! Three generations of the room schema are served side by side, one per
//! endpoint. They are deliberately not unified: each endpoint's consumers
//! depend on its exact shape. The types here are only used to check what
//! the model produced; the model's JSON itself is what gets returned.

use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// Schema 1: labelled rooms with axis-aligned bounds
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct BoundedRoomsResponse {
    pub rooms: Vec<BoundedRoom>,
}

#[derive(Debug, Deserialize)]
pub struct BoundedRoom {
    pub id: Value,
    pub label: String,
    #[serde(rename = "type", default)]
    pub room_type: Option<String>,
    pub bounds: Bounds,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

// ============================================================================
// Schema 2: named rooms with rect, circle or polygon geometry
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ShapedRoomsResponse {
    pub rooms: Vec<ShapedRoom>,
}

#[derive(Debug, Deserialize)]
pub struct ShapedRoom {
    pub id: Value,
    pub name: String,
    #[serde(rename = "type", default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub dimensions: Option<Value>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(flatten)]
    pub geometry: Geometry,
}

// ============================================================================
// Schema 3: rooms with area, shape type and wall lengths
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct WalledRoomsResponse {
    pub rooms: Vec<WalledRoom>,
    #[serde(rename = "imageMetadata", default)]
    pub image_metadata: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct WalledRoom {
    pub id: Value,
    pub name: String,
    #[serde(rename = "type", default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub calculated_area: Option<f64>,
    #[serde(default)]
    pub shape_type: Option<ShapeType>,
    #[serde(flatten)]
    pub geometry: Geometry,
    #[serde(default)]
    pub walls: Vec<Wall>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Rect,
    Circle,
    Polygon,
}

#[derive(Debug, Deserialize)]
pub struct Wall {
    pub sequence_order: u32,
    pub length: f64,
    pub unit: String,
    #[serde(default)]
    pub note: Option<String>,
}

// ============================================================================
// Shared geometry
// ============================================================================

/// Where a room sits on the image: `coords` for rectangles and circles,
/// `points` for polygons.
#[derive(Debug, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub coords: Option<Coords>,
    #[serde(default)]
    pub points: Option<Vec<[f64; 2]>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Coords {
    Rect { x: f64, y: f64, w: f64, h: f64 },
    Circle { cx: f64, cy: f64, r: f64 },
}

impl Geometry {
    fn check(&self) -> Result<(), String> {
        match (&self.coords, &self.points) {
            (None, None) => Err("has neither coords nor points".to_string()),
            (None, Some(points)) if points.len() < 3 => {
                Err(format!("polygon has {} points, need at least 3", points.len()))
            }
            _ => Ok(()),
        }
    }

    fn shape_type(&self) -> Option<ShapeType> {
        match (&self.coords, &self.points) {
            (Some(Coords::Rect { .. }), _) => Some(ShapeType::Rect),
            (Some(Coords::Circle { .. }), _) => Some(ShapeType::Circle),
            (None, Some(_)) => Some(ShapeType::Polygon),
            (None, None) => None,
        }
    }
}

impl ShapedRoomsResponse {
    pub fn check(&self) -> Result<(), String> {
        for (index, room) in self.rooms.iter().enumerate() {
            room.geometry
                .check()
                .map_err(|e| format!("rooms[{}] ({}) {}", index, room.name, e))?;
        }
        Ok(())
    }
}

impl WalledRoomsResponse {
    pub fn check(&self) -> Result<(), String> {
        for (index, room) in self.rooms.iter().enumerate() {
            room.geometry
                .check()
                .map_err(|e| format!("rooms[{}] ({}) {}", index, room.name, e))?;

            if let (Some(declared), Some(actual)) = (room.shape_type, room.geometry.shape_type())
            {
                if declared != actual {
                    return Err(format!(
                        "rooms[{}] ({}) declares shape_type {:?} but has {:?} geometry",
                        index, room.name, declared, actual
                    ));
                }
            }
        }
        Ok(())
    }
}

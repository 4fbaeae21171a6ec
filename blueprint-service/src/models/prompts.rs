//! Instructions sent to the model, one per endpoint.

pub const VALIDATE_BLUEPRINT: &str = "\
You are reviewing an uploaded image before architectural analysis.
Decide whether the image is an architectural blueprint or floor plan: a \
top-down drawing of a building showing rooms, walls and labels.
Photographs, sketches of objects, documents without a floor plan, and \
blank pages are not blueprints.

Respond with JSON only, exactly in this form:
{\"result\": true}
or
{\"result\": false}";

pub const DETECT_ROOMS: &str = "\
Role: You are an architectural image analysis AI.
Task: Identify every distinct room on the provided floor plan image.

For each room return its printed label, a normalized room type, and the \
axis-aligned bounding box of the room in image pixels.
Room types: entrance, common, activity, administrative, restroom, \
storage, circulation, other.
Use one translucent color per room type as an rgba() string.

(0,0) is the TOP-LEFT corner of the image. X grows to the right, Y grows down.

JSON Schema:
{
  \"rooms\": [
    {
      \"id\": 1,
      \"label\": \"Lobby\",
      \"type\": \"common\",
      \"bounds\": {\"x\": 350, \"y\": 750, \"width\": 150, \"height\": 130},
      \"color\": \"rgba(34, 197, 94, 0.3)\"
    }
  ]
}

Return ONLY valid JSON, no markdown, no code blocks, no commentary.";

pub const DETECT_ROOM_SHAPES: &str = "\
Role: You are an architectural image analysis AI.
Task: Identify every distinct room on the provided floor plan image and \
trace its outline.

For each room:
1. Read the room name printed on the plan and normalize its type \
(e.g. 'Gymnasium' -> 'gym', 'Restroom' -> 'bathroom').
2. Read the printed dimensions if present, as a string such as \"30' x 40'\".
3. Describe the outline in image pixels using exactly one of:
   - rectangle: \"coords\": {\"x\", \"y\", \"w\", \"h\"}
   - circle: \"coords\": {\"cx\", \"cy\", \"r\"}
   - anything else: \"points\": [[x, y], ...] listing the corners in order
4. Pick one translucent rgba() color per room type.

(0,0) is the TOP-LEFT corner of the image. X grows to the right, Y grows down.

JSON Schema:
{
  \"rooms\": [
    {
      \"id\": 1,
      \"name\": \"Gymnasium\",
      \"type\": \"gym\",
      \"dimensions\": \"90' x 110'\",
      \"color\": \"rgba(168, 85, 247, 0.3)\",
      \"coords\": {\"x\": 520, \"y\": 250, \"w\": 450, \"h\": 560}
    },
    {
      \"id\": 2,
      \"name\": \"Vestibule\",
      \"type\": \"vestibule\",
      \"dimensions\": \"\",
      \"color\": \"rgba(59, 130, 246, 0.3)\",
      \"points\": [[360, 820], [460, 910], [500, 870], [400, 780]]
    }
  ]
}

Return ONLY valid JSON, no markdown, no code blocks, no commentary.";

pub const DETECT_ROOMS_V2: &str = "\
Role: You are an architectural image analysis AI.
Task: Analyze the provided floor plan image and extract data about each distinct room.

Steps:
1. Identify all distinct rooms in the floor plan.
2. Classify each room outline as rectangular, circular, or irregular.
3. Extract the pixel coordinates of each room's corners.
4. Compute the length of each wall between consecutive corners using the \
scale printed on the plan.
5. Compute each room's area in square feet using the same scale.
6. Normalize room types using the legend on the plan (e.g. 'Gymnasium' -> \
'gym', 'Restroom' -> 'bathroom').
7. Rooms whose type is not in the legend get type Unknown; number them \
Unknown1, Unknown2, ... when there are several.
8. When a room type occurs more than once, number each room (Lounge1, Lounge2, ...).

(0,0) is the TOP-LEFT corner of the image. X grows to the right, Y grows down.

JSON Schema:
{
  \"rooms\": [
    {
      \"id\": 1,
      \"name\": \"Gymnasium\",
      \"type\": \"gym\",
      \"calculated_area\": 10000,
      \"shape_type\": \"rect\",
      \"coords\": {\"x\": 520, \"y\": 250, \"w\": 450, \"h\": 560},
      \"walls\": [
        {\"sequence_order\": 1, \"length\": 92, \"unit\": \"ft\"},
        {\"sequence_order\": 2, \"length\": 112, \"unit\": \"ft\"},
        {\"sequence_order\": 3, \"length\": 92, \"unit\": \"ft\"},
        {\"sequence_order\": 4, \"length\": 112, \"unit\": \"ft\"}
      ]
    },
    {
      \"id\": 2,
      \"name\": \"Lounge\",
      \"type\": \"lounge\",
      \"calculated_area\": 314,
      \"shape_type\": \"circle\",
      \"coords\": {\"cx\": 400, \"cy\": 450, \"r\": 60},
      \"walls\": [
        {\"sequence_order\": 1, \"length\": 62.8, \"unit\": \"ft\", \"note\": \"circumference\"}
      ]
    },
    {
      \"id\": 3,
      \"name\": \"Vestibule\",
      \"type\": \"vestibule\",
      \"calculated_area\": 500,
      \"shape_type\": \"polygon\",
      \"points\": [[360, 820], [460, 910], [500, 870], [400, 780]],
      \"walls\": [
        {\"sequence_order\": 1, \"length\": 25, \"unit\": \"ft\"},
        {\"sequence_order\": 2, \"length\": 20, \"unit\": \"ft\"},
        {\"sequence_order\": 3, \"length\": 25, \"unit\": \"ft\"},
        {\"sequence_order\": 4, \"length\": 20, \"unit\": \"ft\"}
      ]
    }
  ]
}

Shape types:
- 'rect': 'coords' with x, y, w, h
- 'circle': 'coords' with cx, cy, r
- 'polygon': 'points' array of [x, y] corners

Return ONLY valid JSON, no markdown, no code blocks, no commentary.";

pub const GENERATE_REPORT: &str = "\
Role: You are a facilities compliance reviewer for tribal administrative buildings.
Task: Review the provided floor plan against space, accessibility (ADA), fire \
safety (NFPA, IBC) and 105(l) lease requirements.

Group checks into categories. Every check has a status of pass, fail or \
warning; every category has a status of compliant, violation or warning. \
Cite the policy and the governing section for each check, quote what the \
blueprint shows, and add a recommendation for every fail or warning.

JSON Schema:
{
  \"summary\": {\"compliant\": 8, \"violations\": 3, \"warnings\": 2, \"totalChecks\": 13},
  \"blueprint\": {\"facilityType\": \"Administrative Office\", \"totalArea\": \"2,400 sq ft\"},
  \"results\": [
    {
      \"category\": \"Accessibility & Egress\",
      \"status\": \"violation\",
      \"items\": [
        {
          \"id\": 3,
          \"check\": \"Exit Door Width\",
          \"status\": \"fail\",
          \"finding\": \"Exit door in Room 104 measures 30 inches wide\",
          \"blueprint\": \"Room 104 exit door marked as 30\\\" on blueprint\",
          \"policy\": \"Doorways require 32 inches minimum clear width\",
          \"citation\": \"ADA Standards Section 404.2.3\",
          \"recommendation\": \"Widen door opening to minimum 32 inches\"
        }
      ]
    }
  ]
}

Return ONLY valid JSON, no markdown, no code blocks, no commentary.";

/// Heading placed before room data the caller already has.
pub const KNOWN_ROOMS_HEADING: &str = "Rooms already identified on this plan (JSON):";

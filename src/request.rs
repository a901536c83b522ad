//! Plan request documents
//!
//! A request describes one room, the furniture to place, the occupants and an
//! optional life goal. It can be written in TOML or JSON:
//!
//! ```toml
//! life_goal = "wealth"
//!
//! [room]
//! width = 4.0
//! length = 5.0
//! orientation = "N"
//! room_type = "bedroom"
//!
//! [[room.elements]]
//! kind = "door"
//! x = 1.5
//! y = 4.9
//! width = 0.9
//! height = 0.1
//!
//! [furniture.queen_bed]
//! width = 1.6
//! height = 2.0
//!
//! [[occupants]]
//! gender = "female"
//! birth_year = 1990
//! birth_month = 6
//! birth_day = 15
//! primary = true
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RequestError;
use crate::furniture::{FurnitureKind, FurnitureSelection};
use crate::kua::Occupant;
use crate::layout::LifeGoal;
use crate::room::{ElementKind, Orientation, RoomElement, RoomSpec, RoomType};

/// Everything needed to plan one room
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub room: RoomSpec,
    pub furniture: Vec<FurnitureSelection>,
    pub occupants: Vec<Occupant>,
    pub life_goal: Option<LifeGoal>,
}

impl PlanRequest {
    pub fn new(room: RoomSpec) -> Self {
        Self {
            room,
            furniture: Vec::new(),
            occupants: Vec::new(),
            life_goal: None,
        }
    }

    pub fn with_furniture(mut self, selection: FurnitureSelection) -> Self {
        self.furniture.push(selection);
        self
    }

    pub fn with_occupant(mut self, occupant: Occupant) -> Self {
        self.occupants.push(occupant);
        self
    }

    pub fn with_life_goal(mut self, goal: LifeGoal) -> Self {
        self.life_goal = Some(goal);
        self
    }

    /// Parse a TOML request document
    pub fn from_toml(content: &str) -> Result<Self, RequestError> {
        let doc: RequestDocument = toml::from_str(content)?;
        Ok(doc.into_request())
    }

    /// Parse a JSON request document
    pub fn from_json(content: &str) -> Result<Self, RequestError> {
        let doc: RequestDocument = serde_json::from_str(content)?;
        Ok(doc.into_request())
    }

    /// Parse request text; JSON when `is_json`, TOML otherwise
    pub fn parse(content: &str, is_json: bool) -> Result<Self, RequestError> {
        if is_json {
            Self::from_json(content)
        } else {
            Self::from_toml(content)
        }
    }

    /// Load a request file; a `.json` extension selects JSON
    pub fn from_file(path: &Path) -> Result<Self, RequestError> {
        let content = fs::read_to_string(path).map_err(|e| RequestError::io(path, e))?;
        Self::parse(&content, is_json_path(path))
    }
}

/// Whether a path names a JSON document
pub fn is_json_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RequestDocument {
    room: RoomDocument,
    #[serde(default)]
    furniture: BTreeMap<String, FurnitureEntry>,
    #[serde(default)]
    occupants: Vec<Occupant>,
    #[serde(default)]
    life_goal: Option<LifeGoal>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RoomDocument {
    width: f64,
    length: f64,
    #[serde(default)]
    orientation: Option<Orientation>,
    #[serde(default)]
    room_type: Option<RoomType>,
    #[serde(default)]
    elements: Vec<ElementEntry>,
}

#[derive(Debug, Deserialize)]
struct ElementEntry {
    kind: ElementKind,
    x: Option<f64>,
    y: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
}

impl ElementEntry {
    fn into_element(self) -> Option<RoomElement> {
        Some(RoomElement::new(
            self.kind,
            self.x?,
            self.y?,
            self.width?,
            self.height?,
        ))
    }
}

fn one() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FurnitureEntry {
    #[serde(default = "one")]
    quantity: u32,
    width: f64,
    height: f64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    role: Option<FurnitureKind>,
}

impl RequestDocument {
    fn into_request(self) -> PlanRequest {
        let room_doc = self.room;
        let orientation = room_doc.orientation.unwrap_or_else(|| {
            log::warn!("room has no orientation, assuming N");
            Orientation::N
        });

        let mut room = RoomSpec::new(room_doc.width, room_doc.length).with_orientation(orientation);
        if let Some(room_type) = room_doc.room_type {
            room = room.with_room_type(room_type);
        }
        for (index, entry) in room_doc.elements.into_iter().enumerate() {
            let kind = entry.kind;
            match entry.into_element() {
                Some(element) => room = room.with_element(element),
                None => log::warn!("skipping {} element #{}: missing geometry", kind, index + 1),
            }
        }

        let furniture = self
            .furniture
            .into_iter()
            .map(|(catalog_id, entry)| FurnitureSelection {
                catalog_id,
                quantity: entry.quantity,
                width: entry.width,
                height: entry.height,
                name: entry.name,
                role: entry.role,
            })
            .collect();

        PlanRequest {
            room,
            furniture,
            occupants: self.occupants,
            life_goal: self.life_goal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kua::Gender;

    const TOML_REQUEST: &str = r#"
life_goal = "career"

[room]
width = 4.0
length = 5.0
orientation = "east"
room_type = "office"

[[room.elements]]
kind = "door"
x = 1.5
y = 4.9
width = 0.9
height = 0.1

[[room.elements]]
kind = "window"
x = 0.0

[furniture.desk]
width = 1.2
height = 0.6

[furniture.floor_lamp]
quantity = 2
width = 0.3
height = 0.3
name = "Reading lamp"

[[occupants]]
gender = "male"
birth_year = 1985
birth_month = 3
birth_day = 10
primary = true
"#;

    #[test]
    fn test_toml_request() {
        let request = PlanRequest::from_toml(TOML_REQUEST).unwrap();
        assert_eq!(request.room.orientation, Orientation::E);
        assert_eq!(request.room.room_type, Some(RoomType::Office));
        // the window has no geometry and is skipped
        assert_eq!(request.room.elements.len(), 1);
        assert_eq!(request.furniture.len(), 2);
        assert_eq!(request.furniture[0].catalog_id, "desk");
        assert_eq!(request.furniture[1].quantity, 2);
        assert_eq!(request.furniture[1].name.as_deref(), Some("Reading lamp"));
        assert_eq!(request.occupants[0].gender, Some(Gender::Male));
        assert_eq!(request.life_goal, Some(LifeGoal::Career));
    }

    #[test]
    fn test_json_matches_toml() {
        let json = r#"{
            "life_goal": "career",
            "room": {
                "width": 4.0, "length": 5.0, "orientation": "east", "room_type": "office",
                "elements": [
                    {"kind": "door", "x": 1.5, "y": 4.9, "width": 0.9, "height": 0.1},
                    {"kind": "window", "x": 0.0}
                ]
            },
            "furniture": {
                "floor_lamp": {"quantity": 2, "width": 0.3, "height": 0.3, "name": "Reading lamp"},
                "desk": {"width": 1.2, "height": 0.6}
            },
            "occupants": [
                {"gender": "male", "birth_year": 1985, "birth_month": 3, "birth_day": 10, "primary": true}
            ]
        }"#;
        assert_eq!(
            PlanRequest::from_json(json).unwrap(),
            PlanRequest::from_toml(TOML_REQUEST).unwrap()
        );
    }

    #[test]
    fn test_missing_orientation_defaults_north() {
        let request = PlanRequest::from_toml("[room]\nwidth = 3.0\nlength = 3.0\n").unwrap();
        assert_eq!(request.room.orientation, Orientation::N);
        assert!(request.furniture.is_empty());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = PlanRequest::from_toml("[room]\nwidth = 3.0\nlength = 3.0\ncolour = \"red\"\n").unwrap_err();
        assert!(matches!(err, RequestError::Toml(_)));
    }

    #[test]
    fn test_json_path() {
        assert!(is_json_path(Path::new("plan.JSON")));
        assert!(!is_json_path(Path::new("plan.toml")));
        assert!(!is_json_path(Path::new("plan")));
    }
}

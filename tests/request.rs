//! Request documents through the public API

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;

use fengshui_planner::{
    plan, ElementKind, FurnitureKind, LifeGoal, Orientation, PlanRequest, RequestError, RoomType,
};

const BEDROOM_TOML: &str = r#"
life_goal = "relationships"

[room]
width = 4.0
length = 5.0
orientation = "S"
room_type = "bedroom"

[[room.elements]]
kind = "door"
x = 1.5
y = 4.9
width = 0.9
height = 0.1

[[room.elements]]
kind = "window"
x = 3.9
y = 1.0
width = 0.1
height = 1.2

[[room.elements]]
kind = "column"

[furniture.queen_bed]
width = 1.6
height = 2.0

[furniture.side_table]
quantity = 2
width = 0.45
height = 0.45
role = "nightstand"

[[occupants]]
gender = "female"
birth_year = 1990
birth_month = 6
birth_day = 15
primary = true
"#;

const BEDROOM_JSON: &str = r#"{
    "life_goal": "relationships",
    "room": {
        "width": 4.0,
        "length": 5.0,
        "orientation": "S",
        "room_type": "bedroom",
        "elements": [
            {"kind": "door", "x": 1.5, "y": 4.9, "width": 0.9, "height": 0.1},
            {"kind": "window", "x": 3.9, "y": 1.0, "width": 0.1, "height": 1.2},
            {"kind": "column"}
        ]
    },
    "furniture": {
        "queen_bed": {"width": 1.6, "height": 2.0},
        "side_table": {"quantity": 2, "width": 0.45, "height": 0.45, "role": "nightstand"}
    },
    "occupants": [
        {"gender": "female", "birth_year": 1990, "birth_month": 6, "birth_day": 15, "primary": true}
    ]
}"#;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("fengshui-planner-{}-{}", std::process::id(), name))
}

#[test]
fn test_toml_and_json_requests_agree() {
    let toml = PlanRequest::from_toml(BEDROOM_TOML).unwrap();
    let json = PlanRequest::from_json(BEDROOM_JSON).unwrap();
    assert_eq!(toml, json);

    assert_eq!(toml.room.orientation, Orientation::S);
    assert_eq!(toml.room.room_type, Some(RoomType::Bedroom));
    let kinds: Vec<_> = toml.room.elements.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ElementKind::Door, ElementKind::Window]);
    assert_eq!(toml.furniture[1].role, Some(FurnitureKind::Nightstand));
    assert_eq!(toml.life_goal, Some(LifeGoal::Relationships));
}

#[test]
fn test_from_file_picks_format_by_extension() {
    let toml_path = temp_path("bedroom.toml");
    let json_path = temp_path("bedroom.json");
    fs::write(&toml_path, BEDROOM_TOML).unwrap();
    fs::write(&json_path, BEDROOM_JSON).unwrap();

    let from_toml = PlanRequest::from_file(&toml_path);
    let from_json = PlanRequest::from_file(&json_path);
    fs::remove_file(&toml_path).unwrap();
    fs::remove_file(&json_path).unwrap();

    assert_eq!(from_toml.unwrap(), from_json.unwrap());
}

#[test]
fn test_missing_file_reports_path() {
    let path = temp_path("does-not-exist.toml");
    let err = PlanRequest::from_file(&path).unwrap_err();
    assert!(matches!(err, RequestError::Io { .. }));
    assert!(err.to_string().contains("does-not-exist.toml"));
    assert!(err.span("").is_none());
}

#[test]
fn test_syntax_error_is_reported_with_context() {
    let source = "[room]\nwidth = 4.0\nlength = \n";
    let err = PlanRequest::from_toml(source).unwrap_err();
    assert!(err.span(source).is_some());

    assert!(err.to_string().starts_with("invalid TOML request"));
    assert!(err.format(source, "bad.toml").contains("bad.toml"));
}

#[test]
fn test_parsed_request_plans() {
    let request = PlanRequest::from_toml(BEDROOM_TOML).unwrap();
    let result = plan(&request).unwrap();

    // female 1990: digital root 1, 1 + 5 = 6
    assert_eq!(result.kua.as_ref().map(|k| k.number), Some(6));
    assert_eq!(result.layouts.len(), 3);
    assert_eq!(result.layouts[2].life_goal, Some(LifeGoal::Relationships));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["layouts"][2]["strategy"], "life_goal");
    assert_eq!(json["analysis"]["zones"].as_array().map(Vec::len), Some(9));
}

//! Room analysis
//!
//! Turns a room description into the immutable [`RoomAnalysis`] every layout
//! strategy reads from: bagua zones, constraints, usable spaces, command
//! positions and the energy-flow model.

pub mod bagua;
pub mod command;
pub mod constraints;
pub mod energy;
pub mod usable;

pub use bagua::{BaguaArea, BaguaZone, FiveElement};
pub use command::CommandPosition;
pub use constraints::{Constraint, ConstraintKind};
pub use energy::{
    EnergyEntryPoint, EnergyFlow, EnergyFlowPath, EnergyIssue, EnergyIssueKind, EntrySource,
    FlowStrength,
};
pub use usable::UsableSpace;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};
use crate::layout::{PlannerConfig, PlannerError};

/// Compass direction the top edge of the plan faces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    #[serde(alias = "n", alias = "north")]
    N,
    #[serde(alias = "e", alias = "east")]
    E,
    #[serde(alias = "s", alias = "south")]
    S,
    #[serde(alias = "w", alias = "west")]
    W,
}

impl Orientation {
    /// Quarter turns clockwise from north
    pub fn quarter_turns(&self) -> u8 {
        match self {
            Orientation::N => 0,
            Orientation::E => 1,
            Orientation::S => 2,
            Orientation::W => 3,
        }
    }

    /// Compass bearing of the plan's top edge in degrees
    pub fn degrees(&self) -> f64 {
        f64::from(self.quarter_turns()) * 90.0
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Orientation::N => "N",
            Orientation::E => "E",
            Orientation::S => "S",
            Orientation::W => "W",
        };
        f.write_str(s)
    }
}

/// Kind of room, used only to pick general advice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Bedroom,
    Office,
    #[serde(alias = "living-room", alias = "living")]
    LivingRoom,
}

/// Kind of fixed element in a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Wall,
    Door,
    Window,
    Closet,
    Column,
    Fireplace,
    Radiator,
    #[serde(alias = "no_furniture_zone", alias = "no-furniture")]
    NoFurniture,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Wall => "wall",
            ElementKind::Door => "door",
            ElementKind::Window => "window",
            ElementKind::Closet => "closet",
            ElementKind::Column => "column",
            ElementKind::Fireplace => "fireplace",
            ElementKind::Radiator => "radiator",
            ElementKind::NoFurniture => "no_furniture",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed element with its footprint in room coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomElement {
    pub kind: ElementKind,
    pub rect: Rect,
}

impl RoomElement {
    pub fn new(kind: ElementKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            kind,
            rect: Rect::new(x, y, width, height),
        }
    }
}

/// Room geometry as handed to the planner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomSpec {
    pub width: f64,
    pub length: f64,
    pub orientation: Orientation,
    pub elements: Vec<RoomElement>,
    pub room_type: Option<RoomType>,
}

impl RoomSpec {
    pub fn new(width: f64, length: f64) -> Self {
        Self {
            width,
            length,
            orientation: Orientation::default(),
            elements: Vec::new(),
            room_type: None,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_element(mut self, element: RoomElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_room_type(mut self, room_type: RoomType) -> Self {
        self.room_type = Some(room_type);
        self
    }
}

/// Rating shared by usable spaces, command positions and placements
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Quality {
    /// One step worse, saturating at poor
    pub fn downgraded(self) -> Quality {
        match self {
            Quality::Excellent => Quality::Good,
            Quality::Good => Quality::Fair,
            Quality::Fair | Quality::Poor => Quality::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Poor => "poor",
            Quality::Fair => "fair",
            Quality::Good => "good",
            Quality::Excellent => "excellent",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of an energy issue or layout trade-off
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(s)
    }
}

/// Everything the placer needs to know about a room
#[derive(Debug, Clone, Serialize)]
pub struct RoomAnalysis {
    pub width: f64,
    pub length: f64,
    pub orientation: Orientation,
    pub elements: Vec<RoomElement>,
    pub zones: Vec<BaguaZone>,
    pub constraints: Vec<Constraint>,
    pub usable_spaces: Vec<UsableSpace>,
    pub command_positions: Vec<CommandPosition>,
    pub energy_flow: EnergyFlow,
}

impl RoomAnalysis {
    /// The room rectangle `[0, width] × [0, length]`
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.length)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Elements of one kind, in input order
    pub fn elements_of(&self, kind: ElementKind) -> impl Iterator<Item = &RoomElement> {
        self.elements.iter().filter(move |e| e.kind == kind)
    }

    /// Constraints of one kind
    pub fn constraints_of(&self, kind: ConstraintKind) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter().filter(move |c| c.kind == kind)
    }

    /// Bagua zone containing a point
    pub fn zone_at(&self, point: Point) -> Option<&BaguaZone> {
        bagua::zone_at(&self.zones, point)
    }
}

/// Run every room analysis step once.
///
/// Fails only when the room itself is degenerate; malformed elements are
/// dropped earlier, at ingestion.
pub fn analyze(room: &RoomSpec, config: &PlannerConfig) -> Result<RoomAnalysis, PlannerError> {
    let (width, length) = (room.width, room.length);
    if !(width.is_finite() && length.is_finite() && width > 0.0 && length > 0.0) {
        return Err(PlannerError::invalid_room(width, length));
    }

    let elements: Vec<RoomElement> = room
        .elements
        .iter()
        .filter(|e| {
            let ok = e.rect.is_finite() && e.rect.width >= 0.0 && e.rect.height >= 0.0;
            if !ok {
                log::warn!("skipping {} with invalid geometry {:?}", e.kind, e.rect);
            }
            ok
        })
        .cloned()
        .collect();

    let zones = bagua::map(width, length, room.orientation);
    let constraints = constraints::build(&elements, config.door_traffic_buffer);
    let usable_spaces = usable::split(width, length, &constraints);
    let command_positions = command::find(&elements, width, length);
    let energy_flow = energy::analyze(&elements, width, length);

    log::debug!(
        "analyzed {}x{} room: {} constraints, {} usable spaces, {} command positions, {} energy issues",
        width,
        length,
        constraints.len(),
        usable_spaces.len(),
        command_positions.len(),
        energy_flow.issues.len()
    );

    Ok(RoomAnalysis {
        width,
        length,
        orientation: room.orientation,
        elements,
        zones,
        constraints,
        usable_spaces,
        command_positions,
        energy_flow,
    })
}

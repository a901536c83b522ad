//! Core types for generated layouts

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::furniture::FurnitureKind;
use crate::geometry::Rect;
use crate::kua::Direction;
use crate::room::{BaguaArea, Orientation, Quality, Severity};

/// Furniture is either upright or turned a quarter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    Upright,
    Quarter,
}

impl Rotation {
    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::Upright => 0,
            Rotation::Quarter => 90,
        }
    }

    /// Rotation for an angle in degrees; half turns keep the footprint upright
    pub fn from_degrees(degrees: u16) -> Option<Rotation> {
        match degrees {
            0 | 180 => Some(Rotation::Upright),
            90 | 270 => Some(Rotation::Quarter),
            _ => None,
        }
    }

    pub fn is_quarter(&self) -> bool {
        matches!(self, Rotation::Quarter)
    }

    pub fn other(&self) -> Rotation {
        match self {
            Rotation::Upright => Rotation::Quarter,
            Rotation::Quarter => Rotation::Upright,
        }
    }
}

impl Serialize for Rotation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.degrees())
    }
}

/// How a layout trades feng-shui ideals against space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutStrategy {
    /// Best feng shui; never blocks energy flow
    Optimal,
    /// Smaller items first, flow blocking tolerated
    SpaceConscious,
    /// Bagua targeting biased toward a life goal
    LifeGoal,
    /// Optimal rules with seeded jitter, used when no goal is set
    Variant,
}

impl LayoutStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutStrategy::Optimal => "optimal",
            LayoutStrategy::SpaceConscious => "space_conscious",
            LayoutStrategy::LifeGoal => "life_goal",
            LayoutStrategy::Variant => "variant",
        }
    }

    /// Whether cells that block energy flow are excluded outright
    pub fn forbids_flow_blocking(&self) -> bool {
        matches!(self, LayoutStrategy::Optimal | LayoutStrategy::Variant)
    }
}

impl fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifeGoal {
    Career,
    Wealth,
    Health,
    Relationships,
}

impl LifeGoal {
    /// Bagua zones that support this goal
    pub fn zones(&self) -> &'static [BaguaArea] {
        match self {
            LifeGoal::Wealth => &[BaguaArea::Wealth, BaguaArea::Fame, BaguaArea::HelpfulPeople],
            LifeGoal::Career => &[
                BaguaArea::Career,
                BaguaArea::Knowledge,
                BaguaArea::HelpfulPeople,
            ],
            LifeGoal::Health => &[BaguaArea::Center, BaguaArea::Family],
            LifeGoal::Relationships => &[
                BaguaArea::Relationships,
                BaguaArea::Family,
                BaguaArea::Center,
            ],
        }
    }
}

/// Why a small item sits where it does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Bedside,
    Sofaside,
    Lighting,
    BalanceCorner,
    ActivateEnergy,
    EnhanceEntry,
}

impl Relationship {
    pub fn priority(&self) -> u8 {
        match self {
            Relationship::Bedside => 5,
            Relationship::Sofaside | Relationship::BalanceCorner => 4,
            Relationship::ActivateEnergy | Relationship::EnhanceEntry => 3,
            Relationship::Lighting => 2,
        }
    }
}

/// Side of the plan a wall runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WallSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl WallSide {
    /// Compass direction of this side for a room orientation
    pub fn compass(&self, orientation: Orientation) -> Direction {
        let side = match self {
            WallSide::Top => 0,
            WallSide::Right => 1,
            WallSide::Bottom => 2,
            WallSide::Left => 3,
        };
        Direction::from_quarter_turns(orientation.quarter_turns() + side)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    NoWallBehind,
    BlocksEnergyFlow,
    SuboptimalPlacement,
    LastResortPlacement,
    UnableToPlace,
    BedUnderWindow,
    BlocksDoor,
    DeskNotCommand,
    FurnitureOverlap,
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IssueCode::NoWallBehind => "no_wall_behind",
            IssueCode::BlocksEnergyFlow => "blocks_energy_flow",
            IssueCode::SuboptimalPlacement => "suboptimal_placement",
            IssueCode::LastResortPlacement => "last_resort_placement",
            IssueCode::UnableToPlace => "unable_to_place",
            IssueCode::BedUnderWindow => "bed_under_window",
            IssueCode::BlocksDoor => "blocks_door",
            IssueCode::DeskNotCommand => "desk_not_command",
            IssueCode::FurnitureOverlap => "furniture_overlap",
        };
        f.write_str(s)
    }
}

/// A piece of furniture at its final position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub item_id: String,
    pub catalog_id: String,
    pub name: String,
    pub kind: FurnitureKind,
    pub rect: Rect,
    pub rotation: Rotation,
    pub in_command_position: bool,
    pub against_wall: bool,
    pub quality: Quality,
    pub bagua_area: Option<BaguaArea>,
    pub relationship: Option<Relationship>,
    pub wall_side: Option<WallSide>,
}

/// An advisory note on a compromise the layout makes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tradeoff {
    /// `None` for notes that concern the layout as a whole
    pub item_id: Option<String>,
    pub issue: IssueCode,
    pub description: String,
    pub severity: Severity,
    pub mitigation: String,
}

impl Tradeoff {
    pub fn new(
        item_id: impl Into<String>,
        issue: IssueCode,
        severity: Severity,
        description: impl Into<String>,
        mitigation: impl Into<String>,
    ) -> Self {
        Self {
            item_id: Some(item_id.into()),
            issue,
            description: description.into(),
            severity,
            mitigation: mitigation.into(),
        }
    }
}

/// One complete furniture arrangement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub id: String,
    pub strategy: LayoutStrategy,
    pub placements: Vec<Placement>,
    pub tradeoffs: Vec<Tradeoff>,
    pub score: u8,
    pub life_goal: Option<LifeGoal>,
}

impl Layout {
    pub fn placement(&self, item_id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.item_id == item_id)
    }

    /// Trade-offs recorded against one item
    pub fn tradeoffs_for<'a>(&'a self, item_id: &'a str) -> impl Iterator<Item = &'a Tradeoff> {
        self.tradeoffs
            .iter()
            .filter(move |t| t.item_id.as_deref() == Some(item_id))
    }
}

//! Feng Shui Planner - furniture layouts from feng shui heuristics
//!
//! This library analyzes a rectangular room (bagua zones, constraints, command
//! positions, energy flow), works out the primary occupant's kua profile and
//! places a furniture list three ways: optimal, space-conscious, and either
//! life-goal or a jittered variant. Every layout comes with a 0-100 score and
//! the trade-offs it makes.
//!
//! # Example
//!
//! ```rust
//! use fengshui_planner::{plan, ElementKind, FurnitureSelection, PlanRequest, RoomElement, RoomSpec};
//!
//! let room = RoomSpec::new(4.0, 4.0)
//!     .with_element(RoomElement::new(ElementKind::Door, 1.5, 3.9, 1.0, 0.1));
//! let request = PlanRequest::new(room)
//!     .with_furniture(FurnitureSelection::new("queen_bed", 1.6, 2.0));
//!
//! let result = plan(&request).unwrap();
//! assert_eq!(result.layouts.len(), 3);
//! ```

pub mod error;
pub mod furniture;
pub mod geometry;
pub mod kua;
pub mod layout;
pub mod recommendations;
pub mod request;
pub mod room;

pub use error::RequestError;
pub use furniture::{FurnitureCategory, FurnitureItem, FurnitureKind, FurnitureSelection};
pub use geometry::{Point, Rect};
pub use kua::{Direction, Gender, KuaGroup, KuaProfile, Occupant};
pub use layout::{
    modify_layout, IdGenerator, Layout, LayoutStrategy, LifeGoal, Placement, PlacementEdit,
    PlannerConfig, PlannerError, Rotation, SequentialIds, Tradeoff, UuidIds,
};
pub use recommendations::Recommendation;
pub use request::PlanRequest;
pub use room::{ElementKind, Orientation, Quality, RoomAnalysis, RoomElement, RoomSpec, RoomType, Severity};

use serde::Serialize;
use thiserror::Error;

use layout::LayoutGenerator;

/// Planning failed before any layout could be produced
#[derive(Debug, Error)]
#[error("{error}")]
pub struct PlanFailure {
    #[source]
    pub error: PlannerError,
    /// General advice for the room type, offered in place of layouts
    pub recommendations: Vec<Recommendation>,
}

/// How layout ids are generated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdScheme {
    /// `optimal_1`, `space_conscious_1`, ...
    #[default]
    Sequential,
    /// Random v4 UUIDs
    Uuid,
}

/// Configuration for the complete planning pipeline
#[derive(Debug, Clone, Default)]
pub struct PlanConfig {
    /// Planner tunables
    pub planner: PlannerConfig,
    /// Layout id scheme
    pub ids: IdScheme,
}

impl PlanConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the planner configuration
    pub fn with_planner(mut self, config: PlannerConfig) -> Self {
        self.planner = config;
        self
    }

    /// Set the layout id scheme
    pub fn with_ids(mut self, ids: IdScheme) -> Self {
        self.ids = ids;
        self
    }
}

/// Layouts for one request, with the analysis they were built from
#[derive(Debug, Clone, Serialize)]
pub struct PlanResult {
    pub layouts: Vec<Layout>,
    pub kua: Option<KuaProfile>,
    pub analysis: RoomAnalysis,
}

impl PlanResult {
    pub fn layout(&self, id: &str) -> Option<&Layout> {
        self.layouts.iter().find(|l| l.id == id)
    }

    /// Highest-scoring layout; the earliest wins ties
    pub fn best(&self) -> Option<&Layout> {
        self.layouts
            .iter()
            .reduce(|best, l| if l.score > best.score { l } else { best })
    }
}

/// Plan a room with default configuration
pub fn plan(request: &PlanRequest) -> Result<PlanResult, PlanFailure> {
    plan_with_config(request, &PlanConfig::default())
}

/// Plan a room with custom configuration
///
/// # Example
///
/// ```rust
/// use fengshui_planner::{plan_with_config, IdScheme, PlanConfig, PlanRequest, PlannerConfig, RoomSpec};
///
/// let config = PlanConfig::new()
///     .with_planner(PlannerConfig::new().with_variant_seed(7))
///     .with_ids(IdScheme::Uuid);
///
/// let result = plan_with_config(&PlanRequest::new(RoomSpec::new(3.0, 3.0)), &config).unwrap();
/// assert_eq!(result.layouts[0].id.len(), 36);
/// ```
pub fn plan_with_config(request: &PlanRequest, config: &PlanConfig) -> Result<PlanResult, PlanFailure> {
    run(request, config).map_err(|error| {
        log::error!("planning failed: {}", error);
        PlanFailure {
            error,
            recommendations: recommendations::for_room(request.room.room_type),
        }
    })
}

fn run(request: &PlanRequest, config: &PlanConfig) -> Result<PlanResult, PlannerError> {
    config.planner.validate()?;
    let analysis = room::analyze(&request.room, &config.planner)?;
    let items = furniture::expand(&request.furniture, &config.planner)?;
    let kua = KuaProfile::from_occupants(&request.occupants);

    let generator = LayoutGenerator::new(&analysis, kua.as_ref(), &config.planner);
    let layouts = match config.ids {
        IdScheme::Sequential => generator.generate(&items, request.life_goal, &mut SequentialIds::new()),
        IdScheme::Uuid => generator.generate(&items, request.life_goal, &mut UuidIds),
    };

    Ok(PlanResult {
        layouts,
        kua,
        analysis,
    })
}

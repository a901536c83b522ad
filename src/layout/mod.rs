//! Furniture placement and layout generation
//!
//! This module takes an analyzed room and a list of furniture items and
//! produces scored layouts, one per strategy. Items are placed greedily in
//! category order; each category has a primary strategy module, and items
//! that do not fit fall back to [`fallback`].

pub mod builder;
pub mod command;
pub mod config;
pub mod error;
pub mod fallback;
pub mod flow;
pub mod generator;
pub mod lint;
pub mod placer;
pub mod score;
pub mod small;
pub mod types;
pub mod wall;

pub use builder::{Candidate, LayoutBuilder};
pub use config::{ConfigError, PlannerConfig};
pub use error::PlannerError;
pub use generator::{IdGenerator, LayoutGenerator, SequentialIds, UuidIds};
pub use lint::{modify_layout, PlacementEdit};
pub use placer::{FurniturePlacer, PlacementContext};
pub use types::*;

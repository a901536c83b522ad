//! Error types for the planner

use thiserror::Error;

use super::config::ConfigError;

/// Errors that can stop planning before any placement happens
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Room width or length is not a positive number
    #[error("invalid room dimensions {width} x {length}: both must be positive")]
    InvalidRoomDimensions { width: f64, length: f64 },

    /// A furniture selection cannot be turned into items
    #[error("invalid furniture '{item}': {reason}")]
    InvalidFurniture { item: String, reason: String },

    /// An edit names an item the layout does not contain
    #[error("no placement for item '{item}' in layout '{layout}'")]
    UnknownPlacement { item: String, layout: String },

    /// An edit asks for a rotation other than a multiple of 90°
    #[error("invalid rotation {degrees}° for item '{item}' (expected 0, 90, 180 or 270)")]
    InvalidRotation { item: String, degrees: u16 },

    /// Planner configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PlannerError {
    /// Create an invalid room dimensions error
    pub fn invalid_room(width: f64, length: f64) -> Self {
        Self::InvalidRoomDimensions { width, length }
    }

    /// Create an invalid furniture error
    pub fn invalid_furniture(item: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFurniture {
            item: item.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown placement error
    pub fn unknown_placement(item: impl Into<String>, layout: impl Into<String>) -> Self {
        Self::UnknownPlacement {
            item: item.into(),
            layout: layout.into(),
        }
    }

    /// The item an error refers to, if any
    pub fn item(&self) -> Option<&str> {
        match self {
            Self::InvalidFurniture { item, .. }
            | Self::UnknownPlacement { item, .. }
            | Self::InvalidRotation { item, .. } => Some(item),
            _ => None,
        }
    }
}

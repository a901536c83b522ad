//! Configuration for the planner
//!
//! Every tunable distance lives here in meters. A config can be built in code
//! with the `with_*` setters or loaded from a TOML file whose keys mirror the
//! field names; missing keys keep their defaults.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a planner config
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Configuration options for layout planning
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// Padding around doors that must stay clear for traffic
    pub door_traffic_buffer: f64,

    /// Footprint (m²) below which an item counts as small
    pub small_item_area: f64,

    /// Thickness of the virtual walls used when none are drawn
    pub virtual_wall_thickness: f64,

    /// Spacing of candidate positions along a wall
    pub wall_step: f64,

    /// Width of an energy-flow path when checking for blockage
    pub flow_thickness: f64,

    /// Clearance kept free in front of doors
    pub door_clearance: f64,

    /// Gap between a companion item and its host
    pub companion_gap: f64,

    /// Seed for the variant layout's jitter
    pub variant_seed: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            door_traffic_buffer: 0.5,
            small_item_area: 0.25,
            virtual_wall_thickness: 0.2,
            wall_step: 0.5,
            flow_thickness: 0.3,
            door_clearance: 1.0,
            companion_gap: 0.1,
            variant_seed: 42,
        }
    }
}

impl PlannerConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: PlannerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every distance is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("door_traffic_buffer", self.door_traffic_buffer),
            ("small_item_area", self.small_item_area),
            ("companion_gap", self.companion_gap),
            ("door_clearance", self.door_clearance),
            ("flow_thickness", self.flow_thickness),
        ];
        for (key, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidValue {
                    key,
                    reason: format!("expected a non-negative number, got {value}"),
                });
            }
        }
        let positive = [
            ("virtual_wall_thickness", self.virtual_wall_thickness),
            ("wall_step", self.wall_step),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidValue {
                    key,
                    reason: format!("expected a positive number, got {value}"),
                });
            }
        }
        Ok(())
    }

    /// Set the door traffic buffer
    pub fn with_door_traffic_buffer(mut self, buffer: f64) -> Self {
        self.door_traffic_buffer = buffer;
        self
    }

    /// Set the small-item footprint threshold
    pub fn with_small_item_area(mut self, area: f64) -> Self {
        self.small_item_area = area;
        self
    }

    /// Set the virtual wall thickness
    pub fn with_virtual_wall_thickness(mut self, thickness: f64) -> Self {
        self.virtual_wall_thickness = thickness;
        self
    }

    /// Set the spacing of positions along a wall
    pub fn with_wall_step(mut self, step: f64) -> Self {
        self.wall_step = step;
        self
    }

    /// Set the flow path width used for blockage checks
    pub fn with_flow_thickness(mut self, thickness: f64) -> Self {
        self.flow_thickness = thickness;
        self
    }

    /// Set the gap between a companion item and its host
    pub fn with_companion_gap(mut self, gap: f64) -> Self {
        self.companion_gap = gap;
        self
    }

    /// Set the door clearance
    pub fn with_door_clearance(mut self, clearance: f64) -> Self {
        self.door_clearance = clearance;
        self
    }

    /// Set the variant seed
    pub fn with_variant_seed(mut self, seed: u64) -> Self {
        self.variant_seed = seed;
        self
    }
}

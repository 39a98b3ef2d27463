//! Options for draw sessions.
//!
//! Options are plain serde data so a host can keep them next to its other
//! settings. Missing fields take their defaults from [`crate::limits`].

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::limits::{
    COORDINATE_PRECISION, DEFAULT_SHAPE_COLOR, DEFAULT_SHAPE_WEIGHT, MAX_GROUP_DEPTH,
};

/// Largest export precision that still means something for an f64.
const MAX_EXPORT_PRECISION: u32 = 15;

/// Options for a [`DrawSessionManager`](crate::draw::DrawSessionManager).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawOptions {
    /// Color for newly drawn shapes when the edited entry has none.
    pub default_color: String,
    /// Stroke weight for newly drawn shapes.
    pub shape_weight: f64,
    /// Maximum nesting of shape groups unwrapped when loading an entry.
    pub max_group_depth: usize,
    /// Decimal digits kept for coordinates exported from the draw group.
    pub export_precision: u32,
    /// Keep marker tools armed after each placement.
    pub repeat_mode: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_SHAPE_COLOR.to_string(),
            shape_weight: DEFAULT_SHAPE_WEIGHT,
            max_group_depth: MAX_GROUP_DEPTH,
            export_precision: COORDINATE_PRECISION,
            repeat_mode: true,
        }
    }
}

impl DrawOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback shape color.
    pub fn default_color(mut self, color: impl Into<String>) -> Self {
        self.default_color = color.into();
        self
    }

    /// Sets the group nesting bound.
    pub fn max_group_depth(mut self, depth: usize) -> Self {
        self.max_group_depth = depth;
        self
    }

    /// Parses options from JSON, filling in defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let options: DrawOptions = serde_json::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// Serializes options as pretty JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.shape_weight.is_finite() || self.shape_weight <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "shape_weight",
                expected: "a positive number",
            });
        }
        if self.max_group_depth == 0 {
            return Err(ConfigError::OutOfRange {
                field: "max_group_depth",
                expected: "at least 1",
            });
        }
        if self.export_precision > MAX_EXPORT_PRECISION {
            return Err(ConfigError::OutOfRange {
                field: "export_precision",
                expected: "at most 15",
            });
        }
        Ok(())
    }
}

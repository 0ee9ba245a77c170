//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object (or [`EngineConfig::default`])
//! reproduces the stock behavior: scale in `[0.1, 5.0]`, zoom steps of 1.1 / 0.9,
//! exclusive viewport edges, no drag threshold, Space as the pan key.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PAN_KEY, SCALE_MAX, SCALE_MIN, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use crate::transform::ScaleBounds;
use crate::viewport::EdgePolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scale_min: f64,
    pub scale_max: f64,
    /// Multiplier for one zoom-in step; must be greater than 1.
    pub zoom_in_factor: f64,
    /// Multiplier for one zoom-out step; must be in `(0, 1)`.
    pub zoom_out_factor: f64,
    pub edge_policy: EdgePolicy,
    /// Screen distance a pressed element must travel before it starts dragging.
    pub drag_threshold_px: f64,
    /// `KeyboardEvent.key` value that forces panning while held.
    pub pan_key: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scale_min: SCALE_MIN,
            scale_max: SCALE_MAX,
            zoom_in_factor: ZOOM_IN_FACTOR,
            zoom_out_factor: ZOOM_OUT_FACTOR,
            edge_policy: EdgePolicy::default(),
            drag_threshold_px: 0.0,
            pan_key: DEFAULT_PAN_KEY.to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or a validation error
    /// from [`EngineConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every field is in range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.scale_min, self.scale_max);
        if !(min.is_finite() && max.is_finite()) || min <= 0.0 || min > max {
            return Err(ConfigError::InvalidScaleBounds { min, max });
        }
        if !self.zoom_in_factor.is_finite() || self.zoom_in_factor <= 1.0 {
            return Err(ConfigError::InvalidZoomFactor { name: "zoom_in_factor", value: self.zoom_in_factor });
        }
        if !self.zoom_out_factor.is_finite() || self.zoom_out_factor <= 0.0 || self.zoom_out_factor >= 1.0 {
            return Err(ConfigError::InvalidZoomFactor { name: "zoom_out_factor", value: self.zoom_out_factor });
        }
        if !self.drag_threshold_px.is_finite() || self.drag_threshold_px < 0.0 {
            return Err(ConfigError::InvalidDragThreshold(self.drag_threshold_px));
        }
        if self.pan_key.is_empty() {
            return Err(ConfigError::EmptyPanKey);
        }
        Ok(())
    }

    #[must_use]
    pub fn scale_bounds(&self) -> ScaleBounds {
        ScaleBounds { min: self.scale_min, max: self.scale_max }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid scale bounds [{min}, {max}]")]
    InvalidScaleBounds { min: f64, max: f64 },
    #[error("invalid {name}: {value}")]
    InvalidZoomFactor { name: &'static str, value: f64 },
    #[error("invalid drag threshold: {0}")]
    InvalidDragThreshold(f64),
    #[error("pan key must not be empty")]
    EmptyPanKey,
}

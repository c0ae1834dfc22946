//! Session configuration.
//!
//! Every tunable constant of the tracking, locking and gizmo code lives in
//! [`GuideConfig`]. Values are in meters, radians and pointer units.

use guide_layout::MarkerParams;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

/// Configuration for a guide session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Vertical translation per horizontal pointer unit (meters).
    pub vertical_sensitivity: f64,
    /// Rotation per horizontal pointer unit (radians). Applied negated.
    pub rotation_sensitivity: f64,
    /// Height of the vertical handle above the model's bounds center (meters).
    pub vertical_gizmo_offset: f64,
    /// Ring radius as a fraction of the larger of the model's Y/Z extents.
    pub ring_radius_factor: f64,
    /// How far the model sinks into the anchor's top when seated (meters).
    pub seat_clearance: f64,
    /// Gap between the model ends and the axis indicators (meters).
    pub indicator_gap: f64,
    /// Model opacity while tracking or locked.
    pub tracking_opacity: f64,
    /// Model opacity once markers are applied.
    pub execution_opacity: f64,
    /// Cutting-plane marker size.
    pub marker: MarkerParams,
    /// Tolerance for the fragment length check (meters).
    pub fragment_length_tolerance: f64,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            vertical_sensitivity: 0.0005,
            rotation_sensitivity: 0.01,
            vertical_gizmo_offset: 0.05,
            ring_radius_factor: 0.25,
            seat_clearance: 0.01,
            indicator_gap: 0.005,
            tracking_opacity: 0.95,
            execution_opacity: 0.7,
            marker: MarkerParams::default(),
            fragment_length_tolerance: 1e-4,
        }
    }
}

impl GuideConfig {
    /// Lower sensitivities for millimeter-level adjustment.
    #[must_use]
    pub fn fine() -> Self {
        Self {
            vertical_sensitivity: 0.0002,
            rotation_sensitivity: 0.004,
            ..Default::default()
        }
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails [`validate`](Self::validate).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is finite and in range.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("vertical_sensitivity", self.vertical_sensitivity),
            ("rotation_sensitivity", self.rotation_sensitivity),
            ("ring_radius_factor", self.ring_radius_factor),
            ("marker.size", self.marker.size),
            ("marker.thickness", self.marker.thickness),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SessionError::invalid_config(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }

        let non_negative = [
            ("vertical_gizmo_offset", self.vertical_gizmo_offset),
            ("seat_clearance", self.seat_clearance),
            ("indicator_gap", self.indicator_gap),
            ("fragment_length_tolerance", self.fragment_length_tolerance),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SessionError::invalid_config(format!(
                    "{name} must be non-negative and finite, got {value}"
                )));
            }
        }

        for (name, value) in [
            ("tracking_opacity", self.tracking_opacity),
            ("execution_opacity", self.execution_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SessionError::invalid_config(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }

        Ok(())
    }
}

//! Marker description handed to the renderer.

use guide_types::{PrincipalAxis, RigidPose};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::palette::Rgba;

/// Size of the flat rectangular cutting-plane marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerParams {
    /// Edge length of the square face in meters.
    pub size: f64,
    /// Plate thickness in meters.
    pub thickness: f64,
}

impl Default for MarkerParams {
    fn default() -> Self {
        Self {
            size: 0.035,
            thickness: 0.0005,
        }
    }
}

impl MarkerParams {
    /// Box dimensions `(x, y, z)` before the slice rotation is applied.
    ///
    /// The thin side depends on the principal axis: Z for `x`, Y for `y`,
    /// X for `z`. Slice angles were authored against these orientations.
    #[must_use]
    pub fn dimensions(&self, axis: PrincipalAxis) -> Vector3<f64> {
        let (s, t) = (self.size, self.thickness);
        match axis {
            PrincipalAxis::X => Vector3::new(s, s, t),
            PrincipalAxis::Y => Vector3::new(s, t, s),
            PrincipalAxis::Z => Vector3::new(t, s, s),
        }
    }
}

/// Which cut of a fragment a marker represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceEnd {
    /// First cut.
    Start,
    /// Second cut.
    End,
}

/// One marker ready to attach under the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerPlacement {
    /// Index of the fragment within its group.
    pub fragment_index: usize,
    /// Which cut of the fragment.
    pub end: SliceEnd,
    /// Pose in the model's local frame.
    pub pose: RigidPose,
    /// Marker color.
    pub color: Rgba,
    /// Marker box dimensions.
    pub dimensions: Vector3<f64>,
}

//! Axis-aligned model bounds.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::pose::RigidPose;

/// Axis-aligned bounds of a model in its own local frame.
///
/// Supplied by the asset loader; the layout engine measures slice offsets from
/// its minimum along the principal axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalBounds {
    /// Center of the box.
    pub center: Vector3<f64>,
    /// Half of the box size along each axis.
    pub half_extents: Vector3<f64>,
}

impl LocalBounds {
    /// Bounds from center and half-extents.
    #[must_use]
    pub const fn new(center: Vector3<f64>, half_extents: Vector3<f64>) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Bounds from opposite corners.
    #[must_use]
    pub fn from_min_max(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        Self {
            center: (min + max) * 0.5,
            half_extents: (max - min).abs() * 0.5,
        }
    }

    /// Minimum corner.
    #[must_use]
    pub fn min(&self) -> Vector3<f64> {
        self.center - self.half_extents
    }

    /// Maximum corner.
    #[must_use]
    pub fn max(&self) -> Vector3<f64> {
        self.center + self.half_extents
    }

    /// Full size along each axis.
    #[must_use]
    pub fn extents(&self) -> Vector3<f64> {
        self.half_extents * 2.0
    }

    /// Lowest local Y.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.center.y - self.half_extents.y
    }

    /// Highest local Y.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.center.y + self.half_extents.y
    }

    /// Center of the box expressed in the pose's parent frame.
    #[must_use]
    pub fn center_in(&self, pose: &RigidPose) -> Vector3<f64> {
        pose.transform_point(&self.center)
    }

    /// True if every half-extent is finite and at least one is positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.center.iter().all(|v| v.is_finite())
            && self.half_extents.iter().all(|v| v.is_finite() && *v >= 0.0)
            && self.half_extents.max() > 0.0
    }
}

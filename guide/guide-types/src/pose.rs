//! Rigid pose type.

use guide_math::{compose_rigid, decompose_rigid, rotate_vector};
use nalgebra::{Matrix4, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Translation (meters) plus unit-quaternion orientation.
///
/// Composition renormalizes the orientation so repeated updates do not drift
/// off the unit sphere.
///
/// # Example
///
/// ```
/// use guide_types::RigidPose;
/// use nalgebra::{UnitQuaternion, Vector3};
///
/// let parent = RigidPose::from_translation(Vector3::new(1.0, 0.0, 0.0));
/// let child = RigidPose::from_translation(Vector3::new(0.0, 2.0, 0.0));
/// let world = parent.compose(&child);
/// assert_eq!(world.translation, Vector3::new(1.0, 2.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidPose {
    /// Translation in meters.
    pub translation: Vector3<f64>,
    /// Orientation.
    pub rotation: UnitQuaternion<f64>,
}

impl Default for RigidPose {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidPose {
    /// Identity pose (origin, no rotation).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Pose from translation and rotation.
    #[must_use]
    pub const fn new(translation: Vector3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Pose with only translation.
    #[must_use]
    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self {
            translation,
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Pose with only rotation.
    #[must_use]
    pub fn from_rotation(rotation: UnitQuaternion<f64>) -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation,
        }
    }

    /// Pose from a rigid homogeneous matrix.
    #[must_use]
    pub fn from_matrix(matrix: &Matrix4<f64>) -> Self {
        let (translation, rotation) = decompose_rigid(matrix);
        Self {
            translation,
            rotation,
        }
    }

    /// Homogeneous matrix `T * R`.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix4<f64> {
        compose_rigid(&self.translation, &self.rotation)
    }

    /// Map a point from this frame into the parent frame.
    #[must_use]
    pub fn transform_point(&self, local: &Vector3<f64>) -> Vector3<f64> {
        rotate_vector(&self.rotation, local) + self.translation
    }

    /// Map a direction from this frame into the parent frame.
    #[must_use]
    pub fn transform_vector(&self, local: &Vector3<f64>) -> Vector3<f64> {
        rotate_vector(&self.rotation, local)
    }

    /// Map a point from the parent frame into this frame.
    #[must_use]
    pub fn inverse_transform_point(&self, parent: &Vector3<f64>) -> Vector3<f64> {
        self.rotation.inverse() * (parent - self.translation)
    }

    /// Map a direction from the parent frame into this frame.
    #[must_use]
    pub fn inverse_transform_vector(&self, parent: &Vector3<f64>) -> Vector3<f64> {
        self.rotation.inverse() * parent
    }

    /// Compose `self * child`: `child` is expressed in this frame.
    #[must_use]
    pub fn compose(&self, child: &Self) -> Self {
        Self {
            translation: self.transform_point(&child.translation),
            rotation: UnitQuaternion::new_normalize(
                (self.rotation * child.rotation).into_inner(),
            ),
        }
    }

    /// Inverse pose.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv_rotation = self.rotation.inverse();
        Self {
            translation: -(inv_rotation * self.translation),
            rotation: inv_rotation,
        }
    }

    /// Local X axis expressed in the parent frame.
    #[must_use]
    pub fn x_axis(&self) -> Vector3<f64> {
        self.transform_vector(&Vector3::x())
    }

    /// Local Y axis expressed in the parent frame.
    #[must_use]
    pub fn y_axis(&self) -> Vector3<f64> {
        self.transform_vector(&Vector3::y())
    }

    /// Check for `NaN` or `Inf` components.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.translation.iter().all(|x| x.is_finite())
            && self.rotation.coords.iter().all(|x| x.is_finite())
    }
}

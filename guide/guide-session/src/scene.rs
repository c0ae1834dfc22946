//! Scene-side state owned by the session.
//!
//! The renderer owns the actual entities. The session only keeps the values
//! it writes to them: the model's parent frame, its local pose, its opacity,
//! and the markers attached under it.

use std::fmt;

use guide_layout::MarkerPlacement;
use guide_types::{AnchorId, LocalBounds, RigidPose};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

/// Renderer entity handle, reported back by the renderer after it builds
/// gizmo geometry and used in pointer hit results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl From<u64> for EntityId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// The 3D model asset as supplied by the asset loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAsset {
    /// Asset identifier; must match the fragment group's `model_name`.
    pub name: String,
    /// Visual bounds in the model's own frame.
    pub bounds: LocalBounds,
}

impl ModelAsset {
    /// Creates an asset description.
    #[must_use]
    pub fn new(name: impl Into<String>, bounds: LocalBounds) -> Self {
        Self {
            name: name.into(),
            bounds,
        }
    }

    /// Check the asset against the model name a fragment group expects.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ModelMismatch`] for a different asset and
    /// [`SessionError::InvalidModelBounds`] for empty or non-finite bounds.
    pub fn validate_for(&self, expected: &str) -> Result<()> {
        if self.name != expected {
            return Err(SessionError::ModelMismatch {
                asset: self.name.clone(),
                expected: expected.to_owned(),
            });
        }
        if !self.bounds.is_valid() {
            return Err(SessionError::InvalidModelBounds {
                model: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// The frame the model is parented under.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelParent {
    /// Live tracking anchor; its pose follows upstream updates.
    Tracking {
        /// Upstream anchor id.
        anchor: AnchorId,
        /// Upright-constrained anchor pose in world space.
        pose: RigidPose,
    },
    /// Static anchor created by the position lock.
    Static {
        /// Frozen world pose.
        pose: RigidPose,
    },
}

impl ModelParent {
    /// World pose of the parent frame.
    #[must_use]
    pub const fn pose(&self) -> &RigidPose {
        match self {
            Self::Tracking { pose, .. } | Self::Static { pose } => pose,
        }
    }

    /// True for a static (locked) parent.
    #[must_use]
    pub const fn is_static(&self) -> bool {
        matches!(self, Self::Static { .. })
    }
}

/// The placed model: parent frame, local pose and everything attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelNode {
    parent: ModelParent,
    /// Pose relative to the parent frame. Gizmos write this.
    pub local: RigidPose,
    bounds: LocalBounds,
    opacity: f64,
    markers: Vec<MarkerPlacement>,
    indicators: (Vector3<f64>, Vector3<f64>),
}

impl ModelNode {
    /// Place a model under a tracking anchor.
    #[must_use]
    pub fn tracking(
        anchor: AnchorId,
        anchor_pose: RigidPose,
        local: RigidPose,
        bounds: LocalBounds,
        opacity: f64,
        indicators: (Vector3<f64>, Vector3<f64>),
    ) -> Self {
        Self {
            parent: ModelParent::Tracking {
                anchor,
                pose: anchor_pose,
            },
            local,
            bounds,
            opacity,
            markers: Vec::new(),
            indicators,
        }
    }

    /// Current parent frame.
    #[must_use]
    pub const fn parent(&self) -> &ModelParent {
        &self.parent
    }

    /// Model bounds in its own frame.
    #[must_use]
    pub const fn bounds(&self) -> &LocalBounds {
        &self.bounds
    }

    /// Model opacity.
    #[must_use]
    pub const fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Attached markers; empty until markers are applied.
    #[must_use]
    pub fn markers(&self) -> &[MarkerPlacement] {
        &self.markers
    }

    /// Axis end indicators in the model frame, `(left, right)`.
    #[must_use]
    pub const fn indicators(&self) -> (Vector3<f64>, Vector3<f64>) {
        self.indicators
    }

    /// World pose: parent pose composed with the local pose.
    #[must_use]
    pub fn world_pose(&self) -> RigidPose {
        self.parent.pose().compose(&self.local)
    }

    /// World position of the model's local bounds center.
    #[must_use]
    pub fn world_center(&self) -> Vector3<f64> {
        self.bounds.center_in(&self.world_pose())
    }

    /// Move the tracking parent. Returns `false` when the parent is static
    /// or belongs to a different anchor.
    pub fn follow_anchor(&mut self, id: AnchorId, pose: RigidPose) -> bool {
        match &mut self.parent {
            ModelParent::Tracking { anchor, pose: current } if *anchor == id => {
                *current = pose;
                true
            }
            _ => false,
        }
    }

    /// Reparent under a static anchor at `world` with an identity local pose.
    pub fn reparent_static(&mut self, world: RigidPose) {
        self.parent = ModelParent::Static { pose: world };
        self.local = RigidPose::identity();
    }

    pub(crate) fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    pub(crate) fn attach_markers(&mut self, markers: Vec<MarkerPlacement>) {
        self.markers = markers;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::UnitQuaternion;

    fn bounds() -> LocalBounds {
        LocalBounds::new(Vector3::new(0.0, 0.02, 0.0), Vector3::new(0.1, 0.05, 0.05))
    }

    fn node() -> ModelNode {
        ModelNode::tracking(
            AnchorId(7),
            RigidPose::from_translation(Vector3::new(1.0, 0.0, 0.0)),
            RigidPose::from_translation(Vector3::new(0.0, 0.1, 0.0)),
            bounds(),
            0.95,
            (Vector3::zeros(), Vector3::zeros()),
        )
    }

    #[test]
    fn world_pose_composes_parent() {
        let node = node();
        assert_relative_eq!(
            node.world_pose().translation,
            Vector3::new(1.0, 0.1, 0.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(node.world_center(), Vector3::new(1.0, 0.12, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn follows_only_its_anchor() {
        let mut node = node();
        let moved = RigidPose::from_translation(Vector3::new(2.0, 0.0, 0.0));
        assert!(!node.follow_anchor(AnchorId(8), moved));
        assert!(node.follow_anchor(AnchorId(7), moved));
        assert_eq!(node.parent().pose(), &moved);
    }

    #[test]
    fn static_parent_ignores_anchor() {
        let mut node = node();
        let world = node.world_pose();
        node.reparent_static(world);
        assert!(node.parent().is_static());
        assert_eq!(node.local, RigidPose::identity());
        assert!(!node.follow_anchor(AnchorId(7), RigidPose::identity()));
        assert_relative_eq!(node.world_pose().translation, world.translation, epsilon = 1e-12);
    }

    #[test]
    fn reparent_keeps_rotation() {
        let mut node = node();
        let world = RigidPose::new(
            Vector3::new(0.3, 0.2, 0.1),
            UnitQuaternion::from_euler_angles(0.0, 0.4, 0.0),
        );
        node.reparent_static(world);
        assert_relative_eq!(node.world_pose().rotation, world.rotation, epsilon = 1e-12);
    }

    #[test]
    fn asset_validation() {
        let asset = ModelAsset::new("blue-1", bounds());
        assert!(asset.validate_for("blue-1").is_ok());
        assert!(matches!(
            asset.validate_for("red-2"),
            Err(SessionError::ModelMismatch { .. })
        ));

        let flat = ModelAsset::new("blue-1", LocalBounds::new(Vector3::zeros(), Vector3::zeros()));
        assert!(matches!(
            flat.validate_for("blue-1"),
            Err(SessionError::InvalidModelBounds { .. })
        ));
    }

    #[test]
    fn entity_display() {
        assert_eq!(EntityId(3).to_string(), "Entity(3)");
        assert_eq!(EntityId::from(4), EntityId(4));
    }
}

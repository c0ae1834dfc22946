//! Where the gizmos sit relative to the model.

use guide_types::RigidPose;
use nalgebra::Vector3;

use crate::config::GuideConfig;
use crate::scene::ModelNode;

/// World placement of both gizmos for the current model transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoPlacements {
    /// Vertical handle position in world space.
    pub vertical_handle: Vector3<f64>,
    /// Rotation ring pose in world space, centered on the model's bounds center.
    pub rotation_ring: RigidPose,
    /// Ring radius in meters.
    pub ring_radius: f64,
}

impl GizmoPlacements {
    /// Compute placements from the model's world pose and bounds.
    #[must_use]
    pub fn compute(model: &ModelNode, config: &GuideConfig) -> Self {
        let world = model.world_pose();
        let bounds = model.bounds();
        let extents = bounds.extents();

        Self {
            vertical_handle: bounds.center_in(&world)
                + Vector3::new(0.0, config.vertical_gizmo_offset, 0.0),
            rotation_ring: world.compose(&RigidPose::from_translation(bounds.center)),
            ring_radius: config.ring_radius_factor * extents.y.max(extents.z),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use guide_types::{AnchorId, LocalBounds};
    use nalgebra::UnitQuaternion;
    use std::f64::consts::FRAC_PI_2;

    fn model(parent: RigidPose) -> ModelNode {
        ModelNode::tracking(
            AnchorId(1),
            parent,
            RigidPose::identity(),
            LocalBounds::new(Vector3::new(0.02, 0.0, 0.0), Vector3::new(0.1, 0.03, 0.05)),
            0.95,
            (Vector3::zeros(), Vector3::zeros()),
        )
    }

    #[test]
    fn handle_above_world_center() {
        let node = model(RigidPose::from_translation(Vector3::new(1.0, 0.5, 0.0)));
        let placements = GizmoPlacements::compute(&node, &GuideConfig::default());
        assert_relative_eq!(
            placements.vertical_handle,
            Vector3::new(1.02, 0.55, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn ring_radius_uses_larger_of_y_z() {
        let node = model(RigidPose::identity());
        let placements = GizmoPlacements::compute(&node, &GuideConfig::default());
        // 0.25 * max(0.06, 0.10)
        assert_relative_eq!(placements.ring_radius, 0.025, epsilon = 1e-12);
    }

    #[test]
    fn ring_follows_model_rotation() {
        let turn = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2);
        let node = model(RigidPose::from_rotation(turn));
        let placements = GizmoPlacements::compute(&node, &GuideConfig::default());

        assert_relative_eq!(placements.rotation_ring.rotation, turn, epsilon = 1e-12);
        assert_relative_eq!(
            placements.rotation_ring.translation,
            Vector3::new(0.0, 0.0, -0.02),
            epsilon = 1e-12
        );
    }
}

//! Property-based tests for gizmo interaction.
//!
//! Run with: cargo test -p guide-session -- proptest

use guide_session::gizmo::{GizmoController, GizmoInteraction, GizmoKind};
use guide_session::{EntityId, GuideConfig};
use guide_types::{LocalBounds, RigidPose};
use nalgebra::{Point2, UnitQuaternion, Vector3};
use proptest::prelude::*;

const RING: EntityId = EntityId(1);
const HANDLE: EntityId = EntityId(2);

// =============================================================================
// Strategies
// =============================================================================

fn arb_pose() -> impl Strategy<Value = RigidPose> {
    (
        prop::array::uniform3(-1.0..1.0f64),
        prop::array::uniform3(-3.1..3.1f64),
    )
        .prop_map(|([x, y, z], [roll, pitch, yaw])| {
            RigidPose::new(
                Vector3::new(x, y, z),
                UnitQuaternion::from_euler_angles(roll, pitch, yaw),
            )
        })
}

fn arb_bounds() -> impl Strategy<Value = LocalBounds> {
    (
        prop::array::uniform3(-0.2..0.2f64),
        prop::array::uniform3(0.005..0.3f64),
    )
        .prop_map(|([cx, cy, cz], [hx, hy, hz])| {
            LocalBounds::new(Vector3::new(cx, cy, cz), Vector3::new(hx, hy, hz))
        })
}

fn arb_drag() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-500.0..500.0f64, 1..20)
}

fn controller() -> GizmoController {
    let mut controller = GizmoController::new();
    controller.install([HANDLE], [RING]);
    controller.set_enabled(true);
    controller
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_rotation_pivot_invariance(
        start in arb_pose(),
        bounds in arb_bounds(),
        drag in arb_drag(),
    ) {
        let config = GuideConfig::default();
        let mut controller = controller();
        let mut local = start;
        let pivot = start.transform_point(&bounds.center);

        prop_assert_eq!(
            controller.begin(Point2::origin(), Some(RING), &local, &bounds),
            Some(GizmoKind::Rotation)
        );
        for x in drag {
            controller.update(Point2::new(x, 0.0), &config, &mut local);
            let now = local.transform_point(&bounds.center);
            prop_assert!((now - pivot).norm() < 1e-9, "pivot drifted by {}", (now - pivot).norm());
            prop_assert!((local.rotation.quaternion().norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn proptest_rotation_depends_only_on_pointer(
        start in arb_pose(),
        bounds in arb_bounds(),
        drag in arb_drag(),
        last in -500.0..500.0f64,
    ) {
        let config = GuideConfig::default();
        let interaction =
            GizmoInteraction::capture(GizmoKind::Rotation, Point2::origin(), &start, &bounds);

        let mut walked = start;
        for x in drag {
            interaction.apply(Point2::new(x, 0.0), &config, &mut walked);
        }
        interaction.apply(Point2::new(last, 0.0), &config, &mut walked);

        let mut direct = start;
        interaction.apply(Point2::new(last, 0.0), &config, &mut direct);

        prop_assert!((walked.translation - direct.translation).norm() < 1e-12);
        prop_assert!(walked.rotation.angle_to(&direct.rotation) < 1e-7);
    }

    #[test]
    fn proptest_vertical_is_linear(
        start in arb_pose(),
        bounds in arb_bounds(),
        dx in -500.0..500.0f64,
    ) {
        let config = GuideConfig::default();
        let mut controller = controller();
        let mut local = start;

        controller.begin(Point2::new(10.0, 10.0), Some(HANDLE), &local, &bounds);
        controller.update(Point2::new(10.0 + dx, -40.0), &config, &mut local);

        let expected = start.translation.y + dx * config.vertical_sensitivity;
        prop_assert!((local.translation.y - expected).abs() < 1e-12);
        prop_assert_eq!(local.translation.x, start.translation.x);
        prop_assert_eq!(local.translation.z, start.translation.z);
        prop_assert_eq!(local.rotation, start.rotation);
    }
}

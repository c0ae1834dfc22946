//! Property-based tests for marker layout.
//!
//! Run with: cargo test -p guide-layout -- proptest

use guide_layout::{MarkerParams, layout_fragment, layout_group, leftmost_point};
use guide_types::{Fragment, FragmentGroup, FragmentSlice, LocalBounds, PrincipalAxis};
use nalgebra::Vector3;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_bounds() -> impl Strategy<Value = LocalBounds> {
    (
        prop::array::uniform3(-0.5..0.5f64),
        prop::array::uniform3(0.001..0.3f64),
    )
        .prop_map(|([cx, cy, cz], [hx, hy, hz])| {
            LocalBounds::new(Vector3::new(cx, cy, cz), Vector3::new(hx, hy, hz))
        })
}

fn arb_axis() -> impl Strategy<Value = PrincipalAxis> {
    prop_oneof![
        Just(PrincipalAxis::X),
        Just(PrincipalAxis::Y),
        Just(PrincipalAxis::Z),
    ]
}

fn arb_slice() -> impl Strategy<Value = FragmentSlice> {
    (0.0..0.4f64, -180.0..180.0f64, -180.0..180.0f64, -180.0..180.0f64)
        .prop_map(|(d, x, y, z)| FragmentSlice::new(d, x, y, z))
}

fn arb_fragment() -> impl Strategy<Value = Fragment> {
    (arb_slice(), arb_slice()).prop_map(|(a, b)| {
        let (start, end) = if a.distance_from_left_anchor <= b.distance_from_left_anchor {
            (a, b)
        } else {
            (b, a)
        };
        let length = end.distance_from_left_anchor - start.distance_from_left_anchor;
        Fragment::new(start, end, length)
    })
}

fn arb_group() -> impl Strategy<Value = FragmentGroup> {
    (arb_axis(), prop::collection::vec(arb_fragment(), 0..10)).prop_map(|(axis, fragments)| {
        FragmentGroup {
            name: "generated".to_owned(),
            description: String::new(),
            model_name: "model".to_owned(),
            principal_axis: axis,
            fragments,
        }
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_layout_is_bit_identical(bounds in arb_bounds(), group in arb_group()) {
        let params = MarkerParams::default();
        let a = layout_group(&bounds, &group, &params);
        let b = layout_group(&bounds, &group, &params);
        prop_assert_eq!(a.len(), group.fragments.len() * 2);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn proptest_markers_lie_on_principal_axis(
        bounds in arb_bounds(),
        axis in arb_axis(),
        fragment in arb_fragment(),
    ) {
        let origin = leftmost_point(&bounds, axis);
        for (pose, slice) in layout_fragment(&bounds, axis, &fragment)
            .iter()
            .zip(fragment.slices())
        {
            let offset = pose.translation - origin;
            let along = offset.dot(&axis.unit_vector());
            prop_assert!((along - slice.distance_from_left_anchor).abs() < 1e-12);
            prop_assert!((offset - axis.unit_vector() * along).norm() < 1e-12);
            prop_assert!((pose.rotation.quaternion().norm() - 1.0).abs() < 1e-12);
        }
    }
}

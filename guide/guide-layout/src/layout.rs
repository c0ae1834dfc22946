//! Marker layout along the principal axis.

use guide_types::{Fragment, FragmentGroup, LocalBounds, PrincipalAxis, RigidPose};
use nalgebra::Vector3;
use tracing::debug;

use crate::marker::{MarkerParams, MarkerPlacement, SliceEnd};
use crate::palette::palette_color;

/// Point where slice offsets start: the bounds minimum along `axis`, centered
/// on the other two axes.
#[must_use]
pub fn leftmost_point(bounds: &LocalBounds, axis: PrincipalAxis) -> Vector3<f64> {
    let i = axis.index();
    let mut point = bounds.center;
    point[i] -= bounds.half_extents[i];
    point
}

/// Local poses of a fragment's start and end markers.
///
/// `position = leftmost + axis * distance`, `orientation = euler(slice angles)`.
#[must_use]
pub fn layout_fragment(
    bounds: &LocalBounds,
    axis: PrincipalAxis,
    fragment: &Fragment,
) -> [RigidPose; 2] {
    let origin = leftmost_point(bounds, axis);
    let direction = axis.unit_vector();
    fragment.slices().map(|slice| {
        RigidPose::new(
            origin + direction * slice.distance_from_left_anchor,
            slice.rotation(),
        )
    })
}

/// Lay out every marker of a group in fragment order, start before end.
///
/// Colors cycle through the palette by fragment index; both markers of a
/// fragment share a color.
#[must_use]
pub fn layout_group(
    bounds: &LocalBounds,
    group: &FragmentGroup,
    params: &MarkerParams,
) -> Vec<MarkerPlacement> {
    let axis = group.principal_axis;
    let dimensions = params.dimensions(axis);

    let placements: Vec<MarkerPlacement> = group
        .fragments
        .iter()
        .enumerate()
        .flat_map(|(fragment_index, fragment)| {
            let color = palette_color(fragment_index);
            let [start, end] = layout_fragment(bounds, axis, fragment);
            [(SliceEnd::Start, start), (SliceEnd::End, end)].map(|(slice_end, pose)| {
                MarkerPlacement {
                    fragment_index,
                    end: slice_end,
                    pose,
                    color,
                    dimensions,
                }
            })
        })
        .collect();

    debug!(
        group = %group.name,
        axis = %axis,
        markers = placements.len(),
        "Laid out fragment markers"
    );
    placements
}

/// Indicator positions just beyond both ends of the model along `axis`.
///
/// Returns `(left, right)`, each `gap` meters outside the bounds.
#[must_use]
pub fn axis_indicators(
    bounds: &LocalBounds,
    axis: PrincipalAxis,
    gap: f64,
) -> (Vector3<f64>, Vector3<f64>) {
    let offset = axis.unit_vector() * (bounds.half_extents[axis.index()] + gap);
    (bounds.center - offset, bounds.center + offset)
}

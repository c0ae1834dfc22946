//! Procedural rotation ring.
//!
//! Used when no custom ring mesh is available. The ring lies in the ring
//! frame's Y/Z plane so it turns around local X. Collision is approximated
//! with a few thick segments instead of the exact torus.

use std::f64::consts::{FRAC_PI_2, TAU};

use guide_types::RigidPose;
use nalgebra::{UnitQuaternion, Vector3};

/// Segments in the visible ring.
pub const VISUAL_SEGMENTS: usize = 32;
/// Direction arrows, one per quarter turn.
pub const ARROW_COUNT: usize = 4;
/// Coarse collision segments.
pub const COLLISION_SEGMENTS: usize = 8;

const VISUAL_THICKNESS: f64 = 0.002;
const COLLISION_THICKNESS: f64 = 0.01;
const COLLISION_LENGTH_FACTOR: f64 = 0.8;

/// A cylinder segment in the ring frame. The cylinder runs along its local Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSegment {
    /// Segment center and orientation.
    pub pose: RigidPose,
    /// Length along the segment axis.
    pub length: f64,
    /// Cylinder radius.
    pub thickness: f64,
}

/// Geometry description the renderer turns into entities.
#[derive(Debug, Clone, PartialEq)]
pub struct RingGeometry {
    /// Ring radius.
    pub radius: f64,
    /// Visible segments.
    pub visual: Vec<RingSegment>,
    /// Arrow poses; each arrow points along its local Y.
    pub arrows: Vec<RigidPose>,
    /// Pickable segments.
    pub collision: Vec<RingSegment>,
}

fn on_ring(radius: f64, angle: f64) -> Vector3<f64> {
    Vector3::new(0.0, radius * angle.sin(), radius * angle.cos())
}

fn about_x(angle: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angle)
}

impl RingGeometry {
    /// Build the fallback ring for `radius`.
    #[must_use]
    pub fn procedural(radius: f64) -> Self {
        let step = TAU / VISUAL_SEGMENTS as f64;
        let visual = (0..VISUAL_SEGMENTS)
            .map(|i| {
                let a = on_ring(radius, i as f64 * step);
                let b = on_ring(radius, (i + 1) as f64 * step);
                let chord = b - a;
                let direction = chord.z.atan2(chord.y);
                RingSegment {
                    pose: RigidPose::new((a + b) * 0.5, about_x(direction)),
                    length: chord.norm(),
                    thickness: VISUAL_THICKNESS,
                }
            })
            .collect();

        let arrows = (0..ARROW_COUNT)
            .map(|i| {
                let angle = i as f64 * FRAC_PI_2;
                RigidPose::new(on_ring(radius, angle), about_x(-angle))
            })
            .collect();

        let collision_step = TAU / COLLISION_SEGMENTS as f64;
        let collision = (0..COLLISION_SEGMENTS)
            .map(|i| {
                let angle = (i as f64 + 0.5) * collision_step;
                RingSegment {
                    pose: RigidPose::new(on_ring(radius, angle), about_x(-angle)),
                    length: radius * COLLISION_LENGTH_FACTOR,
                    thickness: COLLISION_THICKNESS,
                }
            })
            .collect();

        Self {
            radius,
            visual,
            arrows,
            collision,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn segment_counts() {
        let ring = RingGeometry::procedural(0.05);
        assert_eq!(ring.visual.len(), VISUAL_SEGMENTS);
        assert_eq!(ring.arrows.len(), ARROW_COUNT);
        assert_eq!(ring.collision.len(), COLLISION_SEGMENTS);
    }

    #[test]
    fn ring_lies_in_yz_plane() {
        let ring = RingGeometry::procedural(0.05);
        let chord_mid = 0.05 * (PI / VISUAL_SEGMENTS as f64).cos();
        for segment in &ring.visual {
            assert_relative_eq!(segment.pose.translation.x, 0.0);
            assert_relative_eq!(segment.pose.translation.norm(), chord_mid, epsilon = 1e-12);
        }
        for segment in &ring.collision {
            assert_relative_eq!(segment.pose.translation.norm(), 0.05, epsilon = 1e-12);
            assert_relative_eq!(segment.length, 0.04, epsilon = 1e-12);
        }
    }

    #[test]
    fn segments_are_tangent() {
        let ring = RingGeometry::procedural(0.05);
        for segment in ring.visual.iter().chain(&ring.collision) {
            let axis = segment.pose.rotation * Vector3::y();
            let radial = segment.pose.translation.normalize();
            assert_relative_eq!(axis.dot(&radial), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn visual_segments_close_the_loop() {
        let ring = RingGeometry::procedural(0.1);
        let total: f64 = ring.visual.iter().map(|s| s.length).sum();
        let expected = 2.0 * VISUAL_SEGMENTS as f64 * 0.1 * (PI / VISUAL_SEGMENTS as f64).sin();
        assert_relative_eq!(total, expected, epsilon = 1e-12);
    }
}

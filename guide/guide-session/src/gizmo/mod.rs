//! Manipulation gizmos for the locked model.

mod controller;
mod placement;
mod registry;
mod ring;

pub use controller::{GestureOutcome, GizmoController, GizmoInteraction};
pub use placement::GizmoPlacements;
pub use registry::{GizmoKind, GizmoRegistry};
pub use ring::{ARROW_COUNT, COLLISION_SEGMENTS, RingGeometry, RingSegment, VISUAL_SEGMENTS};

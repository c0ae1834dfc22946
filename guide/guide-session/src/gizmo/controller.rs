//! Drag gestures on the vertical handle and the rotation ring.
//!
//! The controller writes the model's local pose (relative to its static
//! parent). All reference values are captured once at gesture begin and every
//! update is evaluated from them, so the result depends only on the current
//! pointer position.

use guide_math::axis_angle;
use guide_types::{LocalBounds, RigidPose};
use nalgebra::{Point2, UnitQuaternion, Vector3};
use tracing::debug;

use super::registry::{GizmoKind, GizmoRegistry};
use crate::config::GuideConfig;
use crate::events::{GesturePhase, PointerEvent};
use crate::scene::EntityId;

/// Reference state captured at gesture begin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GizmoInteraction {
    /// Vertical handle drag.
    Vertical {
        /// Pointer position at begin.
        start: Point2<f64>,
        /// Local Y translation at begin.
        initial_y: f64,
    },
    /// Rotation ring drag.
    Rotation {
        /// Pointer position at begin.
        start: Point2<f64>,
        /// Local rotation at begin.
        initial_rotation: UnitQuaternion<f64>,
        /// Model X axis at begin, in the parent frame.
        axis: Vector3<f64>,
        /// Pivot in the model frame (bounds center).
        pivot_local: Vector3<f64>,
        /// Pivot in the parent frame at begin.
        pivot_parent: Vector3<f64>,
    },
}

impl GizmoInteraction {
    /// Which gizmo this interaction drives.
    #[must_use]
    pub const fn kind(&self) -> GizmoKind {
        match self {
            Self::Vertical { .. } => GizmoKind::Vertical,
            Self::Rotation { .. } => GizmoKind::Rotation,
        }
    }

    /// Capture reference state for a drag on `kind`.
    #[must_use]
    pub fn capture(
        kind: GizmoKind,
        start: Point2<f64>,
        local: &RigidPose,
        bounds: &LocalBounds,
    ) -> Self {
        match kind {
            GizmoKind::Vertical => Self::Vertical {
                start,
                initial_y: local.translation.y,
            },
            GizmoKind::Rotation => Self::Rotation {
                start,
                initial_rotation: local.rotation,
                axis: local.x_axis(),
                pivot_local: bounds.center,
                pivot_parent: local.transform_point(&bounds.center),
            },
        }
    }

    /// Evaluate the local pose for the pointer at `location`.
    pub fn apply(&self, location: Point2<f64>, config: &GuideConfig, local: &mut RigidPose) {
        match *self {
            Self::Vertical { start, initial_y } => {
                let dx = location.x - start.x;
                local.translation.y = initial_y + dx * config.vertical_sensitivity;
            }
            Self::Rotation {
                start,
                initial_rotation,
                axis,
                pivot_local,
                pivot_parent,
            } => {
                let angle = (location.x - start.x) * -config.rotation_sensitivity;
                let delta = axis_angle(&axis, angle);
                local.rotation = UnitQuaternion::new_normalize(
                    (delta * initial_rotation).into_inner(),
                );
                let moved = local.transform_point(&pivot_local);
                local.translation += pivot_parent - moved;
            }
        }
    }
}

/// What a pointer event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// A gizmo drag started.
    Started(GizmoKind),
    /// The active drag moved the model.
    Updated(GizmoKind),
    /// The active drag finished or was cancelled.
    Finished(GizmoKind),
    /// Nothing happened: disabled, missed, or no active drag.
    Ignored,
}

/// Owns the gizmo registry and the single active interaction.
#[derive(Debug, Clone)]
pub struct GizmoController {
    registry: GizmoRegistry,
    enabled: bool,
    active: Option<GizmoInteraction>,
}

impl Default for GizmoController {
    fn default() -> Self {
        Self::new()
    }
}

impl GizmoController {
    /// Disabled controller with no registered entities.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: GizmoRegistry::new(),
            enabled: false,
            active: None,
        }
    }

    /// Register the entities the renderer built for each gizmo.
    pub fn install(
        &mut self,
        vertical: impl IntoIterator<Item = EntityId>,
        rotation: impl IntoIterator<Item = EntityId>,
    ) {
        self.registry.register_all(vertical, GizmoKind::Vertical);
        self.registry.register_all(rotation, GizmoKind::Rotation);
        debug!(entities = self.registry.len(), "Installed gizmo entities");
    }

    /// Ownership table.
    #[must_use]
    pub const fn registry(&self) -> &GizmoRegistry {
        &self.registry
    }

    /// Show or hide the gizmos. Hiding abandons any active drag.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.cancel();
        }
    }

    /// True if the gizmos are visible and interactive.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Active interaction, if a drag is in progress.
    #[must_use]
    pub const fn active(&self) -> Option<&GizmoInteraction> {
        self.active.as_ref()
    }

    /// Start a drag if `hit` belongs to a gizmo.
    ///
    /// Ignored while disabled, while another drag is active, or on a miss.
    pub fn begin(
        &mut self,
        location: Point2<f64>,
        hit: Option<EntityId>,
        local: &RigidPose,
        bounds: &LocalBounds,
    ) -> Option<GizmoKind> {
        if !self.enabled || self.active.is_some() {
            return None;
        }
        let kind = self.registry.owner(hit?)?;
        self.active = Some(GizmoInteraction::capture(kind, location, local, bounds));
        debug!(gizmo = %kind, x = location.x, y = location.y, "Gizmo drag began");
        Some(kind)
    }

    /// Re-evaluate the active drag at `location`.
    pub fn update(
        &mut self,
        location: Point2<f64>,
        config: &GuideConfig,
        local: &mut RigidPose,
    ) -> Option<GizmoKind> {
        let interaction = self.active.as_ref()?;
        interaction.apply(location, config, local);
        Some(interaction.kind())
    }

    /// Finish the active drag, keeping the current pose.
    pub fn end(&mut self) -> Option<GizmoKind> {
        let kind = self.active.take()?.kind();
        debug!(gizmo = %kind, "Gizmo drag ended");
        Some(kind)
    }

    /// Abandon the active drag. The pose already written stays as is.
    pub fn cancel(&mut self) -> Option<GizmoKind> {
        let kind = self.active.take()?.kind();
        debug!(gizmo = %kind, "Gizmo drag cancelled");
        Some(kind)
    }

    /// Dispatch a pointer event by phase.
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        config: &GuideConfig,
        local: &mut RigidPose,
        bounds: &LocalBounds,
    ) -> GestureOutcome {
        let outcome = match event.phase {
            GesturePhase::Began => self
                .begin(event.location, event.hit, local, bounds)
                .map(GestureOutcome::Started),
            GesturePhase::Changed => self
                .update(event.location, config, local)
                .map(GestureOutcome::Updated),
            GesturePhase::Ended => self.end().map(GestureOutcome::Finished),
            GesturePhase::Cancelled => self.cancel().map(GestureOutcome::Finished),
        };
        outcome.unwrap_or(GestureOutcome::Ignored)
    }

    /// Drop the registry, the active drag and visibility.
    pub fn reset(&mut self) {
        self.set_enabled(false);
        self.registry.clear();
    }
}

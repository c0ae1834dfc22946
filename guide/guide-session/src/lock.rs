//! Position lock.

use guide_math::{compose_rigid, constrain_to_upright, decompose_rigid};
use guide_types::{RigidPose, SessionState};
use tracing::{debug, info};

use crate::context::{LockedTransform, SessionContext};
use crate::error::{Result, SessionError};
use crate::scene::ModelParent;

/// Result of a lock request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LockOutcome {
    /// The pose was frozen.
    Locked(LockedTransform),
    /// The session was already locked; nothing changed.
    AlreadyLocked,
}

/// Freeze the model's current world pose under a static anchor.
///
/// The world rotation is passed through the upright constraint once and
/// recombined with the world translation. The model then gets an identity
/// local pose under a static anchor at that transform, so anchor updates no
/// longer reach it. Gizmos and the per-frame refresh start here.
///
/// # Errors
///
/// Returns [`SessionError::CommandRejected`] outside `Tracking`, and
/// [`SessionError::NoTrackedModel`] if nothing has been placed.
pub fn lock_position(ctx: &mut SessionContext) -> Result<LockOutcome> {
    if ctx.state.is_locked() {
        debug!(state = %ctx.state, "Lock requested while already locked");
        return Ok(LockOutcome::AlreadyLocked);
    }
    if ctx.state != SessionState::Tracking {
        return Err(SessionError::rejected("lock", ctx.state));
    }
    let model = ctx.model.as_mut().ok_or(SessionError::NoTrackedModel)?;

    let source_anchor = match model.parent() {
        ModelParent::Tracking { anchor, .. } => Some(*anchor),
        ModelParent::Static { .. } => None,
    };
    let (translation, rotation) = decompose_rigid(&model.world_pose().to_matrix());
    let frozen = RigidPose::from_matrix(&compose_rigid(
        &translation,
        &constrain_to_upright(&rotation),
    ));
    model.reparent_static(frozen);

    let locked = LockedTransform {
        pose: frozen,
        source_anchor,
    };
    ctx.locked = Some(locked);
    ctx.gizmos.set_enabled(true);
    ctx.refresh.start();
    ctx.refresh_gizmos();

    info!(
        x = frozen.translation.x,
        y = frozen.translation.y,
        z = frozen.translation.z,
        "Model position locked"
    );
    ctx.set_state(SessionState::Locked, "position locked");
    Ok(LockOutcome::Locked(locked))
}

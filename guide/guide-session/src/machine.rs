//! Tracking state machine.
//!
//! Transitions:
//!
//! ```text
//! initializing --coaching shows--> coaching --coaching dismissed--> searching
//! searching/limited/failed --target anchor added--> tracking
//! tracking <--quality--> limited / failed
//! tracking --lock--> locked --apply--> execution
//! any --reset--> initializing
//! ```
//!
//! While unlocked, anchor poses are passed through the upright constraint and
//! written to the model's parent frame. Once locked, anchor updates are
//! dropped.

use guide_layout::{axis_indicators, layout_group};
use guide_math::constrain_to_upright;
use guide_types::{RigidPose, SessionState, TrackingQuality};
use nalgebra::Vector3;
use tracing::{debug, info};

use crate::context::SessionContext;
use crate::error::{Result, SessionError};
use crate::events::{AnchorChange, AnchorEvent, CoachingSignal, PointerEvent};
use crate::gizmo::GestureOutcome;
use crate::scene::ModelNode;

/// Anchor pose with the twist about the forward axis removed.
#[must_use]
pub fn upright_pose(pose: &RigidPose) -> RigidPose {
    RigidPose::new(pose.translation, constrain_to_upright(&pose.rotation))
}

/// React to an anchor notification. Returns `true` if it changed anything.
pub fn handle_anchor_event(ctx: &mut SessionContext, event: &AnchorEvent) -> bool {
    if event.reference_object != ctx.reference_object {
        debug!(
            anchor = %event.anchor_id,
            object = %event.reference_object,
            "Ignoring anchor for another reference object"
        );
        return false;
    }

    match event.change {
        AnchorChange::Added => on_anchor_added(ctx, event),
        AnchorChange::Updated => on_anchor_updated(ctx, event),
        AnchorChange::Removed => on_anchor_removed(ctx, event),
    }
}

fn on_anchor_added(ctx: &mut SessionContext, event: &AnchorEvent) -> bool {
    if ctx.state.is_locked() {
        debug!(anchor = %event.anchor_id, state = %ctx.state, "Anchor added after lock; ignored");
        return false;
    }

    let anchor_pose = event
        .pose
        .as_ref()
        .map_or_else(RigidPose::identity, upright_pose);
    let model_bounds = ctx.asset.bounds;
    let seat = event.bounds.map_or(0.0, |anchor| {
        anchor.top() - model_bounds.bottom() - ctx.config.seat_clearance
    });
    let indicators = axis_indicators(
        &model_bounds,
        ctx.group.principal_axis,
        ctx.config.indicator_gap,
    );

    ctx.model = Some(ModelNode::tracking(
        event.anchor_id,
        anchor_pose,
        RigidPose::from_translation(Vector3::new(0.0, seat, 0.0)),
        model_bounds,
        ctx.config.tracking_opacity,
        indicators,
    ));
    ctx.target_anchor = Some(event.anchor_id);
    ctx.gizmos.set_enabled(false);

    info!(
        anchor = %event.anchor_id,
        model = %ctx.asset.name,
        seat_offset = seat,
        "Reference object detected; model placed"
    );
    ctx.set_state(SessionState::Tracking, "reference object detected");
    true
}

fn on_anchor_updated(ctx: &mut SessionContext, event: &AnchorEvent) -> bool {
    if ctx.target_anchor != Some(event.anchor_id) {
        return false;
    }
    if !ctx.state.accepts_anchor_updates() {
        debug!(anchor = %event.anchor_id, state = %ctx.state, "Anchor update ignored");
        return false;
    }
    let (Some(pose), Some(model)) = (event.pose.as_ref(), ctx.model.as_mut()) else {
        return false;
    };
    model.follow_anchor(event.anchor_id, upright_pose(pose))
}

fn on_anchor_removed(ctx: &mut SessionContext, event: &AnchorEvent) -> bool {
    if ctx.target_anchor != Some(event.anchor_id) {
        return false;
    }
    ctx.target_anchor = None;

    if ctx.state.is_locked() {
        debug!(anchor = %event.anchor_id, "Tracking anchor removed after lock");
    } else {
        info!(anchor = %event.anchor_id, "Tracking anchor removed");
        reset_session(ctx);
    }
    true
}

/// React to a camera tracking-quality change.
///
/// Only the tracking-family states follow quality; coaching, locked and
/// execution keep their state.
pub fn handle_tracking_quality(ctx: &mut SessionContext, quality: TrackingQuality) -> bool {
    ctx.quality = Some(quality);
    if !ctx.state.follows_tracking_quality() {
        debug!(state = %ctx.state, ?quality, "Tracking quality ignored");
        return false;
    }

    let next = match quality {
        TrackingQuality::NotAvailable => SessionState::Failed,
        TrackingQuality::Limited(_) => SessionState::Limited,
        TrackingQuality::Normal if ctx.target_anchor.is_some() => SessionState::Tracking,
        TrackingQuality::Normal => SessionState::Searching,
    };
    let changed = next != ctx.state;
    ctx.set_state(next, "tracking quality changed");
    changed
}

/// React to a coaching overlay signal.
pub fn handle_coaching(ctx: &mut SessionContext, signal: CoachingSignal) -> bool {
    match signal {
        CoachingSignal::WillActivate => {
            let idle = matches!(
                ctx.state,
                SessionState::Initializing
                    | SessionState::Searching
                    | SessionState::Normal
                    | SessionState::Limited
                    | SessionState::Failed
            );
            if idle && ctx.target_anchor.is_none() {
                ctx.set_state(SessionState::Coaching, "coaching shown");
                true
            } else {
                false
            }
        }
        CoachingSignal::DidDeactivate => {
            if ctx.state == SessionState::Coaching {
                ctx.set_state(SessionState::Searching, "coaching dismissed");
                true
            } else {
                false
            }
        }
        CoachingSignal::RequestedReset => {
            reset_session(ctx);
            true
        }
    }
}

/// Route a pointer event to the gizmos. Only active while locked.
pub fn handle_pointer(ctx: &mut SessionContext, event: &PointerEvent) -> GestureOutcome {
    if !ctx.state.allows_gizmos() {
        return GestureOutcome::Ignored;
    }
    let Some(model) = ctx.model.as_mut() else {
        return GestureOutcome::Ignored;
    };
    let bounds = *model.bounds();
    ctx.gizmos
        .handle(event, &ctx.config, &mut model.local, &bounds)
}

/// Frame tick: refresh gizmo placements while subscribed.
pub fn handle_frame(ctx: &mut SessionContext) -> bool {
    if !ctx.refresh.tick() {
        return false;
    }
    ctx.refresh_gizmos();
    true
}

/// Place the fragment markers and enter execution.
///
/// # Errors
///
/// Returns [`SessionError::CommandRejected`] unless the session is locked.
pub fn apply_fragments(ctx: &mut SessionContext) -> Result<usize> {
    if ctx.state != SessionState::Locked {
        return Err(SessionError::rejected("apply", ctx.state));
    }
    let model = ctx.model.as_mut().ok_or(SessionError::NoTrackedModel)?;

    let markers = layout_group(model.bounds(), &ctx.group, &ctx.config.marker);
    let count = markers.len();
    model.attach_markers(markers);
    model.set_opacity(ctx.config.execution_opacity);
    ctx.gizmos.set_enabled(false);

    info!(group = %ctx.group.name, markers = count, "Applied fragment markers");
    ctx.set_state(SessionState::Execution, "markers applied");
    Ok(count)
}

/// Discard every transient transform and gizmo state.
///
/// Cancels the frame subscription and abandons any drag in progress.
pub fn reset_session(ctx: &mut SessionContext) {
    ctx.refresh.cancel();
    ctx.gizmos.reset();
    ctx.placements = None;
    ctx.model = None;
    ctx.locked = None;
    ctx.target_anchor = None;
    ctx.quality = None;

    info!(from = %ctx.state, "Session reset");
    ctx.set_state(SessionState::Initializing, "session reset");
}

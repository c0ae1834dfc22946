//! The session owner.

use guide_layout::MarkerPlacement;
use guide_types::{FragmentGroup, RigidPose, SessionState};
use nalgebra::Vector3;
use tracing::{debug, info, warn};

use crate::config::GuideConfig;
use crate::context::{LockedTransform, SessionContext};
use crate::error::{Result, SessionError};
use crate::events::{
    EventQueue, EventSender, PointerEvent, SessionCommand, SessionEvent, event_channel,
};
use crate::gizmo::{GestureOutcome, GizmoPlacements};
use crate::lock::{LockOutcome, lock_position};
use crate::machine;
use crate::scene::{EntityId, ModelAsset, ModelNode};

/// Upper bound on the events one [`GuideSession::pump`] call handles.
pub const MAX_EVENTS_PER_PUMP: usize = 1024;

/// What a call to [`GuideSession::pump`] processed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PumpSummary {
    /// Events drained from the queue.
    pub processed: usize,
    /// Commands that were rejected, with the reason.
    pub rejected: Vec<(SessionCommand, String)>,
    /// The call stopped at its event limit; more events may be queued.
    pub limit_reached: bool,
}

impl PumpSummary {
    /// True if every command was accepted.
    #[must_use]
    pub fn all_accepted(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// A running guide session.
///
/// Owns the [`SessionContext`] and the receiving end of the event queue.
/// Collaborators on other threads push events through [`sender`](Self::sender);
/// the owner calls [`pump`](Self::pump) on its own thread, which is the only
/// place model transforms are written.
///
/// # Example
///
/// ```
/// use guide_session::{AnchorEvent, GuideConfig, GuideSession, ModelAsset, SessionCommand};
/// use guide_types::{AnchorId, Catalog, LocalBounds, RigidPose, SessionState};
/// use nalgebra::Vector3;
///
/// let asset = ModelAsset::new(
///     "blue-1",
///     LocalBounds::new(Vector3::zeros(), Vector3::new(0.1, 0.05, 0.05)),
/// );
/// let mut session =
///     GuideSession::activate(GuideConfig::default(), Catalog::sample_group(), asset, "fibula")?;
///
/// let events = session.sender();
/// events.send(AnchorEvent::added(AnchorId(1), "fibula", RigidPose::identity()));
/// events.send(SessionCommand::Lock);
/// session.pump();
///
/// assert_eq!(session.state(), SessionState::Locked);
/// # Ok::<(), guide_session::SessionError>(())
/// ```
#[derive(Debug)]
pub struct GuideSession {
    ctx: SessionContext,
    sender: EventSender,
    queue: EventQueue,
}

impl GuideSession {
    /// Validate the inputs and start a session in `Initializing`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error; no session is created in that case.
    pub fn activate(
        config: GuideConfig,
        group: FragmentGroup,
        asset: ModelAsset,
        reference_object: impl Into<String>,
    ) -> Result<Self> {
        let ctx = SessionContext::new(config, group, asset, reference_object)?;
        let (sender, queue) = event_channel();
        info!(
            group = %ctx.group().name,
            model = %ctx.asset().name,
            reference = %ctx.reference_object(),
            "Guide session activated"
        );
        Ok(Self { ctx, sender, queue })
    }

    /// A sender for this session's queue.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }

    /// Drain pending events in arrival order, at most
    /// [`MAX_EVENTS_PER_PUMP`] of them.
    ///
    /// Rejected commands are logged and collected; they never stop the pump.
    /// Events past the cap stay queued for the next call, so a producer that
    /// never stops sending cannot hold the owner's thread.
    pub fn pump(&mut self) -> PumpSummary {
        self.pump_at_most(MAX_EVENTS_PER_PUMP)
    }

    /// Drain at most `limit` pending events in arrival order.
    pub fn pump_at_most(&mut self, limit: usize) -> PumpSummary {
        let mut summary = PumpSummary::default();
        while summary.processed < limit {
            let Some(event) = self.queue.try_next() else {
                return summary;
            };
            summary.processed += 1;
            let command = match &event {
                SessionEvent::Command(command) => Some(*command),
                _ => None,
            };
            if let Err(err) = self.handle(event) {
                if let Some(command) = command {
                    summary.rejected.push((command, err.to_string()));
                }
            }
        }
        summary.limit_reached = true;
        debug!(limit, "Pump limit reached, remaining events stay queued");
        summary
    }

    /// Process one event immediately.
    ///
    /// # Errors
    ///
    /// Returns the error of a rejected [`SessionCommand`]. Other events never
    /// fail.
    pub fn handle(&mut self, event: SessionEvent) -> Result<()> {
        match event {
            SessionEvent::Anchor(anchor) => {
                machine::handle_anchor_event(&mut self.ctx, &anchor);
            }
            SessionEvent::TrackingQuality(quality) => {
                machine::handle_tracking_quality(&mut self.ctx, quality);
            }
            SessionEvent::Coaching(signal) => {
                machine::handle_coaching(&mut self.ctx, signal);
            }
            SessionEvent::Pointer(pointer) => {
                self.pointer(&pointer);
            }
            SessionEvent::Frame => {
                machine::handle_frame(&mut self.ctx);
            }
            SessionEvent::Command(command) => {
                if let Err(err) = self.command(command) {
                    warn!(command = command.as_str(), error = %err, "Command rejected");
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    fn command(&mut self, command: SessionCommand) -> Result<()> {
        match command {
            SessionCommand::Lock => self.lock().map(|_| ()),
            SessionCommand::Apply => self.apply().map(|_| ()),
            SessionCommand::Reset => {
                self.reset();
                Ok(())
            }
        }
    }

    /// Route a pointer event to the gizmos.
    pub fn pointer(&mut self, event: &PointerEvent) -> GestureOutcome {
        let outcome = machine::handle_pointer(&mut self.ctx, event);
        if outcome == GestureOutcome::Ignored {
            debug!(phase = ?event.phase, "Pointer event ignored");
        }
        outcome
    }

    /// Freeze the model pose.
    ///
    /// # Errors
    ///
    /// See [`lock_position`].
    pub fn lock(&mut self) -> Result<LockOutcome> {
        lock_position(&mut self.ctx)
    }

    /// Place the fragment markers and enter execution. Returns the marker count.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::CommandRejected`] unless locked.
    pub fn apply(&mut self) -> Result<usize> {
        machine::apply_fragments(&mut self.ctx)
    }

    /// Start over from `Initializing`.
    pub fn reset(&mut self) {
        machine::reset_session(&mut self.ctx);
    }

    /// Register the entities the renderer built for the gizmos.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoTrackedModel`] if no model has been placed.
    pub fn install_gizmos(
        &mut self,
        vertical: impl IntoIterator<Item = EntityId>,
        rotation: impl IntoIterator<Item = EntityId>,
    ) -> Result<()> {
        if self.ctx.model.is_none() {
            return Err(SessionError::NoTrackedModel);
        }
        self.ctx.gizmos.install(vertical, rotation);
        Ok(())
    }

    /// Shared session state.
    #[must_use]
    pub const fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.ctx.state()
    }

    /// Model world pose, once placed.
    #[must_use]
    pub fn model_pose(&self) -> Option<RigidPose> {
        self.ctx.model().map(ModelNode::world_pose)
    }

    /// Model opacity, once placed.
    #[must_use]
    pub fn model_opacity(&self) -> Option<f64> {
        self.ctx.model().map(ModelNode::opacity)
    }

    /// True while the gizmos are shown.
    #[must_use]
    pub const fn gizmos_visible(&self) -> bool {
        self.ctx.gizmos().is_enabled()
    }

    /// Latest gizmo placements.
    #[must_use]
    pub const fn gizmo_placements(&self) -> Option<&GizmoPlacements> {
        self.ctx.gizmo_placements()
    }

    /// Markers in the model frame; empty until applied.
    #[must_use]
    pub fn markers(&self) -> &[MarkerPlacement] {
        self.ctx.model().map_or(&[][..], ModelNode::markers)
    }

    /// Frozen transform, once locked.
    #[must_use]
    pub const fn locked_transform(&self) -> Option<&LockedTransform> {
        self.ctx.locked_transform()
    }

    /// Axis end indicators in the model frame, once placed.
    #[must_use]
    pub fn indicators(&self) -> Option<(Vector3<f64>, Vector3<f64>)> {
        self.ctx.model().map(ModelNode::indicators)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::events::AnchorEvent;
    use approx::assert_relative_eq;
    use guide_types::{AnchorId, Catalog, LocalBounds};

    fn session() -> GuideSession {
        GuideSession::activate(
            GuideConfig::default(),
            Catalog::sample_group(),
            ModelAsset::new(
                "blue-1",
                LocalBounds::new(Vector3::zeros(), Vector3::new(0.1, 0.05, 0.05)),
            ),
            "fibula",
        )
        .unwrap()
    }

    #[test]
    fn pump_reports_rejected_commands() {
        let mut session = session();
        let tx = session.sender();
        tx.send(SessionCommand::Apply);
        tx.send(SessionCommand::Lock);
        tx.send(SessionEvent::Frame);

        let summary = session.pump();
        assert_eq!(summary.processed, 3);
        assert_eq!(summary.rejected.len(), 2);
        assert_eq!(summary.rejected[0].0, SessionCommand::Apply);
        assert!(summary.rejected[1].1.contains("cannot lock"));
        assert!(!summary.all_accepted());
    }

    #[test]
    fn pump_continues_after_rejection() {
        let mut session = session();
        let tx = session.sender();
        tx.send(SessionCommand::Lock);
        tx.send(AnchorEvent::added(AnchorId(1), "fibula", RigidPose::identity()));
        tx.send(SessionCommand::Lock);

        let summary = session.pump();
        assert_eq!(summary.rejected.len(), 1);
        assert_eq!(session.state(), SessionState::Locked);
    }

    #[test]
    fn pump_stops_at_limit_and_keeps_the_rest() {
        let mut session = session();
        let tx = session.sender();
        for _ in 0..10 {
            tx.send(SessionEvent::Frame);
        }

        let first = session.pump_at_most(4);
        assert_eq!(first.processed, 4);
        assert!(first.limit_reached);

        let rest = session.pump();
        assert_eq!(rest.processed, 6);
        assert!(!rest.limit_reached);
    }

    #[test]
    fn pump_returns_while_a_producer_keeps_sending() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let mut session = session();
        let tx = session.sender();
        for _ in 0..2 * MAX_EVENTS_PER_PUMP {
            tx.send(SessionEvent::Frame);
        }
        let stop = Arc::new(AtomicBool::new(false));
        let producer = {
            let stop = Arc::clone(&stop);
            std::thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    tx.send(SessionEvent::Frame);
                }
            })
        };

        let summary = session.pump();
        assert_eq!(summary.processed, MAX_EVENTS_PER_PUMP);
        assert!(summary.limit_reached);

        stop.store(true, Ordering::Relaxed);
        producer.join().unwrap();
    }

    #[test]
    fn accessors_before_placement() {
        let session = session();
        assert!(session.model_pose().is_none());
        assert!(session.model_opacity().is_none());
        assert!(session.markers().is_empty());
        assert!(session.indicators().is_none());
        assert!(!session.gizmos_visible());
    }

    #[test]
    fn install_requires_model() {
        let mut session = session();
        assert!(session.install_gizmos([EntityId(1)], [EntityId(2)]).is_err());
        session
            .handle(AnchorEvent::added(AnchorId(1), "fibula", RigidPose::identity()).into())
            .unwrap();
        session.install_gizmos([EntityId(1)], [EntityId(2)]).unwrap();
        assert_eq!(session.context().gizmos().registry().len(), 2);
    }

    #[test]
    fn indicators_follow_principal_axis() {
        let mut session = session();
        session
            .handle(AnchorEvent::added(AnchorId(1), "fibula", RigidPose::identity()).into())
            .unwrap();
        let (left, right) = session.indicators().unwrap();
        assert_relative_eq!(left, Vector3::new(-0.105, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(right, Vector3::new(0.105, 0.0, 0.0), epsilon = 1e-12);
    }
}

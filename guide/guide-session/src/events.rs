//! Typed session inputs and the queue that serializes them.
//!
//! Tracking callbacks, UI gestures and frame ticks may originate on any
//! thread. They are pushed through an [`EventSender`] and drained in arrival
//! order by the single owner of the session.

use std::sync::mpsc;

use guide_types::{AnchorId, LocalBounds, RigidPose, TrackingQuality};
use nalgebra::Point2;

use crate::scene::EntityId;

/// Kind of anchor change reported by the tracking provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorChange {
    /// Anchor detected for the first time.
    Added,
    /// Anchor pose refreshed.
    Updated,
    /// Anchor lost.
    Removed,
}

/// One anchor notification from the tracking provider.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorEvent {
    /// Upstream anchor id.
    pub anchor_id: AnchorId,
    /// Name of the reference object this anchor was detected from.
    pub reference_object: String,
    /// What happened.
    pub change: AnchorChange,
    /// World pose, when the provider has one.
    pub pose: Option<RigidPose>,
    /// The anchor's own bounding box in its frame, when known.
    pub bounds: Option<LocalBounds>,
}

impl AnchorEvent {
    fn new(
        anchor_id: AnchorId,
        reference_object: impl Into<String>,
        change: AnchorChange,
        pose: Option<RigidPose>,
    ) -> Self {
        Self {
            anchor_id,
            reference_object: reference_object.into(),
            change,
            pose,
            bounds: None,
        }
    }

    /// Anchor added with a pose.
    #[must_use]
    pub fn added(anchor_id: AnchorId, reference_object: impl Into<String>, pose: RigidPose) -> Self {
        Self::new(anchor_id, reference_object, AnchorChange::Added, Some(pose))
    }

    /// Anchor pose update.
    #[must_use]
    pub fn updated(
        anchor_id: AnchorId,
        reference_object: impl Into<String>,
        pose: RigidPose,
    ) -> Self {
        Self::new(anchor_id, reference_object, AnchorChange::Updated, Some(pose))
    }

    /// Anchor removal.
    #[must_use]
    pub fn removed(anchor_id: AnchorId, reference_object: impl Into<String>) -> Self {
        Self::new(anchor_id, reference_object, AnchorChange::Removed, None)
    }

    /// Attach the anchor's bounding box.
    #[must_use]
    pub fn with_bounds(mut self, bounds: LocalBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// Signals from the coaching overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoachingSignal {
    /// The overlay is about to show.
    WillActivate,
    /// The overlay was dismissed.
    DidDeactivate,
    /// The user asked the overlay to start over.
    RequestedReset,
}

/// Phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// Pointer down.
    Began,
    /// Pointer moved.
    Changed,
    /// Pointer up.
    Ended,
    /// Gesture interrupted by the system.
    Cancelled,
}

/// A pointer event in view space, with the renderer's hit-test result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Pointer location in view coordinates.
    pub location: Point2<f64>,
    /// Gesture phase.
    pub phase: GesturePhase,
    /// Entity under the pointer, if any.
    pub hit: Option<EntityId>,
}

impl PointerEvent {
    /// Pointer down at `(x, y)` over `hit`.
    #[must_use]
    pub fn began(x: f64, y: f64, hit: Option<EntityId>) -> Self {
        Self {
            location: Point2::new(x, y),
            phase: GesturePhase::Began,
            hit,
        }
    }

    /// Pointer moved to `(x, y)`.
    #[must_use]
    pub fn changed(x: f64, y: f64) -> Self {
        Self::at(x, y, GesturePhase::Changed)
    }

    /// Pointer released at `(x, y)`.
    #[must_use]
    pub fn ended(x: f64, y: f64) -> Self {
        Self::at(x, y, GesturePhase::Ended)
    }

    /// Gesture cancelled at `(x, y)`.
    #[must_use]
    pub fn cancelled(x: f64, y: f64) -> Self {
        Self::at(x, y, GesturePhase::Cancelled)
    }

    fn at(x: f64, y: f64, phase: GesturePhase) -> Self {
        Self {
            location: Point2::new(x, y),
            phase,
            hit: None,
        }
    }
}

/// Explicit user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionCommand {
    /// Freeze the model pose.
    Lock,
    /// Place the fragment markers.
    Apply,
    /// Discard everything and start over.
    Reset,
}

impl SessionCommand {
    /// Lowercase action name used in logs and errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lock => "lock",
            Self::Apply => "apply",
            Self::Reset => "reset",
        }
    }
}

/// Any input the session reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Anchor added, updated or removed.
    Anchor(AnchorEvent),
    /// Camera tracking quality changed.
    TrackingQuality(TrackingQuality),
    /// Coaching overlay signal.
    Coaching(CoachingSignal),
    /// Pointer gesture.
    Pointer(PointerEvent),
    /// Display frame tick.
    Frame,
    /// User command.
    Command(SessionCommand),
}

impl From<AnchorEvent> for SessionEvent {
    fn from(event: AnchorEvent) -> Self {
        Self::Anchor(event)
    }
}

impl From<PointerEvent> for SessionEvent {
    fn from(event: PointerEvent) -> Self {
        Self::Pointer(event)
    }
}

impl From<SessionCommand> for SessionEvent {
    fn from(command: SessionCommand) -> Self {
        Self::Command(command)
    }
}

impl From<CoachingSignal> for SessionEvent {
    fn from(signal: CoachingSignal) -> Self {
        Self::Coaching(signal)
    }
}

impl From<TrackingQuality> for SessionEvent {
    fn from(quality: TrackingQuality) -> Self {
        Self::TrackingQuality(quality)
    }
}

/// Producer half of the session queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::Sender<SessionEvent>,
}

impl EventSender {
    /// Queue an event. Returns `false` if the session has been dropped.
    pub fn send(&self, event: impl Into<SessionEvent>) -> bool {
        self.tx.send(event.into()).is_ok()
    }
}

/// Consumer half of the session queue.
#[derive(Debug)]
pub struct EventQueue {
    rx: mpsc::Receiver<SessionEvent>,
}

impl EventQueue {
    /// Next pending event without blocking.
    #[must_use]
    pub fn try_next(&self) -> Option<SessionEvent> {
        self.rx.try_recv().ok()
    }

    /// Iterator over the events pending right now, in arrival order.
    pub fn drain(&self) -> impl Iterator<Item = SessionEvent> + '_ {
        self.rx.try_iter()
    }
}

/// Create a connected sender/queue pair.
#[must_use]
pub fn event_channel() -> (EventSender, EventQueue) {
    let (tx, rx) = mpsc::channel();
    (EventSender { tx }, EventQueue { rx })
}

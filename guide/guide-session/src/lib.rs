//! Tracking, locking and gizmo interaction for the cutting guide.
//!
//! A [`GuideSession`] owns one [`SessionContext`] and serializes every input
//! that can touch the model transform:
//!
//! - anchor events from the tracking provider ([`AnchorEvent`])
//! - camera tracking quality ([`TrackingQuality`](guide_types::TrackingQuality))
//! - coaching overlay signals ([`CoachingSignal`])
//! - pointer gestures on the gizmos ([`PointerEvent`])
//! - frame ticks for the gizmo refresh
//! - user commands ([`SessionCommand`]): lock, apply, reset
//!
//! Producers on any thread push through an [`EventSender`]; the owner drains
//! the queue with [`GuideSession::pump`].
//!
//! # Workflow
//!
//! 1. The reference object is detected and the model follows its anchor,
//!    kept upright.
//! 2. [`SessionCommand::Lock`] freezes the pose under a static anchor and
//!    shows the gizmos ([`lock_position`]).
//! 3. The vertical handle and rotation ring adjust the pose
//!    ([`GizmoController`]). Rotation keeps the model's bounds center fixed.
//! 4. [`SessionCommand::Apply`] lays out the cutting-plane markers and
//!    enters review-only execution.
//!
//! The crate never installs a tracing subscriber.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod context;
mod driver;
mod error;
mod events;
pub mod gizmo;
mod lock;
pub mod machine;
mod scene;
mod subscription;

pub use config::GuideConfig;
pub use context::{LockedTransform, SessionContext};
pub use driver::{GuideSession, MAX_EVENTS_PER_PUMP, PumpSummary};
pub use error::{Result, SessionError};
pub use events::{
    AnchorChange, AnchorEvent, CoachingSignal, EventQueue, EventSender, GesturePhase,
    PointerEvent, SessionCommand, SessionEvent, event_channel,
};
pub use gizmo::{GestureOutcome, GizmoController, GizmoKind, GizmoPlacements, RingGeometry};
pub use lock::{LockOutcome, lock_position};
pub use scene::{EntityId, ModelAsset, ModelNode, ModelParent};
pub use subscription::FrameSubscription;

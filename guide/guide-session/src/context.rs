//! Session-owned state.
//!
//! A [`SessionContext`] is created at activation and owned by one
//! [`GuideSession`](crate::GuideSession). The state machine, the lock and the
//! gizmo controller all take it by `&mut`, which is what keeps their writes
//! to the model transform from ever overlapping.

use guide_types::{AnchorId, FragmentGroup, RigidPose, SessionState, TrackingQuality};
use tracing::{info, warn};

use crate::config::GuideConfig;
use crate::error::{Result, SessionError};
use crate::gizmo::{GizmoController, GizmoPlacements};
use crate::scene::{ModelAsset, ModelNode};
use crate::subscription::FrameSubscription;

/// World transform frozen by the position lock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LockedTransform {
    /// Pose of the static anchor.
    pub pose: RigidPose,
    /// Anchor the model followed before the lock.
    pub source_anchor: Option<AnchorId>,
}

/// Everything a running session owns.
#[derive(Debug)]
pub struct SessionContext {
    pub(crate) config: GuideConfig,
    pub(crate) group: FragmentGroup,
    pub(crate) asset: ModelAsset,
    pub(crate) reference_object: String,
    pub(crate) state: SessionState,
    pub(crate) quality: Option<TrackingQuality>,
    pub(crate) target_anchor: Option<AnchorId>,
    pub(crate) model: Option<ModelNode>,
    pub(crate) locked: Option<LockedTransform>,
    pub(crate) gizmos: GizmoController,
    pub(crate) refresh: FrameSubscription,
    pub(crate) placements: Option<GizmoPlacements>,
    pub(crate) length_mismatches: Vec<usize>,
}

impl SessionContext {
    /// Validate the inputs and create a context in `Initializing`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the config is out of range, the
    /// reference object name is blank, or the asset does not match the group.
    pub fn new(
        config: GuideConfig,
        group: FragmentGroup,
        asset: ModelAsset,
        reference_object: impl Into<String>,
    ) -> Result<Self> {
        config.validate()?;
        let reference_object = reference_object.into();
        if reference_object.trim().is_empty() {
            return Err(SessionError::MissingReferenceObject);
        }
        asset.validate_for(&group.model_name)?;

        let length_mismatches: Vec<usize> = group
            .length_mismatches(config.fragment_length_tolerance)
            .map(|(index, fragment)| {
                warn!(
                    group = %group.name,
                    index,
                    length = fragment.length,
                    span = fragment.span(),
                    tolerance = config.fragment_length_tolerance,
                    "Fragment length disagrees with its slice offsets"
                );
                index
            })
            .collect();

        Ok(Self {
            config,
            group,
            asset,
            reference_object,
            state: SessionState::Initializing,
            quality: None,
            target_anchor: None,
            model: None,
            locked: None,
            gizmos: GizmoController::new(),
            refresh: FrameSubscription::new(),
            placements: None,
            length_mismatches,
        })
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &GuideConfig {
        &self.config
    }

    /// Fragment group being planned.
    #[must_use]
    pub const fn group(&self) -> &FragmentGroup {
        &self.group
    }

    /// Model asset.
    #[must_use]
    pub const fn asset(&self) -> &ModelAsset {
        &self.asset
    }

    /// Name of the reference object anchors must match.
    #[must_use]
    pub fn reference_object(&self) -> &str {
        &self.reference_object
    }

    /// Last camera tracking quality seen.
    #[must_use]
    pub const fn tracking_quality(&self) -> Option<TrackingQuality> {
        self.quality
    }

    /// Anchor currently bound to the model.
    #[must_use]
    pub const fn target_anchor(&self) -> Option<AnchorId> {
        self.target_anchor
    }

    /// Placed model, if any.
    #[must_use]
    pub const fn model(&self) -> Option<&ModelNode> {
        self.model.as_ref()
    }

    /// Frozen transform once locked.
    #[must_use]
    pub const fn locked_transform(&self) -> Option<&LockedTransform> {
        self.locked.as_ref()
    }

    /// Gizmo controller.
    #[must_use]
    pub const fn gizmos(&self) -> &GizmoController {
        &self.gizmos
    }

    /// Most recent gizmo placements; `None` until locked.
    #[must_use]
    pub const fn gizmo_placements(&self) -> Option<&GizmoPlacements> {
        self.placements.as_ref()
    }

    /// Per-frame refresh subscription.
    #[must_use]
    pub const fn frame_subscription(&self) -> &FrameSubscription {
        &self.refresh
    }

    /// Indices of fragments whose stored length is outside
    /// `fragment_length_tolerance` of their slice span.
    #[must_use]
    pub fn fragment_length_mismatches(&self) -> &[usize] {
        &self.length_mismatches
    }

    pub(crate) fn set_state(&mut self, next: SessionState, reason: &'static str) {
        if self.state != next {
            info!(from = %self.state, to = %next, reason, "Session state changed");
            self.state = next;
        }
    }

    /// Recompute gizmo placements from the current model transform.
    pub(crate) fn refresh_gizmos(&mut self) {
        self.placements = self
            .model
            .as_ref()
            .map(|model| GizmoPlacements::compute(model, &self.config));
    }
}

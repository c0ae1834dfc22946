//! Session state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Authoritative state of a guide session.
///
/// Only the session state machine mutates it. The UI and the gizmo controller
/// read it to decide what is interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Session created, nothing shown yet.
    #[default]
    Initializing,
    /// Coaching overlay is guiding the user to find a surface.
    Coaching,
    /// Looking for the reference object.
    Searching,
    /// Camera tracking is normal but no target is tracked.
    Normal,
    /// Camera tracking is degraded.
    Limited,
    /// Camera tracking is unavailable.
    Failed,
    /// The reference object is tracked and drives the model pose.
    Tracking,
    /// The model pose is frozen and adjustable through gizmos.
    Locked,
    /// Markers are placed; review only.
    Execution,
}

impl SessionState {
    /// All states in workflow order.
    pub const ALL: [Self; 9] = [
        Self::Initializing,
        Self::Coaching,
        Self::Searching,
        Self::Normal,
        Self::Limited,
        Self::Failed,
        Self::Tracking,
        Self::Locked,
        Self::Execution,
    ];

    /// True if upstream anchor poses are applied to the model in this state.
    #[must_use]
    pub const fn accepts_anchor_updates(self) -> bool {
        matches!(
            self,
            Self::Searching | Self::Normal | Self::Limited | Self::Failed | Self::Tracking
        )
    }

    /// True once the pose has been frozen (locked or execution).
    #[must_use]
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Locked | Self::Execution)
    }

    /// True if the manipulation gizmos may be used.
    #[must_use]
    pub const fn allows_gizmos(self) -> bool {
        matches!(self, Self::Locked)
    }

    /// True if camera tracking-quality signals may change the state.
    #[must_use]
    pub const fn follows_tracking_quality(self) -> bool {
        matches!(
            self,
            Self::Searching | Self::Normal | Self::Limited | Self::Failed | Self::Tracking
        )
    }

    /// Short label for status displays.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Initializing => "Starting Up",
            Self::Coaching => "Setup Guide",
            Self::Searching => "Finding Fibula",
            Self::Normal => "Ready",
            Self::Limited => "Limited Tracking",
            Self::Failed => "Connection Lost",
            Self::Tracking => "Tracking Active",
            Self::Locked => "Position Locked",
            Self::Execution => "Surgery Mode",
        }
    }

    /// True if the workflow step `step` is behind the current state.
    ///
    /// Steps are `Searching`, `Tracking` and `Locked`; other values are never
    /// reported complete.
    #[must_use]
    pub const fn has_completed(self, step: Self) -> bool {
        matches!(
            (step, self),
            (Self::Searching, Self::Tracking | Self::Locked | Self::Execution)
                | (Self::Tracking, Self::Locked | Self::Execution)
                | (Self::Locked, Self::Execution)
        )
    }

    /// Lowercase state name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::Coaching => "coaching",
            Self::Searching => "searching",
            Self::Normal => "normal",
            Self::Limited => "limited",
            Self::Failed => "failed",
            Self::Tracking => "tracking",
            Self::Locked => "locked",
            Self::Execution => "execution",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn default_is_initializing() {
        assert_eq!(SessionState::default(), SessionState::Initializing);
    }

    #[test]
    fn anchor_updates_only_while_unlocked() {
        let accepting: Vec<_> = SessionState::ALL
            .into_iter()
            .filter(|s| s.accepts_anchor_updates())
            .collect();
        assert_eq!(
            accepting,
            vec![
                SessionState::Searching,
                SessionState::Normal,
                SessionState::Limited,
                SessionState::Failed,
                SessionState::Tracking,
            ]
        );
        assert!(!SessionState::Locked.accepts_anchor_updates());
        assert!(!SessionState::Execution.accepts_anchor_updates());
    }

    #[test]
    fn gizmos_only_when_locked() {
        for state in SessionState::ALL {
            assert_eq!(state.allows_gizmos(), state == SessionState::Locked);
        }
    }

    #[test]
    fn step_progress() {
        assert!(SessionState::Tracking.has_completed(SessionState::Searching));
        assert!(!SessionState::Tracking.has_completed(SessionState::Tracking));
        assert!(SessionState::Execution.has_completed(SessionState::Locked));
        assert!(!SessionState::Searching.has_completed(SessionState::Searching));
        assert!(!SessionState::Execution.has_completed(SessionState::Coaching));
    }

    #[test]
    fn display_and_serde_agree() {
        for state in SessionState::ALL {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{state}\""));
        }
        assert_eq!(SessionState::Locked.label(), "Position Locked");
    }
}

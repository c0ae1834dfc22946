//! Tracking-provider vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an anchor reported by the tracking provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnchorId(pub u64);

impl AnchorId {
    /// Create a new anchor ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for AnchorId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Anchor({})", self.0)
    }
}

/// Why camera tracking is degraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitedReason {
    /// Tracking is still starting up.
    Initializing,
    /// The device is moving too fast.
    ExcessiveMotion,
    /// The scene has too few visual features.
    InsufficientFeatures,
    /// Tracking is recovering after an interruption.
    Relocalizing,
}

/// Camera tracking quality reported by the tracking provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingQuality {
    /// Tracking is not available at all.
    NotAvailable,
    /// Tracking works with reduced quality.
    Limited(LimitedReason),
    /// Tracking is healthy.
    Normal,
}

impl TrackingQuality {
    /// True for [`TrackingQuality::Normal`].
    #[must_use]
    pub const fn is_normal(self) -> bool {
        matches!(self, Self::Normal)
    }
}

//! Per-frame gizmo refresh subscription.

use tracing::debug;

/// Cancellable per-frame callback registration.
///
/// Started by the lock, cancelled by reset. Frame ticks arriving while it is
/// inactive are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameSubscription {
    active: bool,
    frames: u64,
}

impl FrameSubscription {
    /// Inactive subscription.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: false,
            frames: 0,
        }
    }

    /// Start receiving frames. No-op if already active.
    pub fn start(&mut self) {
        if !self.active {
            self.active = true;
            self.frames = 0;
            debug!("Frame subscription started");
        }
    }

    /// Stop receiving frames.
    pub fn cancel(&mut self) {
        if self.active {
            self.active = false;
            debug!(frames = self.frames, "Frame subscription cancelled");
        }
    }

    /// True while subscribed.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Frames delivered since the last start.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Account for a frame tick. Returns `true` if the refresh should run.
    pub fn tick(&mut self) -> bool {
        if self.active {
            self.frames += 1;
        }
        self.active
    }
}

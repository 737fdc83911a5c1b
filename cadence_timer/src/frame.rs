// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation frame bookkeeping.

use crate::Millis;

/// State of one animation-frame loop.
///
/// A state machine owns at most one loop. The host calls
/// [`FrameLoop::advance`] once per display frame; while the loop is stopped
/// the call is ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameLoop {
    running: bool,
    last: Option<Millis>,
}

impl FrameLoop {
    /// Create a stopped loop.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            running: false,
            last: None,
        }
    }

    /// Request frames. A loop that is already running keeps its timestamp.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop requesting frames and forget the last frame timestamp.
    pub fn stop(&mut self) {
        self.running = false;
        self.last = None;
    }

    /// Whether frames are being requested.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Record a frame at `now`.
    ///
    /// Returns the seconds elapsed since the previous frame (zero for the
    /// first frame after [`FrameLoop::start`]), or `None` when stopped.
    pub fn advance(&mut self, now: Millis) -> Option<f64> {
        if !self.running {
            return None;
        }
        let last = self.last.unwrap_or(now);
        self.last = Some(now);
        #[allow(
            clippy::cast_precision_loss,
            reason = "frame deltas are far below 2^52 ms"
        )]
        let elapsed = now.saturating_sub(last) as f64 / 1000.0;
        Some(elapsed)
    }
}

/// A flag that is cleared at the next frame boundary.
///
/// Used to mark programmatic scrolls: the owner raises it right before
/// moving an element, listeners that see it raised ignore the resulting
/// scroll event, and the next frame lowers it again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameFlag {
    raised: bool,
}

impl FrameFlag {
    /// Create a lowered flag.
    #[must_use]
    pub const fn new() -> Self {
        Self { raised: false }
    }

    /// Raise the flag until the next [`FrameFlag::on_frame`].
    pub fn raise(&mut self) {
        self.raised = true;
    }

    /// Whether the flag is raised.
    #[must_use]
    pub const fn is_raised(&self) -> bool {
        self.raised
    }

    /// Frame boundary: lower the flag.
    pub fn on_frame(&mut self) {
        self.raised = false;
    }

    /// Lower the flag immediately.
    pub fn clear(&mut self) {
        self.raised = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_reports_zero_elapsed() {
        let mut frames = FrameLoop::new();
        assert_eq!(frames.advance(16), None);

        frames.start();
        assert_eq!(frames.advance(100), Some(0.0));
        assert_eq!(frames.advance(116), Some(0.016));
    }

    #[test]
    fn stop_forgets_timestamp() {
        let mut frames = FrameLoop::new();
        frames.start();
        frames.advance(0);
        frames.stop();
        frames.start();
        assert_eq!(frames.advance(5_000), Some(0.0));
    }

    #[test]
    fn flag_lowers_on_frame() {
        let mut flag = FrameFlag::new();
        flag.raise();
        assert!(flag.is_raised());
        flag.on_frame();
        assert!(!flag.is_raised());
    }
}

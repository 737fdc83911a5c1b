// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-driven 0..=100 progress that can sweep back down.

use cadence_timer::{FrameLoop, Millis};

/// How [`ReversibleProgress`] reacts to engagement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgressMode {
    /// Sweep up while engaged and hold at 100; disengaging freezes.
    #[default]
    ForwardOnly,
    /// Sweep up while engaged and back down to 0 when disengaged.
    BackAndForth,
    /// Wrap around at 100 while engaged.
    Infinite,
}

/// Progress percentage driven by animation frames.
///
/// ```rust
/// use cadence_animate::{ProgressMode, ReversibleProgress};
///
/// let mut progress = ReversibleProgress::new(1_000, ProgressMode::BackAndForth);
/// progress.set_engaged(true);
/// progress.frame(0);
/// progress.frame(500);
/// assert_eq!(progress.percent(), 50.0);
///
/// progress.set_engaged(false);
/// assert!(progress.is_reversing());
/// assert_eq!(progress.frame(600), Some(40.0));
/// ```
#[derive(Clone, Debug)]
pub struct ReversibleProgress {
    duration: Millis,
    mode: ProgressMode,
    percent: f64,
    engaged: bool,
    reversing: bool,
    forward: bool,
    frames: FrameLoop,
}

impl Default for ReversibleProgress {
    fn default() -> Self {
        Self::new(2_000, ProgressMode::ForwardOnly)
    }
}

impl ReversibleProgress {
    /// Create idle progress at 0.
    ///
    /// `duration` is the time of one full sweep.
    #[must_use]
    pub const fn new(duration: Millis, mode: ProgressMode) -> Self {
        Self {
            duration,
            mode,
            percent: 0.0,
            engaged: false,
            reversing: false,
            forward: true,
            frames: FrameLoop::new(),
        }
    }

    /// Current percentage in `0.0..=100.0`.
    #[must_use]
    pub const fn percent(&self) -> f64 {
        self.percent
    }

    /// Whether a reverse sweep towards 0 is in progress.
    #[must_use]
    pub const fn is_reversing(&self) -> bool {
        self.reversing
    }

    /// Whether the owner is engaged.
    #[must_use]
    pub const fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Whether frames are wanted.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.frames.is_running()
    }

    /// Mode.
    #[must_use]
    pub const fn mode(&self) -> ProgressMode {
        self.mode
    }

    /// Change the mode, keeping the percentage.
    pub fn set_mode(&mut self, mode: ProgressMode) {
        self.mode = mode;
        self.apply_direction();
        self.ensure_running();
    }

    /// Play forward when engaged; in [`ProgressMode::BackAndForth`] sweep
    /// back to 0 when disengaged.
    pub fn set_engaged(&mut self, engaged: bool) {
        self.engaged = engaged;
        self.apply_direction();
        self.ensure_running();
    }

    /// Force one reverse sweep. Only meaningful in
    /// [`ProgressMode::BackAndForth`] above 0.
    pub fn reverse_once(&mut self) {
        if self.mode != ProgressMode::BackAndForth || self.percent <= 0.0 {
            return;
        }
        self.forward = false;
        self.reversing = true;
        self.ensure_running();
    }

    /// Stop at 0.
    pub fn reset(&mut self) {
        self.frames.stop();
        self.percent = 0.0;
        self.reversing = false;
    }

    /// One display frame at `now`. Returns the new percentage when running.
    pub fn frame(&mut self, now: Millis) -> Option<f64> {
        let dt = self.frames.advance(now)?;
        #[allow(
            clippy::cast_precision_loss,
            reason = "sweep durations are far below 2^52 ms"
        )]
        let sweep = self.duration.max(1) as f64 / 1000.0;
        let delta = dt / sweep * 100.0;

        let mut next = if self.forward {
            self.percent + delta
        } else {
            self.percent - delta
        };
        if self.forward {
            if self.mode == ProgressMode::Infinite {
                next %= 100.0;
                if next < 0.0 {
                    next += 100.0;
                }
            } else if next >= 100.0 {
                next = 100.0;
                self.frames.stop();
            }
        } else if next <= 0.0 {
            next = 0.0;
            self.reversing = false;
            self.forward = true;
            self.frames.stop();
        }
        self.percent = next.clamp(0.0, 100.0);
        self.ensure_running();
        Some(self.percent)
    }

    /// Release the frame loop.
    pub fn teardown(&mut self) {
        self.frames.stop();
    }

    fn apply_direction(&mut self) {
        match self.mode {
            ProgressMode::Infinite | ProgressMode::ForwardOnly => {
                self.forward = true;
                self.reversing = false;
            }
            ProgressMode::BackAndForth => {
                if self.engaged {
                    self.forward = true;
                    self.reversing = false;
                } else if self.percent > 0.0 {
                    self.forward = false;
                    self.reversing = true;
                } else {
                    self.reversing = false;
                }
            }
        }
    }

    fn ensure_running(&mut self) {
        let run = match self.mode {
            ProgressMode::Infinite => self.engaged,
            ProgressMode::ForwardOnly => self.engaged && self.percent < 100.0,
            ProgressMode::BackAndForth => {
                self.reversing || (self.engaged && self.percent < 100.0)
            }
        };
        if run {
            self.frames.start();
        } else {
            self.frames.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_only_holds_at_full() {
        let mut p = ReversibleProgress::new(1_000, ProgressMode::ForwardOnly);
        p.set_engaged(true);
        assert_eq!(p.frame(0), Some(0.0));
        assert_eq!(p.frame(600), Some(60.0));
        assert_eq!(p.frame(1_200), Some(100.0));
        assert!(!p.is_running());
        assert_eq!(p.frame(1_300), None);

        // Disengaging neither reverses nor restarts.
        p.set_engaged(false);
        assert!(!p.is_reversing());
        assert_eq!(p.percent(), 100.0);
    }

    #[test]
    fn forward_only_freezes_when_disengaged() {
        let mut p = ReversibleProgress::new(1_000, ProgressMode::ForwardOnly);
        p.set_engaged(true);
        p.frame(0);
        p.frame(250);
        p.set_engaged(false);
        assert_eq!(p.frame(500), None);
        assert_eq!(p.percent(), 25.0);
    }

    #[test]
    fn back_and_forth_returns_to_zero() {
        let mut p = ReversibleProgress::new(1_000, ProgressMode::BackAndForth);
        p.set_engaged(true);
        p.frame(0);
        p.frame(400);
        p.set_engaged(false);
        assert!(p.is_reversing());
        assert_eq!(p.frame(500), Some(30.0));
        assert_eq!(p.frame(700), Some(10.0));
        assert_eq!(p.frame(900), Some(0.0));
        assert!(!p.is_reversing());
        assert!(!p.is_running());
    }

    #[test]
    fn reengaging_mid_reverse_goes_forward() {
        let mut p = ReversibleProgress::new(1_000, ProgressMode::BackAndForth);
        p.set_engaged(true);
        p.frame(0);
        p.frame(500);
        p.set_engaged(false);
        p.frame(600);
        p.frame(700);
        assert_eq!(p.percent(), 30.0);
        p.set_engaged(true);
        assert!(!p.is_reversing());
        assert_eq!(p.frame(800), Some(40.0));
    }

    #[test]
    fn infinite_wraps() {
        let mut p = ReversibleProgress::new(1_000, ProgressMode::Infinite);
        p.set_engaged(true);
        p.frame(0);
        p.frame(800);
        let wrapped = p.frame(1_200).unwrap();
        assert!((wrapped - 20.0).abs() < 1e-9, "wrapped to {wrapped}");
        assert!(p.is_running());
        p.set_engaged(false);
        assert!(!p.is_running());
    }

    #[test]
    fn reverse_once_only_in_back_and_forth() {
        let mut p = ReversibleProgress::new(1_000, ProgressMode::ForwardOnly);
        p.set_engaged(true);
        p.frame(0);
        p.frame(500);
        p.reverse_once();
        assert!(!p.is_reversing());

        p.set_mode(ProgressMode::BackAndForth);
        p.reverse_once();
        assert!(p.is_reversing());
        p.frame(600);
        p.frame(700);
        assert_eq!(p.percent(), 30.0);
    }

    #[test]
    fn reset_stops_at_zero() {
        let mut p = ReversibleProgress::new(1_000, ProgressMode::Infinite);
        p.set_engaged(true);
        p.frame(0);
        p.frame(300);
        p.reset();
        assert_eq!(p.percent(), 0.0);
        assert!(!p.is_running());
    }
}

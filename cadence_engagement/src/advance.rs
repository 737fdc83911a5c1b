// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-shot timed advance of a [`PlaybackIndex`].

use cadence_timer::{Millis, Timer};

use crate::delay::Delay;
use crate::index::PlaybackIndex;

/// Advances a [`PlaybackIndex`] by one after a delay.
///
/// The timer is single-shot: after it fires, or after any external index
/// change, the owner must call [`schedule`](Self::schedule) again. While
/// disabled nothing is scheduled, and enabling again does not revive a
/// cancelled timer.
///
/// ```
/// use cadence_engagement::{Delay, PlaybackIndex, TimedAdvance};
///
/// let mut index = PlaybackIndex::new(3, true);
/// let mut advance = TimedAdvance::new(Delay::from(1_000));
///
/// advance.schedule(0, &index);
/// assert_eq!(advance.poll(999, &mut index), None);
/// assert_eq!(advance.poll(1_000, &mut index), Some(1));
/// // Single-shot: nothing more happens until the next schedule.
/// assert_eq!(advance.poll(5_000, &mut index), None);
/// ```
#[derive(Debug, Default)]
pub struct TimedAdvance {
    delay: Delay,
    disabled: bool,
    timer: Timer,
}

impl TimedAdvance {
    /// Create an enabled advance with `delay`.
    #[must_use]
    pub fn new(delay: Delay) -> Self {
        Self {
            delay,
            disabled: false,
            timer: Timer::new(),
        }
    }

    /// Replace the delay. Applies from the next schedule.
    pub fn set_delay(&mut self, delay: Delay) {
        self.delay = delay;
    }

    /// Whether scheduling is allowed.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !self.disabled
    }

    /// Allow or suppress scheduling.
    ///
    /// Disabling cancels the pending advance. Returns whether the flag changed.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        let changed = self.disabled == enabled;
        self.disabled = !enabled;
        if !enabled {
            self.timer.cancel();
        }
        changed
    }

    /// (Re)start the timer, resolving the delay now.
    ///
    /// Nothing is scheduled while disabled or with fewer than two items.
    /// Returns whether a timer was armed.
    pub fn schedule(&mut self, now: Millis, index: &PlaybackIndex) -> bool {
        self.timer.cancel();
        if self.disabled || index.total() <= 1 {
            return false;
        }
        let delay = self.delay.resolve();
        self.timer.arm(now, delay);
        tracing::trace!(delay, from = index.current(), "advance scheduled");
        true
    }

    /// Advance `index` if the timer is due.
    ///
    /// Returns the new item when the index moved.
    pub fn poll(&mut self, now: Millis, index: &mut PlaybackIndex) -> Option<usize> {
        if !self.timer.fire(now) {
            return None;
        }
        self.step(index)
    }

    /// Advance immediately and drop the pending timer.
    pub fn advance(&mut self, index: &mut PlaybackIndex) -> Option<usize> {
        self.timer.cancel();
        self.step(index)
    }

    /// Jump to `target` and drop the pending timer.
    ///
    /// Out-of-range targets are ignored and keep the timer.
    pub fn go_to(&mut self, index: &mut PlaybackIndex, target: usize) -> bool {
        if index.go_to(target) {
            self.timer.cancel();
            true
        } else {
            false
        }
    }

    /// Drop the pending timer. Returns whether one was pending.
    pub fn clear(&mut self) -> bool {
        self.timer.cancel()
    }

    /// Whether an advance is pending.
    #[must_use]
    pub const fn is_scheduled(&self) -> bool {
        self.timer.is_armed()
    }

    /// When the pending advance fires, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Millis> {
        self.timer.deadline()
    }

    fn step(&self, index: &mut PlaybackIndex) -> Option<usize> {
        if index.total() <= 1 {
            return None;
        }
        let before = index.current();
        let after = index.advance();
        if after == before {
            return None;
        }
        tracing::debug!(from = before, to = after, "advanced");
        Some(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_loop_visits_every_item_and_wraps() {
        let mut index = PlaybackIndex::new(3, true);
        let mut advance = TimedAdvance::new(Delay::from(1_000));
        let mut seen = alloc::vec![index.current()];

        advance.schedule(0, &index);
        for now in (0..=3_000).step_by(100) {
            if advance.poll(now, &mut index).is_some() {
                seen.push(index.current());
                advance.schedule(now, &index);
            }
        }
        assert_eq!(seen, [0, 1, 2, 0]);
    }

    #[test]
    fn disabled_suppresses_and_reenable_does_not_revive() {
        let mut index = PlaybackIndex::new(3, true);
        let mut advance = TimedAdvance::new(Delay::from(100));
        advance.schedule(0, &index);
        assert!(advance.set_enabled(false));
        assert!(!advance.is_scheduled());
        assert!(!advance.schedule(0, &index));

        assert!(advance.set_enabled(true));
        assert!(!advance.set_enabled(true));
        assert_eq!(advance.poll(1_000, &mut index), None);
        assert!(advance.schedule(1_000, &index));
        assert_eq!(advance.poll(1_100, &mut index), Some(1));
    }

    #[test]
    fn single_item_never_schedules() {
        let mut index = PlaybackIndex::new(1, true);
        let mut advance = TimedAdvance::default();
        assert!(!advance.schedule(0, &index));
        assert_eq!(advance.advance(&mut index), None);
    }

    #[test]
    fn clamped_sequence_halts_on_last_item() {
        let mut index = PlaybackIndex::new(2, false);
        let mut advance = TimedAdvance::new(Delay::from(10));
        advance.schedule(0, &index);
        assert_eq!(advance.poll(10, &mut index), Some(1));
        advance.schedule(10, &index);
        assert_eq!(advance.poll(20, &mut index), None);
        assert_eq!(index.current(), 1);
    }

    #[test]
    fn manual_navigation_clears_timer() {
        let mut index = PlaybackIndex::new(4, true);
        let mut advance = TimedAdvance::new(Delay::from(10));
        advance.schedule(0, &index);
        assert!(advance.go_to(&mut index, 3));
        assert!(!advance.is_scheduled());
        advance.schedule(0, &index);
        assert!(!advance.go_to(&mut index, 7));
        assert!(advance.is_scheduled());
        assert_eq!(advance.advance(&mut index), Some(0));
        assert!(!advance.clear());
    }
}

// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-shot and keyed deadline timers.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::Millis;

/// A single-shot timer owned by exactly one state machine.
///
/// The timer holds at most one deadline. [`Timer::arm`] always replaces the
/// previous deadline and [`Timer::cancel`] clears it, so "scheduled" is true
/// only while a live deadline exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Millis>,
}

impl Timer {
    /// Create a disarmed timer.
    #[must_use]
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm the timer to fire `delay` milliseconds after `now`.
    ///
    /// Any previous deadline is discarded.
    pub fn arm(&mut self, now: Millis, delay: Millis) {
        self.deadline = Some(now.saturating_add(delay));
    }

    /// Disarm the timer.
    ///
    /// Returns `true` if a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Whether a deadline is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Millis> {
        self.deadline
    }

    /// Milliseconds left until the deadline, saturating at zero.
    #[must_use]
    pub fn remaining(&self, now: Millis) -> Option<Millis> {
        self.deadline.map(|d| d.saturating_sub(now))
    }

    /// Whether the deadline has been reached, without consuming it.
    #[must_use]
    pub fn is_due(&self, now: Millis) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }

    /// Consume the deadline if it is due.
    ///
    /// Returns `true` exactly once per arming, at the first call with
    /// `now >= deadline`.
    pub fn fire(&mut self, now: Millis) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}

/// Independent single-shot timers keyed by `K`.
#[derive(Clone, Debug)]
pub struct TimerSet<K> {
    deadlines: BTreeMap<K, Millis>,
}

impl<K: Ord + Clone> TimerSet<K> {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            deadlines: BTreeMap::new(),
        }
    }

    /// Arm (or re-arm) the timer for `key`.
    pub fn arm(&mut self, key: K, now: Millis, delay: Millis) {
        self.deadlines.insert(key, now.saturating_add(delay));
    }

    /// Disarm the timer for `key`, returning whether it was pending.
    pub fn cancel(&mut self, key: &K) -> bool {
        self.deadlines.remove(key).is_some()
    }

    /// Whether the timer for `key` is pending.
    #[must_use]
    pub fn is_armed(&self, key: &K) -> bool {
        self.deadlines.contains_key(key)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    /// Whether no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    /// Disarm every timer.
    pub fn clear(&mut self) {
        self.deadlines.clear();
    }

    /// Remove and return every key whose deadline is due, earliest first.
    pub fn fire_due(&mut self, now: Millis) -> Vec<K> {
        let mut due: Vec<(Millis, K)> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| now >= **deadline)
            .map(|(key, deadline)| (*deadline, key.clone()))
            .collect();
        due.sort_by_key(|(deadline, _)| *deadline);
        for (_, key) in &due {
            self.deadlines.remove(key);
        }
        due.into_iter().map(|(_, key)| key).collect()
    }
}

impl<K: Ord + Clone> Default for TimerSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearm_replaces_deadline() {
        let mut timer = Timer::new();
        timer.arm(0, 100);
        timer.arm(50, 100);

        assert!(!timer.fire(100), "first deadline must not survive re-arm");
        assert_eq!(timer.remaining(100), Some(50));
        assert!(timer.fire(150));
        assert!(!timer.fire(200), "timer fires once per arming");
    }

    #[test]
    fn cancel_reports_pending_state() {
        let mut timer = Timer::new();
        assert!(!timer.cancel());
        timer.arm(10, 5);
        assert!(timer.cancel());
        assert!(!timer.is_armed());
        assert!(!timer.fire(1_000));
    }

    #[test]
    fn zero_delay_is_due_immediately() {
        let mut timer = Timer::new();
        timer.arm(42, 0);
        assert!(timer.fire(42));
    }

    #[test]
    fn timer_set_fires_in_deadline_order() {
        let mut set: TimerSet<u32> = TimerSet::new();
        set.arm(1, 0, 300);
        set.arm(2, 0, 100);
        set.arm(3, 0, 900);

        assert_eq!(set.fire_due(500), [2, 1]);
        assert_eq!(set.len(), 1);
        assert!(set.is_armed(&3));
        assert!(set.cancel(&3));
        assert!(set.fire_due(10_000).is_empty());
    }
}

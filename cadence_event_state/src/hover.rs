// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking with optional "unhover intent".
//!
//! Plain hover reporting turns enter/leave notifications into
//! [`HoverEvent::Start`] and [`HoverEvent::End`], optionally delayed by
//! [`HoverConfig::hover_delay`].
//!
//! ## Unhover intent
//!
//! A cursor grazing an element's edge produces a burst of leave/enter
//! notifications. With [`HoverConfig::unhover_intent`] configured, every
//! leave also starts an intent watch against the element's bounds grown by
//! [`UnhoverIntent::boundary_padding`]:
//!
//! - If the pointer comes back inside the padded rectangle within
//!   [`UnhoverIntent::reentry_grace`], the watch ends with
//!   [`HoverEvent::UnhoverCancel`] (reason [`CancelReason::Reenter`]).
//! - Otherwise, once at least [`UnhoverIntent::leave_delay`] has passed and the
//!   pointer is at least [`UnhoverIntent::min_out_distance`] away from the
//!   padded rectangle, the leave is committed with
//!   [`HoverEvent::UnhoverCommit`].
//!
//! ```
//! use cadence_event_state::hover::{HoverConfig, HoverDetector, HoverEvent, UnhoverIntent};
//! use kurbo::{Point, Rect};
//!
//! let mut hover = HoverDetector::new(HoverConfig {
//!     hover_delay: 0,
//!     unhover_intent: Some(UnhoverIntent::default()),
//! });
//! let card = Rect::new(0.0, 0.0, 100.0, 100.0);
//!
//! hover.on_enter(0, "card");
//! hover.on_leave(500, "card", Some(card));
//! // The cursor slipped out by two pixels and came straight back.
//! hover.on_pointer_move(520, Point::new(102.0, 50.0));
//! assert!(hover.is_intent_active());
//! hover.on_pointer_move(540, Point::new(99.0, 50.0));
//! assert!(!hover.is_intent_active());
//! assert!(hover.poll(2_000).is_empty());
//! ```

use cadence_timer::{Millis, Timer};
use kurbo::{Point, Rect};
use smallvec::SmallVec;

/// Tuning for the unhover intent watch.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnhoverIntent {
    /// Minimum time away before a leave can be committed.
    pub leave_delay: Millis,
    /// Window after leaving in which re-entering cancels the leave.
    pub reentry_grace: Millis,
    /// Minimum distance from the padded bounds before a leave is committed.
    pub min_out_distance: f64,
    /// Padding added on every side of the element bounds.
    pub boundary_padding: f64,
}

impl Default for UnhoverIntent {
    fn default() -> Self {
        Self {
            leave_delay: 120,
            reentry_grace: 250,
            min_out_distance: 8.0,
            boundary_padding: 6.0,
        }
    }
}

impl UnhoverIntent {
    /// Interval between re-checks once the first check did not commit:
    /// a third of `leave_delay`, rounded up, and at least 30.
    #[must_use]
    pub fn recheck_interval(&self) -> Millis {
        self.leave_delay.div_ceil(3).max(30)
    }
}

/// Tuning for [`HoverDetector`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HoverConfig {
    /// Delay applied to both start and end reports. Zero reports immediately.
    pub hover_delay: Millis,
    /// Enables the intent watch on leave.
    pub unhover_intent: Option<UnhoverIntent>,
}

/// Why an intent watch ended without committing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// The pointer entered a tracked element.
    Enter,
    /// A new leave replaced the previous watch.
    Restart,
    /// The pointer came back inside the padded bounds within the grace window.
    Reenter,
    /// The owner cancelled the watch.
    Manual,
}

/// Semantic output of [`HoverDetector`].
#[derive(Clone, Debug, PartialEq)]
pub enum HoverEvent<K> {
    /// Hover began on a target.
    Start(K),
    /// Hover ended on a target.
    End(K),
    /// The leave was deliberate.
    UnhoverCommit {
        /// Element that was left.
        target: K,
        /// Time since the leave.
        time_away: Millis,
        /// Last measured distance from the padded bounds; infinite when the
        /// pointer has not moved since leaving.
        distance: f64,
    },
    /// The leave was discarded.
    UnhoverCancel {
        /// Element that was left.
        target: K,
        /// Why the watch ended.
        reason: CancelReason,
    },
}

/// Events produced by a single input.
pub type HoverEvents<K> = SmallVec<[HoverEvent<K>; 2]>;

#[derive(Clone, Debug)]
struct Intent<K> {
    target: K,
    left_at: Millis,
    rect: Option<Rect>,
    last_distance: f64,
    check: Timer,
}

/// Hover reporter for elements identified by `K`.
#[derive(Clone, Debug)]
pub struct HoverDetector<K> {
    /// Tuning; may be changed between interactions.
    pub config: HoverConfig,
    delayed: Timer,
    pending: Option<HoverEvent<K>>,
    intent: Option<Intent<K>>,
}

/// Distance from `pt` to the nearest point of `rect`, zero inside it.
#[must_use]
pub fn distance_to_rect(pt: Point, rect: Rect) -> f64 {
    let dx = if pt.x < rect.x0 {
        rect.x0 - pt.x
    } else if pt.x > rect.x1 {
        pt.x - rect.x1
    } else {
        0.0
    };
    let dy = if pt.y < rect.y0 {
        rect.y0 - pt.y
    } else if pt.y > rect.y1 {
        pt.y - rect.y1
    } else {
        0.0
    };
    Point::ZERO.distance(Point::new(dx, dy))
}

impl<K: Clone> HoverDetector<K> {
    /// Create a detector with the given tuning.
    #[must_use]
    pub fn new(config: HoverConfig) -> Self {
        Self {
            config,
            delayed: Timer::new(),
            pending: None,
            intent: None,
        }
    }

    /// The pointer entered `target`.
    ///
    /// Cancels any pending delayed report and any intent watch.
    pub fn on_enter(&mut self, now: Millis, target: K) -> HoverEvents<K> {
        let mut events = HoverEvents::new();
        self.clear_delayed();
        events.extend(self.cancel_with(CancelReason::Enter));
        self.report(now, HoverEvent::Start(target), &mut events);
        events
    }

    /// The pointer left `target`, whose current bounds are `bounds`.
    ///
    /// Without bounds the intent watch can only commit by time, never cancel
    /// by re-entry.
    pub fn on_leave(&mut self, now: Millis, target: K, bounds: Option<Rect>) -> HoverEvents<K> {
        let mut events = HoverEvents::new();
        self.clear_delayed();
        self.report(now, HoverEvent::End(target.clone()), &mut events);

        if let Some(intent) = self.config.unhover_intent {
            events.extend(self.cancel_with(CancelReason::Restart));
            let mut check = Timer::new();
            check.arm(now, intent.leave_delay);
            self.intent = Some(Intent {
                target,
                left_at: now,
                rect: bounds.map(|r| r.inflate(intent.boundary_padding, intent.boundary_padding)),
                last_distance: f64::INFINITY,
                check,
            });
        }
        events
    }

    /// Feed a pointer position while an intent watch is active.
    pub fn on_pointer_move(&mut self, now: Millis, position: Point) -> Option<HoverEvent<K>> {
        let grace = self.config.unhover_intent?.reentry_grace;
        let intent = self.intent.as_mut()?;
        let rect = intent.rect?;
        let distance = distance_to_rect(position, rect);
        intent.last_distance = distance;
        if distance == 0.0 && now.saturating_sub(intent.left_at) <= grace {
            return self.cancel_with(CancelReason::Reenter);
        }
        None
    }

    /// Deliver delayed reports and run due intent checks.
    pub fn poll(&mut self, now: Millis) -> HoverEvents<K> {
        let mut events = HoverEvents::new();
        if self.delayed.fire(now) {
            events.extend(self.pending.take());
        }

        let Some(config) = self.config.unhover_intent else {
            return events;
        };
        let Some(intent) = self.intent.as_mut() else {
            return events;
        };
        if !intent.check.fire(now) {
            return events;
        }
        let elapsed = now.saturating_sub(intent.left_at);
        if elapsed >= config.leave_delay && intent.last_distance >= config.min_out_distance {
            if let Some(intent) = self.intent.take() {
                tracing::trace!(elapsed, distance = intent.last_distance, "unhover committed");
                events.push(HoverEvent::UnhoverCommit {
                    target: intent.target,
                    time_away: elapsed,
                    distance: intent.last_distance,
                });
            }
        } else {
            intent.check.arm(now, config.recheck_interval());
        }
        events
    }

    /// Cancel the active intent watch, if any.
    pub fn cancel_intent(&mut self) -> Option<HoverEvent<K>> {
        self.cancel_with(CancelReason::Manual)
    }

    /// Whether an intent watch is active.
    #[must_use]
    pub fn is_intent_active(&self) -> bool {
        self.intent.is_some()
    }

    /// Earliest pending deadline, for hosts that sleep between polls.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        let intent = self.intent.as_ref().and_then(|i| i.check.deadline());
        match (self.delayed.deadline(), intent) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Drop all pending reports and watches silently.
    pub fn teardown(&mut self) {
        self.clear_delayed();
        self.intent = None;
    }

    fn report(&mut self, now: Millis, event: HoverEvent<K>, events: &mut HoverEvents<K>) {
        if self.config.hover_delay > 0 {
            self.pending = Some(event);
            self.delayed.arm(now, self.config.hover_delay);
        } else {
            events.push(event);
        }
    }

    fn clear_delayed(&mut self) {
        self.delayed.cancel();
        self.pending = None;
    }

    fn cancel_with(&mut self, reason: CancelReason) -> Option<HoverEvent<K>> {
        self.config.unhover_intent?;
        let intent = self.intent.take()?;
        tracing::trace!(?reason, "unhover intent cancelled");
        Some(HoverEvent::UnhoverCancel {
            target: intent.target,
            reason,
        })
    }
}

impl<K: Clone> Default for HoverDetector<K> {
    fn default() -> Self {
        Self::new(HoverConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

    fn with_intent(leave_delay: Millis, min_out_distance: f64) -> HoverDetector<u32> {
        HoverDetector::new(HoverConfig {
            hover_delay: 0,
            unhover_intent: Some(UnhoverIntent {
                leave_delay,
                min_out_distance,
                ..UnhoverIntent::default()
            }),
        })
    }

    fn commits(events: &HoverEvents<u32>) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, HoverEvent::UnhoverCommit { .. }))
            .count()
    }

    #[test]
    fn recheck_interval_rounds_up() {
        let intent = |leave_delay| UnhoverIntent {
            leave_delay,
            ..UnhoverIntent::default()
        };
        assert_eq!(intent(120).recheck_interval(), 40);
        assert_eq!(intent(100).recheck_interval(), 34);
        assert_eq!(intent(60).recheck_interval(), 30);
    }

    #[test]
    fn plain_hover_reports_immediately() {
        let mut hover: HoverDetector<u32> = HoverDetector::default();
        assert_eq!(hover.on_enter(0, 1).as_slice(), [HoverEvent::Start(1)]);
        assert_eq!(hover.on_leave(10, 1, Some(CARD)).as_slice(), [HoverEvent::End(1)]);
        assert!(!hover.is_intent_active());
    }

    #[test]
    fn delayed_leave_is_cancelled_by_reenter() {
        let mut hover: HoverDetector<u32> = HoverDetector::new(HoverConfig {
            hover_delay: 100,
            unhover_intent: None,
        });
        assert!(hover.on_enter(0, 1).is_empty());
        assert_eq!(hover.poll(100).as_slice(), [HoverEvent::Start(1)]);

        assert!(hover.on_leave(200, 1, None).is_empty());
        assert!(hover.on_enter(250, 1).is_empty());
        // Only the re-enter's start is delivered; the leave never is.
        assert_eq!(hover.poll(350).as_slice(), [HoverEvent::Start(1)]);
    }

    #[test]
    fn reentry_within_grace_suppresses_commit() {
        let mut hover = with_intent(120, 8.0);
        hover.on_enter(0, 1);
        hover.on_leave(1_000, 1, Some(CARD));

        // Drifts 4px outside the padded box, then back inside it.
        assert!(hover.on_pointer_move(1_030, Point::new(110.0, 50.0)).is_none());
        let cancel = hover.on_pointer_move(1_060, Point::new(103.0, 50.0));
        assert_eq!(
            cancel,
            Some(HoverEvent::UnhoverCancel {
                target: 1,
                reason: CancelReason::Reenter
            })
        );

        for t in (1_060..2_000).step_by(10) {
            assert_eq!(commits(&hover.poll(t)), 0);
        }
    }

    #[test]
    fn padding_forgives_boundary_noise() {
        let mut hover = with_intent(120, 8.0);
        hover.on_leave(0, 1, Some(CARD));
        // 5px outside the raw bounds is still inside the 6px padding.
        let cancel = hover.on_pointer_move(10, Point::new(105.0, 50.0));
        assert!(matches!(
            cancel,
            Some(HoverEvent::UnhoverCancel {
                reason: CancelReason::Reenter,
                ..
            })
        ));
    }

    #[test]
    fn reentry_after_grace_does_not_cancel() {
        let mut hover = with_intent(400, 8.0);
        hover.on_leave(0, 1, Some(CARD));
        assert!(hover.on_pointer_move(300, Point::new(50.0, 50.0)).is_none());
        assert!(hover.is_intent_active());
    }

    #[test]
    fn far_exit_commits_after_leave_delay() {
        let mut hover = with_intent(120, 8.0);
        hover.on_leave(0, 1, Some(CARD));
        hover.on_pointer_move(20, Point::new(130.0, 50.0));

        assert!(hover.poll(119).is_empty());
        let events = hover.poll(120);
        assert_eq!(
            events.as_slice(),
            [HoverEvent::UnhoverCommit {
                target: 1,
                time_away: 120,
                distance: 24.0,
            }]
        );
        assert!(!hover.is_intent_active());
    }

    #[test]
    fn near_exit_rechecks_until_far_enough() {
        let mut hover = with_intent(120, 8.0);
        hover.on_leave(0, 1, Some(CARD));
        hover.on_pointer_move(20, Point::new(110.0, 50.0));

        assert_eq!(commits(&hover.poll(120)), 0);
        assert_eq!(hover.next_deadline(), Some(160));

        hover.on_pointer_move(150, Point::new(120.0, 50.0));
        assert_eq!(commits(&hover.poll(160)), 1);
    }

    #[test]
    fn enter_cancels_watch() {
        let mut hover = with_intent(120, 8.0);
        hover.on_leave(0, 1, Some(CARD));
        let events = hover.on_enter(50, 2);
        assert_eq!(
            events.as_slice(),
            [
                HoverEvent::UnhoverCancel {
                    target: 1,
                    reason: CancelReason::Enter
                },
                HoverEvent::Start(2)
            ]
        );
    }

    #[test]
    fn manual_cancel_and_teardown() {
        let mut hover = with_intent(120, 8.0);
        hover.on_leave(0, 1, Some(CARD));
        assert!(matches!(
            hover.cancel_intent(),
            Some(HoverEvent::UnhoverCancel {
                reason: CancelReason::Manual,
                ..
            })
        ));
        assert!(hover.cancel_intent().is_none());

        hover.on_leave(10, 1, Some(CARD));
        hover.teardown();
        assert!(hover.poll(10_000).is_empty());
    }

    #[test]
    fn distance_is_zero_inside() {
        assert_eq!(distance_to_rect(Point::new(50.0, 50.0), CARD), 0.0);
        assert_eq!(distance_to_rect(Point::new(103.0, 104.0), CARD), 5.0);
    }
}

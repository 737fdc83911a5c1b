// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-pointer press tracking for mouse, touch and pen input.
//!
//! [`PointerDetector`] generalizes the single-touch detector to any number
//! of simultaneous pointers, each tracked independently by [`PointerId`].
//! A pointer that is released without leaving the click threshold produces
//! [`PointerEvent::Click`]; one that is held still for the long-press delay
//! produces [`PointerEvent::LongPress`] from [`PointerDetector::poll`].
//!
//! ## Multi-pointer support
//!
//! ```
//! use cadence_event_state::pointer::{PointerDetector, PointerEvent, PointerKind, PointerId};
//! use kurbo::Point;
//!
//! let mut pointers = PointerDetector::default();
//! let finger1 = PointerId::new(1).unwrap();
//! let finger2 = PointerId::new(2).unwrap();
//!
//! pointers.on_down(0, Some(finger1), PointerKind::Touch, Point::new(10.0, 10.0));
//! pointers.on_down(5, Some(finger2), PointerKind::Touch, Point::new(200.0, 10.0));
//!
//! // The second finger drags; the first one taps.
//! pointers.on_move(20, Some(finger2), PointerKind::Touch, Point::new(260.0, 10.0));
//! let first = pointers.on_up(40, Some(finger1), PointerKind::Touch, Point::new(11.0, 10.0));
//! let second = pointers.on_up(50, Some(finger2), PointerKind::Touch, Point::new(260.0, 10.0));
//!
//! assert!(first.iter().any(|e| matches!(e, PointerEvent::Click { .. })));
//! assert!(!second.iter().any(|e| matches!(e, PointerEvent::Click { .. })));
//! ```

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::num::NonZeroU64;

use bitflags::bitflags;
use cadence_timer::{Millis, TimerSet};
use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Pointer identifier for tracking multiple concurrent presses.
pub type PointerId = NonZeroU64;

/// Identifier used when the host does not distinguish pointers.
const PRIMARY_POINTER: PointerId = NonZeroU64::MIN;

/// Physical kind of a pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Mouse or trackpad cursor.
    Mouse,
    /// Finger on a touch screen.
    Touch,
    /// Stylus.
    Pen,
}

bitflags! {
    /// Set of pointer kinds a detector responds to.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PointerKinds: u8 {
        /// Mouse input.
        const MOUSE = 1 << 0;
        /// Touch input.
        const TOUCH = 1 << 1;
        /// Pen input.
        const PEN = 1 << 2;
    }
}

impl PointerKinds {
    /// Whether `kind` is in the set.
    #[must_use]
    pub fn accepts(self, kind: PointerKind) -> bool {
        self.contains(match kind {
            PointerKind::Mouse => Self::MOUSE,
            PointerKind::Touch => Self::TOUCH,
            PointerKind::Pen => Self::PEN,
        })
    }
}

impl Default for PointerKinds {
    fn default() -> Self {
        Self::all()
    }
}

/// Tuning for [`PointerDetector`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PointerConfig {
    /// Pointer kinds to track; others are ignored entirely.
    pub kinds: PointerKinds,
    /// Movement, in pixels, below which a release is still a click.
    pub click_threshold: f64,
    /// Hold time before a motionless press becomes a long press.
    pub long_press_delay: Millis,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            kinds: PointerKinds::all(),
            click_threshold: 10.0,
            long_press_delay: 500,
        }
    }
}

/// State for an active pointer press.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerPress {
    /// Pointer position at press time.
    pub start: Point,
    /// Timestamp when the press occurred.
    pub start_time: Millis,
    /// True once the pointer left the click threshold.
    pub moved: bool,
    /// Physical kind.
    pub kind: PointerKind,
}

/// Semantic output of [`PointerDetector`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerEvent {
    /// A press began.
    Down {
        /// Pointer.
        pointer: PointerId,
        /// Kind.
        kind: PointerKind,
        /// Press point.
        position: Point,
    },
    /// A pressed pointer moved.
    Move {
        /// Pointer.
        pointer: PointerId,
        /// Current point.
        position: Point,
        /// Displacement from the press point.
        delta: Vec2,
        /// Whether the pointer has left the click threshold.
        moved: bool,
    },
    /// A press ended.
    Up {
        /// Pointer.
        pointer: PointerId,
        /// Release point.
        position: Point,
        /// Press duration.
        duration: Millis,
        /// Whether the pointer left the click threshold.
        moved: bool,
    },
    /// A press ended within the click threshold.
    Click {
        /// Pointer.
        pointer: PointerId,
        /// Release point.
        position: Point,
        /// Press duration.
        duration: Millis,
    },
    /// A motionless press reached the long-press delay.
    LongPress {
        /// Pointer.
        pointer: PointerId,
        /// Press point.
        position: Point,
        /// Time held.
        duration: Millis,
    },
    /// The platform cancelled a press.
    Cancel {
        /// Pointer.
        pointer: PointerId,
    },
}

/// Events produced by a single input.
pub type PointerEvents = SmallVec<[PointerEvent; 2]>;

/// Press tracker for any number of concurrent pointers.
#[derive(Clone, Debug)]
pub struct PointerDetector {
    /// Tuning; may be changed between presses.
    pub config: PointerConfig,
    /// Active presses per pointer.
    presses: BTreeMap<PointerId, PointerPress>,
    long_presses: TimerSet<PointerId>,
}

impl PointerDetector {
    /// Create a detector with the given tuning.
    #[must_use]
    pub fn new(config: PointerConfig) -> Self {
        Self {
            config,
            presses: BTreeMap::new(),
            long_presses: TimerSet::new(),
        }
    }

    /// Record a pointer down.
    ///
    /// `pointer` defaults to the primary pointer when `None`.
    pub fn on_down(
        &mut self,
        now: Millis,
        pointer: Option<PointerId>,
        kind: PointerKind,
        position: Point,
    ) -> Option<PointerEvent> {
        if !self.config.kinds.accepts(kind) {
            return None;
        }
        let pointer = pointer.unwrap_or(PRIMARY_POINTER);
        self.presses.insert(
            pointer,
            PointerPress {
                start: position,
                start_time: now,
                moved: false,
                kind,
            },
        );
        self.long_presses
            .arm(pointer, now, self.config.long_press_delay);
        Some(PointerEvent::Down {
            pointer,
            kind,
            position,
        })
    }

    /// Record movement of a pressed pointer. Unpressed pointers are ignored.
    pub fn on_move(
        &mut self,
        _now: Millis,
        pointer: Option<PointerId>,
        kind: PointerKind,
        position: Point,
    ) -> Option<PointerEvent> {
        if !self.config.kinds.accepts(kind) {
            return None;
        }
        let pointer = pointer.unwrap_or(PRIMARY_POINTER);
        let press = self.presses.get_mut(&pointer)?;
        let delta = position - press.start;
        if !press.moved && delta.hypot() > self.config.click_threshold {
            press.moved = true;
            self.long_presses.cancel(&pointer);
        }
        Some(PointerEvent::Move {
            pointer,
            position,
            delta,
            moved: press.moved,
        })
    }

    /// Record a pointer up; yields `Up` and, if the pointer stayed put, `Click`.
    pub fn on_up(
        &mut self,
        now: Millis,
        pointer: Option<PointerId>,
        kind: PointerKind,
        position: Point,
    ) -> PointerEvents {
        let mut events = PointerEvents::new();
        if !self.config.kinds.accepts(kind) {
            return events;
        }
        let pointer = pointer.unwrap_or(PRIMARY_POINTER);
        let Some(press) = self.presses.remove(&pointer) else {
            return events;
        };
        self.long_presses.cancel(&pointer);

        let duration = now.saturating_sub(press.start_time);
        events.push(PointerEvent::Up {
            pointer,
            position,
            duration,
            moved: press.moved,
        });
        if !press.moved {
            events.push(PointerEvent::Click {
                pointer,
                position,
                duration,
            });
        }
        events
    }

    /// Cancel the press of a pointer.
    pub fn on_cancel(&mut self, pointer: Option<PointerId>) -> Option<PointerEvent> {
        let pointer = pointer.unwrap_or(PRIMARY_POINTER);
        self.long_presses.cancel(&pointer);
        self.presses
            .remove(&pointer)
            .map(|_| PointerEvent::Cancel { pointer })
    }

    /// Report long presses whose delay elapsed without movement.
    pub fn poll(&mut self, now: Millis) -> Vec<PointerEvent> {
        self.long_presses
            .fire_due(now)
            .into_iter()
            .filter_map(|pointer| {
                let press = self.presses.get(&pointer)?;
                (!press.moved).then(|| PointerEvent::LongPress {
                    pointer,
                    position: press.start,
                    duration: now.saturating_sub(press.start_time),
                })
            })
            .collect()
    }

    /// Check if a pointer has an active press.
    #[must_use]
    pub fn is_pressed(&self, pointer: Option<PointerId>) -> bool {
        self.presses
            .contains_key(&pointer.unwrap_or(PRIMARY_POINTER))
    }

    /// Identifiers of all pressed pointers, in ascending order.
    pub fn active_pointers(&self) -> impl Iterator<Item = PointerId> + '_ {
        self.presses.keys().copied()
    }

    /// The active press for a specific pointer.
    #[must_use]
    pub fn pointer_state(&self, pointer: PointerId) -> Option<&PointerPress> {
        self.presses.get(&pointer)
    }

    /// Forget all presses and their timers.
    pub fn clear(&mut self) {
        self.presses.clear();
        self.long_presses.clear();
    }
}

impl Default for PointerDetector {
    fn default() -> Self {
        Self::new(PointerConfig::default())
    }
}

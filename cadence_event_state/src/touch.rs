// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-touch gesture classification: tap, long press and swipe.
//!
//! [`TouchDetector`] tracks one active touch. A release with little movement
//! is a [`TouchEvent::Tap`]; holding still past the long-press delay produces
//! [`TouchEvent::LongPress`] from [`TouchDetector::poll`]; a release after
//! moving at least the swipe threshold is a [`TouchEvent::Swipe`] whose
//! direction comes from the dominant axis.
//!
//! ```
//! use cadence_event_state::touch::{SwipeDirection, TouchConfig, TouchDetector, TouchEvent};
//! use kurbo::Point;
//!
//! let mut touch = TouchDetector::new(TouchConfig::default());
//! touch.on_start(0, Point::new(200.0, 100.0));
//! touch.on_move(40, Point::new(120.0, 110.0));
//! let events = touch.on_end(80, Point::new(100.0, 110.0));
//! assert!(events.iter().any(|e| matches!(
//!     e,
//!     TouchEvent::Swipe(swipe) if swipe.direction == SwipeDirection::Left
//! )));
//! ```

use cadence_timer::{Millis, Timer};
use kurbo::{Point, Vec2};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use smallvec::SmallVec;

/// Tuning for [`TouchDetector`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TouchConfig {
    /// Movement, in pixels, below which a release is still a tap.
    pub tap_threshold: f64,
    /// Hold time before a motionless touch becomes a long press.
    pub long_press_delay: Millis,
    /// Minimum travel, in pixels, for a swipe.
    pub swipe_threshold: f64,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            tap_threshold: 10.0,
            long_press_delay: 500,
            swipe_threshold: 50.0,
        }
    }
}

/// Four-way swipe direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Towards negative x.
    Left,
    /// Towards positive x.
    Right,
    /// Towards negative y.
    Up,
    /// Towards positive y.
    Down,
}

impl SwipeDirection {
    /// Classify a displacement by its larger axis. Ties go to the vertical axis.
    #[must_use]
    pub fn from_delta(delta: Vec2) -> Self {
        if delta.x.abs() > delta.y.abs() {
            if delta.x > 0.0 { Self::Right } else { Self::Left }
        } else if delta.y > 0.0 {
            Self::Down
        } else {
            Self::Up
        }
    }
}

/// A completed swipe.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Swipe {
    /// Dominant direction.
    pub direction: SwipeDirection,
    /// Straight-line travel.
    pub distance: f64,
    /// Time from touch start to release.
    pub duration: Millis,
    /// Displacement from the start point.
    pub delta: Vec2,
}

/// Semantic output of [`TouchDetector`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TouchEvent {
    /// A touch began.
    Start {
        /// Contact point.
        position: Point,
    },
    /// The active touch moved.
    Move {
        /// Current contact point.
        position: Point,
        /// Displacement from the start point.
        delta: Vec2,
        /// Distance from the start point.
        distance: f64,
        /// Whether the touch has left the tap threshold at any point.
        moved: bool,
    },
    /// The touch ended or was cancelled.
    End {
        /// Final contact point, absent for cancellations.
        position: Option<Point>,
        /// Time since the touch started.
        duration: Millis,
        /// Whether the touch left the tap threshold.
        moved: bool,
        /// Whether a long press was reported for this touch.
        long_press: bool,
        /// Whether the platform cancelled the touch.
        cancelled: bool,
    },
    /// Released without moving and without a long press.
    Tap {
        /// Release point.
        position: Point,
        /// Time since the touch started.
        duration: Millis,
    },
    /// Held still past the long-press delay.
    LongPress {
        /// Start point.
        position: Point,
        /// Time since the touch started.
        duration: Millis,
    },
    /// Released after travelling at least the swipe threshold.
    Swipe(Swipe),
}

/// Events produced by a single input.
pub type TouchEvents = SmallVec<[TouchEvent; 3]>;

/// Snapshot of the active touch.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TouchSnapshot {
    /// Whether a touch is in progress.
    pub active: bool,
    /// Start point.
    pub start: Point,
    /// Start timestamp.
    pub start_time: Millis,
    /// Whether the touch left the tap threshold.
    pub moved: bool,
    /// Whether a long press was reported.
    pub long_press: bool,
}

/// Gesture detector for one touch at a time.
#[derive(Clone, Debug)]
pub struct TouchDetector {
    /// Tuning; may be changed between touches.
    pub config: TouchConfig,
    state: TouchSnapshot,
    long_press: Timer,
}

impl TouchDetector {
    /// Create an idle detector.
    #[must_use]
    pub fn new(config: TouchConfig) -> Self {
        Self {
            config,
            state: TouchSnapshot::default(),
            long_press: Timer::new(),
        }
    }

    /// A touch began at `position`.
    pub fn on_start(&mut self, now: Millis, position: Point) -> TouchEvent {
        self.state = TouchSnapshot {
            active: true,
            start: position,
            start_time: now,
            moved: false,
            long_press: false,
        };
        self.long_press.arm(now, self.config.long_press_delay);
        TouchEvent::Start { position }
    }

    /// The active touch moved. Ignored when no touch is active.
    pub fn on_move(&mut self, _now: Millis, position: Point) -> Option<TouchEvent> {
        if !self.state.active {
            return None;
        }
        let delta = position - self.state.start;
        let distance = delta.hypot();
        if !self.state.moved && distance > self.config.tap_threshold {
            self.state.moved = true;
            self.long_press.cancel();
        }
        Some(TouchEvent::Move {
            position,
            delta,
            distance,
            moved: self.state.moved,
        })
    }

    /// The active touch lifted at `position`.
    pub fn on_end(&mut self, now: Millis, position: Point) -> TouchEvents {
        let mut events = TouchEvents::new();
        if !self.state.active {
            return events;
        }
        let state = self.state;
        let duration = now.saturating_sub(state.start_time);
        events.push(TouchEvent::End {
            position: Some(position),
            duration,
            moved: state.moved,
            long_press: state.long_press,
            cancelled: false,
        });

        if !state.moved && !state.long_press {
            events.push(TouchEvent::Tap { position, duration });
        }
        if state.moved {
            let delta = position - state.start;
            let distance = delta.hypot();
            if distance >= self.config.swipe_threshold {
                let swipe = Swipe {
                    direction: SwipeDirection::from_delta(delta),
                    distance,
                    duration,
                    delta,
                };
                tracing::trace!(direction = ?swipe.direction, distance, "swipe");
                events.push(TouchEvent::Swipe(swipe));
            }
        }
        self.reset();
        events
    }

    /// The platform cancelled the touch.
    pub fn on_cancel(&mut self, now: Millis) -> TouchEvent {
        let state = self.state;
        self.reset();
        TouchEvent::End {
            position: None,
            duration: now.saturating_sub(state.start_time),
            moved: state.moved,
            long_press: state.long_press,
            cancelled: true,
        }
    }

    /// Report a long press once the hold delay elapsed without movement.
    pub fn poll(&mut self, now: Millis) -> Option<TouchEvent> {
        if !self.long_press.fire(now) {
            return None;
        }
        if !self.state.active || self.state.moved {
            return None;
        }
        self.state.long_press = true;
        Some(TouchEvent::LongPress {
            position: self.state.start,
            duration: now.saturating_sub(self.state.start_time),
        })
    }

    /// Whether a touch is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.state.active
    }

    /// Copy of the active touch state.
    #[must_use]
    pub const fn snapshot(&self) -> TouchSnapshot {
        self.state
    }

    /// Forget the active touch and its long-press timer.
    pub fn reset(&mut self) {
        self.state.active = false;
        self.state.moved = false;
        self.state.long_press = false;
        self.long_press.cancel();
    }
}

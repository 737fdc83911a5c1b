// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll and wheel activity detection.
//!
//! [`ScrollDetector`] turns raw scroll positions and wheel deltas into
//! bursts of activity: a burst begins with [`ScrollEvent::Start`], carries
//! [`ScrollEvent::Activity`] (and [`ScrollEvent::DirectionChange`]) while
//! input keeps arriving, and ends with [`ScrollEvent::End`] once no activity
//! has been seen for the debounce window.
//!
//! ```
//! use cadence_event_state::scroll::{ScrollConfig, ScrollDetector, ScrollEvent};
//!
//! let mut detector = ScrollDetector::new(ScrollConfig::default(), 0.0);
//! let events = detector.on_scroll(1_000, 40.0, false);
//! assert!(matches!(events[0], ScrollEvent::Start { .. }));
//!
//! // Nothing more arrives; the burst ends one debounce window later.
//! assert!(detector.poll(1_100).is_none());
//! assert!(matches!(detector.poll(1_150), Some(ScrollEvent::End { .. })));
//! ```
//!
//! Programmatic scrolls are excluded by passing `internal = true`: the
//! position is recorded so the next user scroll measures only its own delta,
//! but no event is produced.

use cadence_timer::{Millis, Timer};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use smallvec::SmallVec;

/// Vertical scroll direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    /// No movement observed yet.
    #[default]
    None,
    /// Content moved towards the start.
    Up,
    /// Content moved towards the end.
    Down,
}

/// Which kind of input produced an activity event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollSource {
    /// A scroll position change.
    Scroll,
    /// A wheel or trackpad event.
    Wheel,
}

/// Raw wheel input.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WheelInput {
    /// Horizontal delta.
    pub delta_x: f64,
    /// Vertical delta.
    pub delta_y: f64,
    /// Depth delta.
    pub delta_z: f64,
    /// Whether the platform marked the event as user-generated.
    pub trusted: bool,
}

impl WheelInput {
    /// A trusted, purely vertical wheel event.
    #[must_use]
    pub const fn vertical(delta_y: f64) -> Self {
        Self {
            delta_x: 0.0,
            delta_y,
            delta_z: 0.0,
            trusted: true,
        }
    }
}

/// Tuning for [`ScrollDetector`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrollConfig {
    /// Minimum absolute delta, in pixels, for input to count as activity.
    pub threshold: f64,
    /// Quiet period after the last activity before the burst ends.
    pub debounce: Millis,
    /// Ignore wheel events that were not user-generated.
    pub trusted_only: bool,
    /// Multiplier applied to wheel deltas.
    pub wheel_sensitivity: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            threshold: 10.0,
            debounce: 150,
            trusted_only: true,
            wheel_sensitivity: 1.0,
        }
    }
}

/// Semantic output of [`ScrollDetector`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScrollEvent {
    /// First activity of a burst.
    Start {
        /// Scroll position when the burst began.
        pos: f64,
        /// Direction of the first delta.
        dir: ScrollDirection,
        /// Input kind.
        source: ScrollSource,
    },
    /// The direction flipped within or across bursts.
    DirectionChange {
        /// Previous direction.
        from: ScrollDirection,
        /// New direction.
        to: ScrollDirection,
        /// Current position.
        pos: f64,
        /// Input kind.
        source: ScrollSource,
    },
    /// Activity above the threshold.
    Activity {
        /// Direction of this delta.
        dir: ScrollDirection,
        /// Absolute delta in pixels.
        delta: f64,
        /// Current position.
        pos: f64,
        /// Input kind.
        source: ScrollSource,
    },
    /// A wheel event was accepted, independent of the threshold.
    Wheel {
        /// Horizontal delta.
        delta_x: f64,
        /// Vertical delta after sensitivity scaling.
        delta_y: f64,
        /// Depth delta.
        delta_z: f64,
    },
    /// No activity for the debounce window.
    End {
        /// Position at the end of the burst.
        pos: f64,
        /// Last observed direction.
        dir: ScrollDirection,
    },
}

/// Events produced by a single input.
pub type ScrollEvents = SmallVec<[ScrollEvent; 4]>;

/// Scroll/wheel burst detector for one scroll host.
#[derive(Clone, Debug)]
pub struct ScrollDetector {
    /// Tuning; may be changed between events.
    pub config: ScrollConfig,
    last_pos: f64,
    last_dir: ScrollDirection,
    scrolling: bool,
    end: Timer,
}

impl ScrollDetector {
    /// Create a detector for a host currently scrolled to `initial_pos`.
    #[must_use]
    pub fn new(config: ScrollConfig, initial_pos: f64) -> Self {
        Self {
            config,
            last_pos: initial_pos,
            last_dir: ScrollDirection::None,
            scrolling: false,
            end: Timer::new(),
        }
    }

    /// Process a scroll position change.
    ///
    /// `internal` marks scrolls the owner performed itself; they update the
    /// recorded position and produce nothing.
    pub fn on_scroll(&mut self, now: Millis, pos: f64, internal: bool) -> ScrollEvents {
        let delta = pos - self.last_pos;
        self.last_pos = pos;
        if internal || delta == 0.0 {
            return ScrollEvents::new();
        }
        let mut events = ScrollEvents::new();
        self.emit_activity(now, delta, ScrollSource::Scroll, &mut events);
        events
    }

    /// Process a wheel event.
    pub fn on_wheel(&mut self, now: Millis, wheel: WheelInput, internal: bool) -> ScrollEvents {
        let mut events = ScrollEvents::new();
        if self.config.trusted_only && !wheel.trusted {
            return events;
        }
        if internal {
            return events;
        }
        let dy = wheel.delta_y * self.config.wheel_sensitivity;
        if dy == 0.0 {
            return events;
        }
        events.push(ScrollEvent::Wheel {
            delta_x: wheel.delta_x,
            delta_y: dy,
            delta_z: wheel.delta_z,
        });
        self.emit_activity(now, dy, ScrollSource::Wheel, &mut events);
        events
    }

    /// Report the end of a burst once the debounce window has elapsed.
    pub fn poll(&mut self, now: Millis) -> Option<ScrollEvent> {
        if !self.end.fire(now) || !self.scrolling {
            return None;
        }
        self.scrolling = false;
        tracing::trace!(pos = self.last_pos, "scroll burst ended");
        Some(ScrollEvent::End {
            pos: self.last_pos,
            dir: self.last_dir,
        })
    }

    /// Whether a burst is in progress.
    #[must_use]
    pub const fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// Direction of the most recent accepted delta.
    #[must_use]
    pub const fn last_dir(&self) -> ScrollDirection {
        self.last_dir
    }

    /// Most recently observed position.
    #[must_use]
    pub const fn last_pos(&self) -> f64 {
        self.last_pos
    }

    /// Take `pos` as the current position without reporting movement.
    ///
    /// Hosts that are already scrolled when the detector is created seed it
    /// here so the first small move is measured from the real offset.
    pub fn set_position(&mut self, pos: f64) {
        self.last_pos = pos;
    }

    /// Deadline of the pending end-of-burst check, if any.
    #[must_use]
    pub const fn end_deadline(&self) -> Option<Millis> {
        self.end.deadline()
    }

    /// Drop any burst in progress without reporting its end.
    pub fn teardown(&mut self) {
        self.end.cancel();
        self.scrolling = false;
    }

    fn emit_activity(
        &mut self,
        now: Millis,
        raw: f64,
        source: ScrollSource,
        events: &mut ScrollEvents,
    ) {
        let delta = raw.abs();
        if delta < self.config.threshold {
            return;
        }
        let pos = self.last_pos;
        let dir = if raw > 0.0 {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        };

        if !self.scrolling {
            self.scrolling = true;
            events.push(ScrollEvent::Start { pos, dir, source });
        }
        if dir != self.last_dir && self.last_dir != ScrollDirection::None {
            events.push(ScrollEvent::DirectionChange {
                from: self.last_dir,
                to: dir,
                pos,
                source,
            });
        }
        self.last_dir = dir;
        events.push(ScrollEvent::Activity {
            dir,
            delta,
            pos,
            source,
        });

        // Re-arming replaces the previous deadline, so the end is always
        // measured from the latest activity.
        self.end.arm(now, self.config.debounce);
    }
}

// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ambient scroll direction signals, for header-hide-on-scroll behavior.
//!
//! [`DirectionWatch`] is independent of any target's intersection: it
//! watches page scroll and wheel input and reports [`DirectionSignal::Forward`]
//! when the user moves down the page and [`DirectionSignal::Backward`] when
//! they move up while near the top.

use cadence_event_state::scroll::{
    ScrollConfig, ScrollDetector, ScrollDirection, ScrollEvent, ScrollEvents, ScrollSource,
    WheelInput,
};
use cadence_timer::Millis;

/// Which way the user is heading.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DirectionSignal {
    /// Moving down the page.
    Forward,
    /// Moving up the page near the top, or a menu was opened.
    Backward,
}

/// Tuning for [`DirectionWatch`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DirectionConfig {
    /// Minimum scroll delta that counts as movement.
    pub threshold: f64,
    /// Quiet period that ends a scroll burst.
    pub debounce: Millis,
    /// Backward signals need the page offset at or below this value.
    pub restore_at_top_offset: f64,
}

impl Default for DirectionConfig {
    fn default() -> Self {
        Self {
            threshold: 5.0,
            debounce: 100,
            restore_at_top_offset: 100.0,
        }
    }
}

/// Scroll-direction watcher over page scroll and wheel input.
#[derive(Clone, Debug)]
pub struct DirectionWatch {
    restore_at_top_offset: f64,
    scroll: ScrollDetector,
}

impl DirectionWatch {
    /// Create a watcher for a page currently scrolled to `initial_pos`.
    #[must_use]
    pub fn new(config: DirectionConfig, initial_pos: f64) -> Self {
        let scroll = ScrollDetector::new(
            ScrollConfig {
                threshold: config.threshold,
                debounce: config.debounce,
                ..ScrollConfig::default()
            },
            initial_pos,
        );
        Self {
            restore_at_top_offset: config.restore_at_top_offset,
            scroll,
        }
    }

    /// Process a page scroll position change.
    pub fn on_scroll(&mut self, now: Millis, pos: f64) -> Option<DirectionSignal> {
        let events = self.scroll.on_scroll(now, pos, false);
        self.signal_from(&events)
    }

    /// Process a wheel event. Any non-zero vertical delta counts.
    pub fn on_wheel(&mut self, now: Millis, wheel: WheelInput) -> Option<DirectionSignal> {
        let events = self.scroll.on_wheel(now, wheel, false);
        self.signal_from(&events)
    }

    /// Let the underlying detector finish its burst.
    pub fn poll(&mut self, now: Millis) {
        self.scroll.poll(now);
    }

    /// Resolve the signal implied by a navigation menu's open state.
    ///
    /// An open menu always restores (`Backward`); a closed one hides again
    /// unless the page is near the top.
    #[must_use]
    pub fn sync_menu(&self, open: bool, pos: f64) -> DirectionSignal {
        if open || pos <= self.restore_at_top_offset {
            DirectionSignal::Backward
        } else {
            DirectionSignal::Forward
        }
    }

    /// Whether a scroll burst is in progress.
    #[must_use]
    pub const fn is_scrolling(&self) -> bool {
        self.scroll.is_scrolling()
    }

    fn signal_from(&self, events: &ScrollEvents) -> Option<DirectionSignal> {
        let near_top = self.scroll.last_pos() <= self.restore_at_top_offset;
        events.iter().rev().find_map(|event| match *event {
            ScrollEvent::Activity {
                dir,
                source: ScrollSource::Scroll,
                ..
            } => match dir {
                ScrollDirection::Down => Some(DirectionSignal::Forward),
                ScrollDirection::Up if near_top => Some(DirectionSignal::Backward),
                _ => None,
            },
            ScrollEvent::Wheel { delta_y, .. } if delta_y > 0.0 => Some(DirectionSignal::Forward),
            ScrollEvent::Wheel { delta_y, .. } if delta_y < 0.0 && near_top => {
                Some(DirectionSignal::Backward)
            }
            _ => None,
        })
    }
}

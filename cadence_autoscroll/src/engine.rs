// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame-driven auto-scroll engine.

use alloc::boxed::Box;
use core::fmt;

use cadence_timer::{FrameFlag, FrameLoop, Millis, Timer};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::host::{ScrollHost, ScrollMetrics};

/// Longest frame step, in seconds. Longer gaps (a background tab) do not jump.
const MAX_FRAME_STEP: f64 = 0.05;

/// Distance from the end at which the scroll counts as finished.
const END_EPSILON: f64 = 0.5;

/// Scroll rate in px per second.
pub enum Speed {
    /// A fixed rate. Negative and non-finite rates do not move.
    Fixed(f64),
    /// A rate computed from the host's geometry on every frame, at least 1.
    Computed(Box<dyn FnMut(&ScrollMetrics) -> f64>),
}

impl Speed {
    /// Wrap a closure as a computed speed.
    pub fn computed(f: impl FnMut(&ScrollMetrics) -> f64 + 'static) -> Self {
        Self::Computed(Box::new(f))
    }

    fn px_per_second(&mut self, metrics: &ScrollMetrics) -> f64 {
        match self {
            Self::Fixed(v) if v.is_finite() => v.max(0.0),
            Self::Fixed(_) => 0.0,
            Self::Computed(f) => {
                let v = f(metrics);
                if v.is_finite() { v.max(1.0) } else { 1.0 }
            }
        }
    }
}

impl fmt::Debug for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Tuning for [`AutoScroll`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutoScrollConfig {
    /// Rate in px per second, unless overridden by [`AutoScroll::set_speed`].
    pub speed: f64,
    /// Seconds to cover the full scrollable distance; overrides the speed when positive.
    pub cycle_duration: f64,
    /// Jump back to the top on reaching the end instead of halting.
    pub looping: bool,
    /// Wait before the first start of a cycle.
    pub start_delay: Millis,
    /// Scroll back to the top and forget the cycle when deactivated.
    pub reset_on_inactive: bool,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            speed: 40.0,
            cycle_duration: 0.0,
            looping: false,
            start_delay: 1_500,
            reset_on_inactive: true,
        }
    }
}

/// What one frame did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FrameStep {
    /// Nothing moved: inactive, not running, or nothing to scroll.
    Idle,
    /// Scrolled to `top`.
    Scrolled {
        /// The new offset.
        top: f64,
    },
    /// Reached the end and jumped back to the top.
    Looped,
    /// Reached the end and stopped.
    Halted,
}

/// Debug snapshot of [`AutoScroll`] and its host.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AutoScrollMetrics {
    /// Host scroll offset.
    pub top: f64,
    /// Largest reachable offset.
    pub max: f64,
    /// `top / max`, or `0.0`.
    pub progress: f64,
    /// Whether the frame loop runs.
    pub animating: bool,
    /// Whether the current cycle already started.
    pub started: bool,
    /// Whether the programmatic scroll guard is raised.
    pub internal_guard: bool,
}

/// Continuous scrolling of one host, one frame at a time.
///
/// The host calls [`set_active`](Self::set_active) as conditions change,
/// [`tick`](Self::tick) from its timer loop and [`frame`](Self::frame) once
/// per display frame. Every programmatic scroll raises a one-frame guard,
/// readable through [`is_internal_scroll`](Self::is_internal_scroll), so
/// that scroll listeners on the same element can ignore it.
#[derive(Debug)]
pub struct AutoScroll {
    config: AutoScrollConfig,
    speed: Speed,
    frames: FrameLoop,
    start: Timer,
    guard: FrameFlag,
    position: f64,
    started_this_cycle: bool,
    active: bool,
    held: bool,
    last_max: Option<f64>,
}

impl Default for AutoScroll {
    fn default() -> Self {
        Self::new(AutoScrollConfig::default())
    }
}

impl AutoScroll {
    /// Create an inactive engine.
    #[must_use]
    pub fn new(config: AutoScrollConfig) -> Self {
        Self {
            speed: Speed::Fixed(config.speed),
            config,
            frames: FrameLoop::new(),
            start: Timer::new(),
            guard: FrameFlag::new(),
            position: 0.0,
            started_this_cycle: false,
            active: false,
            held: false,
            last_max: None,
        }
    }

    /// Configuration.
    #[must_use]
    pub const fn config(&self) -> &AutoScrollConfig {
        &self.config
    }

    /// Replace the rate with a fixed or computed speed.
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    /// Turn scrolling on or off.
    ///
    /// Activating starts right away when this cycle already started, and
    /// after `start_delay` otherwise. Deactivating stops the loop and, with
    /// `reset_on_inactive`, scrolls back to the top.
    pub fn set_active<H: ScrollHost + ?Sized>(&mut self, now: Millis, active: bool, host: &mut H) {
        if active == self.active {
            return;
        }
        self.active = active;
        self.relaunch(now, host);
        if !active && self.config.reset_on_inactive {
            self.started_this_cycle = false;
            self.position = 0.0;
            self.write(host, 0.0);
        }
    }

    /// Whether scrolling is wanted.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Hold an active engine in place without resetting it.
    ///
    /// Releasing continues from the host's current offset when this cycle
    /// already started, and waits for the start delay otherwise.
    pub fn set_held<H: ScrollHost + ?Sized>(&mut self, now: Millis, held: bool, host: &mut H) {
        if held == self.held {
            return;
        }
        self.held = held;
        self.relaunch(now, host);
    }

    /// Whether the engine is held in place.
    #[must_use]
    pub const fn is_held(&self) -> bool {
        self.held
    }

    /// Fire the start delay if due.
    pub fn tick<H: ScrollHost + ?Sized>(&mut self, now: Millis, host: &mut H) {
        if self.start.fire(now) && self.active && !self.held {
            self.start_now(host);
        }
    }

    /// Start the frame loop from the host's current offset.
    pub fn start_now<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        self.frames.stop();
        self.position = host.metrics().scroll_top;
        self.started_this_cycle = true;
        self.frames.start();
        tracing::debug!(from = self.position, "auto-scroll started");
    }

    /// Stop the frame loop, keeping the position.
    pub fn stop_now(&mut self) {
        self.frames.stop();
    }

    /// Scroll the host back to the top.
    pub fn reset_position<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        self.position = 0.0;
        self.write(host, 0.0);
    }

    /// One display frame at `now`.
    pub fn frame<H: ScrollHost + ?Sized>(&mut self, now: Millis, host: &mut H) -> FrameStep {
        self.guard.on_frame();
        if !self.active || self.held {
            return FrameStep::Idle;
        }
        let Some(dt) = self.frames.advance(now) else {
            return FrameStep::Idle;
        };
        let dt = dt.clamp(0.0, MAX_FRAME_STEP);

        let metrics = host.metrics();
        let max = metrics.max_scroll();
        if max <= 0.0 {
            return FrameStep::Idle;
        }
        if self.position == 0.0 && metrics.scroll_top > 0.0 {
            self.position = metrics.scroll_top;
        }

        let pps = if self.config.cycle_duration > 0.0 {
            max / self.config.cycle_duration
        } else {
            self.speed.px_per_second(&metrics)
        };
        self.position = (self.position + pps * dt).min(max);
        self.write(host, self.position);

        if self.position >= max - END_EPSILON {
            if self.config.looping {
                self.position = 0.0;
                self.write(host, 0.0);
                tracing::trace!("auto-scroll looped");
                return FrameStep::Looped;
            }
            self.frames.stop();
            tracing::debug!(max, "auto-scroll reached the end");
            return FrameStep::Halted;
        }
        FrameStep::Scrolled { top: self.position }
    }

    /// Report the host's current geometry after a resize.
    ///
    /// When the scrollable distance grows by more than a pixel (late-loading
    /// content), an active engine restarts. Returns whether it restarted.
    pub fn on_content_resize<H: ScrollHost + ?Sized>(&mut self, now: Millis, host: &mut H) -> bool {
        let max = host.metrics().max_scroll();
        let Some(last) = self.last_max else {
            self.last_max = Some(max);
            return false;
        };
        if max <= last + 1.0 {
            return false;
        }
        self.last_max = Some(max);
        if self.active && !self.held {
            tracing::debug!(max, "content grew, restarting auto-scroll");
            self.relaunch(now, host);
        }
        true
    }

    /// Whether the frame loop runs.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.frames.is_running()
    }

    /// Whether the current cycle already started.
    #[must_use]
    pub const fn has_started_this_cycle(&self) -> bool {
        self.started_this_cycle
    }

    /// Fractional scroll position.
    #[must_use]
    pub const fn position(&self) -> f64 {
        self.position
    }

    /// Whether the last scroll this frame was programmatic.
    #[must_use]
    pub const fn is_internal_scroll(&self) -> bool {
        self.guard.is_raised()
    }

    /// Pending start deadline, if any.
    #[must_use]
    pub const fn start_deadline(&self) -> Option<Millis> {
        self.start.deadline()
    }

    /// Debug snapshot.
    #[must_use]
    pub fn metrics<H: ScrollHost + ?Sized>(&self, host: &H) -> AutoScrollMetrics {
        let m = host.metrics();
        AutoScrollMetrics {
            top: m.scroll_top,
            max: m.max_scroll(),
            progress: m.progress(),
            animating: self.frames.is_running(),
            started: self.started_this_cycle,
            internal_guard: self.guard.is_raised(),
        }
    }

    /// Stop everything, lowering the guard.
    pub fn teardown(&mut self) {
        self.frames.stop();
        self.start.cancel();
        self.guard.clear();
    }

    fn relaunch<H: ScrollHost + ?Sized>(&mut self, now: Millis, host: &mut H) {
        self.frames.stop();
        self.start.cancel();
        if !self.active || self.held {
            return;
        }
        if self.started_this_cycle {
            self.start_now(host);
        } else {
            self.start.arm(now, self.config.start_delay);
        }
    }

    fn write<H: ScrollHost + ?Sized>(&mut self, host: &mut H, top: f64) {
        self.guard.raise();
        if let Err(err) = host.scroll_to(top) {
            tracing::warn!(%err, top, "scroll_to failed, assigning offset");
            host.set_scroll_top(top.floor());
        }
    }
}

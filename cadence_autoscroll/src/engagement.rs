// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auto-scroll that yields to touch, wheel and scroll input.

use cadence_engagement::{SignalQueue, UserPhase};
use cadence_event_state::scroll::{ScrollConfig, ScrollDetector, ScrollEvent, WheelInput};
use cadence_event_state::touch::{TouchConfig, TouchDetector, TouchEvent};
use cadence_timer::{Millis, Timer};
use cadence_visibility::{VisibilityConfig, VisibilityObserver};
use kurbo::{Point, Rect};

use crate::engine::{AutoScroll, AutoScrollConfig, FrameStep};
use crate::host::ScrollHost;

/// Tuning for [`EngagementAutoScroll`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngagementAutoScrollConfig {
    /// The scrolling engine.
    pub scroll: AutoScrollConfig,
    /// Quiet period after the user stops before scrolling resumes.
    pub resume_delay: Millis,
    /// Resume after user input at all; when false, input pauses for good.
    pub resume_on_user_input: bool,
    /// Quiet period after the last wheel or user scroll that ends the
    /// interaction, even when the input never crossed the detector threshold.
    pub input_idle: Millis,
    /// When the viewport counts as on screen.
    pub visibility: VisibilityConfig,
    /// Touch gesture tuning.
    pub touch: TouchConfig,
    /// Scroll and wheel detection on the viewport itself.
    pub detector: ScrollConfig,
}

impl Default for EngagementAutoScrollConfig {
    fn default() -> Self {
        Self {
            scroll: AutoScrollConfig::default(),
            resume_delay: 900,
            resume_on_user_input: true,
            input_idle: 160,
            visibility: VisibilityConfig {
                threshold: 0.3,
                ..VisibilityConfig::default()
            },
            touch: TouchConfig {
                tap_threshold: 8.0,
                long_press_delay: 600,
                ..TouchConfig::default()
            },
            detector: ScrollConfig {
                threshold: 1.0,
                debounce: 80,
                trusted_only: true,
                wheel_sensitivity: 1.0,
            },
        }
    }
}

/// An auto-scrolling viewport that pauses while the user handles it.
///
/// Scrolling runs while the viewport is active, visible and not paused.
/// User input pauses it and publishes [`UserPhase::Start`]; once input
/// stops, [`UserPhase::End`] is published and scrolling resumes after
/// `resume_delay`. The engine's own scrolls never count as input.
///
/// Published phases are read with [`signals`](Self::signals) and typically
/// forwarded to an enclosing carousel.
#[derive(Debug)]
pub struct EngagementAutoScroll {
    config: EngagementAutoScrollConfig,
    engine: AutoScroll,
    visibility: VisibilityObserver,
    touch: TouchDetector,
    scroll: ScrollDetector,
    active: bool,
    paused: bool,
    engaged: bool,
    idle: Timer,
    resume: Timer,
    signals: SignalQueue<UserPhase>,
}

impl Default for EngagementAutoScroll {
    fn default() -> Self {
        Self::new(EngagementAutoScrollConfig::default())
    }
}

impl EngagementAutoScroll {
    /// Create an inactive viewport controller.
    #[must_use]
    pub fn new(config: EngagementAutoScrollConfig) -> Self {
        Self {
            engine: AutoScroll::new(config.scroll),
            visibility: VisibilityObserver::new(config.visibility),
            touch: TouchDetector::new(config.touch),
            scroll: ScrollDetector::new(config.detector, 0.0),
            active: false,
            paused: false,
            engaged: false,
            idle: Timer::new(),
            resume: Timer::new(),
            signals: SignalQueue::new(),
            config,
        }
    }

    /// Whether the owner wants scrolling at all (for example, the enclosing
    /// slide is the active one).
    pub fn set_active<H: ScrollHost + ?Sized>(&mut self, now: Millis, active: bool, host: &mut H) {
        self.active = active;
        self.sync(now, host);
    }

    /// Recompute visibility from the viewport and root bounds.
    ///
    /// A missing target keeps the previous visibility.
    pub fn update_visibility<H: ScrollHost + ?Sized>(
        &mut self,
        now: Millis,
        target: Option<Rect>,
        root: Rect,
        host: &mut H,
    ) {
        if self.visibility.update(target, root).is_some() {
            self.sync(now, host);
        }
    }

    /// The viewport's scroll offset changed.
    ///
    /// Scrolls performed by the engine during the current frame are ignored.
    pub fn on_scroll<H: ScrollHost + ?Sized>(&mut self, now: Millis, host: &mut H) {
        let pos = host.metrics().scroll_top;
        let internal = self.engine.is_internal_scroll();
        let events = self.scroll.on_scroll(now, pos, internal);
        if !events.is_empty() {
            self.idle.arm(now, self.config.input_idle);
        }
        self.scroll_events(now, &events, host);
    }

    /// Wheel input over the viewport.
    pub fn on_wheel<H: ScrollHost + ?Sized>(&mut self, now: Millis, wheel: WheelInput, host: &mut H) {
        let events = self.scroll.on_wheel(now, wheel, false);
        if !events.is_empty() {
            self.idle.arm(now, self.config.input_idle);
        }
        self.scroll_events(now, &events, host);
    }

    /// A touch began on the viewport.
    pub fn on_touch_start<H: ScrollHost + ?Sized>(&mut self, now: Millis, pos: Point, host: &mut H) {
        self.touch.on_start(now, pos);
        self.interaction_start(now, host);
    }

    /// The active touch moved.
    pub fn on_touch_move<H: ScrollHost + ?Sized>(&mut self, now: Millis, pos: Point, host: &mut H) {
        if let Some(TouchEvent::Move { moved: true, .. }) = self.touch.on_move(now, pos) {
            self.interaction_start(now, host);
        }
    }

    /// The active touch lifted.
    pub fn on_touch_end<H: ScrollHost + ?Sized>(&mut self, now: Millis, pos: Point, host: &mut H) {
        if !self.touch.is_active() {
            return;
        }
        self.touch.on_end(now, pos);
        self.interaction_end(now, host);
    }

    /// The platform cancelled the active touch.
    pub fn on_touch_cancel<H: ScrollHost + ?Sized>(&mut self, now: Millis, host: &mut H) {
        if !self.touch.is_active() {
            return;
        }
        self.touch.on_cancel(now);
        self.interaction_end(now, host);
    }

    /// Drive timers: start delay, scroll burst end, input idle, long press
    /// and resume.
    pub fn tick<H: ScrollHost + ?Sized>(&mut self, now: Millis, host: &mut H) {
        self.engine.tick(now, host);
        if let Some(ScrollEvent::End { .. }) = self.scroll.poll(now) {
            self.idle.cancel();
            self.interaction_end(now, host);
        }
        // Wheel ticks below the detector threshold never start a burst, so
        // nothing else would end them. A held touch outlives the idle period.
        if self.idle.fire(now)
            && self.engaged
            && !self.scroll.is_scrolling()
            && !self.touch.is_active()
        {
            tracing::trace!(now, "viewport input went idle");
            self.interaction_end(now, host);
        }
        if self.touch.poll(now).is_some() {
            self.interaction_start(now, host);
        }
        if self.resume.fire(now) && !self.engaged {
            tracing::debug!(now, "auto-scroll resuming after user input");
            self.paused = false;
            self.sync(now, host);
        }
    }

    /// One display frame.
    pub fn frame<H: ScrollHost + ?Sized>(&mut self, now: Millis, host: &mut H) -> FrameStep {
        self.engine.frame(now, host)
    }

    /// The viewport's content or size changed.
    pub fn on_content_resize<H: ScrollHost + ?Sized>(&mut self, now: Millis, host: &mut H) -> bool {
        self.engine.on_content_resize(now, host)
    }

    /// Pause now, dropping any pending resume.
    pub fn pause_now<H: ScrollHost + ?Sized>(&mut self, now: Millis, host: &mut H) {
        self.paused = true;
        self.resume.cancel();
        self.sync(now, host);
    }

    /// Resume now, dropping any pending resume.
    pub fn resume_now<H: ScrollHost + ?Sized>(&mut self, now: Millis, host: &mut H) {
        self.resume.cancel();
        self.paused = false;
        self.sync(now, host);
    }

    /// Published user phases, oldest first.
    pub fn signals(&mut self) -> &mut SignalQueue<UserPhase> {
        &mut self.signals
    }

    /// Whether the viewport counts as on screen.
    #[must_use]
    pub const fn in_view(&self) -> bool {
        self.visibility.is_visible()
    }

    /// Whether user input paused scrolling.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether a resume is pending.
    #[must_use]
    pub const fn is_resume_scheduled(&self) -> bool {
        self.resume.is_armed()
    }

    /// Whether the user is interacting.
    #[must_use]
    pub const fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// The scrolling engine.
    #[must_use]
    pub const fn engine(&self) -> &AutoScroll {
        &self.engine
    }

    /// Mutable access to the engine, for manual `start_now`/`stop_now`/`reset_position`.
    pub fn engine_mut(&mut self) -> &mut AutoScroll {
        &mut self.engine
    }

    /// Configuration.
    #[must_use]
    pub const fn config(&self) -> &EngagementAutoScrollConfig {
        &self.config
    }

    /// Cancel every timer and frame loop.
    pub fn teardown(&mut self) {
        self.engine.teardown();
        self.resume.cancel();
        self.idle.cancel();
        self.scroll.teardown();
        self.touch.reset();
        self.engaged = false;
    }

    fn scroll_events<H: ScrollHost + ?Sized>(
        &mut self,
        now: Millis,
        events: &[ScrollEvent],
        host: &mut H,
    ) {
        for event in events {
            match event {
                ScrollEvent::Start { .. } | ScrollEvent::Wheel { .. } => {
                    self.interaction_start(now, host);
                }
                ScrollEvent::Activity { .. } => self.engaged = true,
                ScrollEvent::DirectionChange { .. } | ScrollEvent::End { .. } => {}
            }
        }
    }

    fn interaction_start<H: ScrollHost + ?Sized>(&mut self, now: Millis, host: &mut H) {
        if !self.engaged {
            self.signals.publish(UserPhase::Start);
            tracing::trace!("user started interacting with auto-scroll viewport");
        }
        self.engaged = true;
        self.pause_now(now, host);
    }

    fn interaction_end<H: ScrollHost + ?Sized>(&mut self, now: Millis, host: &mut H) {
        if self.engaged {
            self.signals.publish(UserPhase::End);
        }
        self.engaged = false;
        if self.config.resume_on_user_input {
            self.resume.arm(now, self.config.resume_delay);
        }
        self.sync(now, host);
    }

    fn sync<H: ScrollHost + ?Sized>(&mut self, now: Millis, host: &mut H) {
        let in_view = self.visibility.is_visible();
        if self.config.scroll.reset_on_inactive && !(self.active && in_view) {
            self.engaged = false;
            self.paused = false;
            self.idle.cancel();
            self.resume.cancel();
        }
        self.engine.set_active(now, self.active && in_view, host);
        self.engine.set_held(now, self.paused, host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimulatedViewport;
    use alloc::vec::Vec;

    const ROOT: Rect = Rect::new(0.0, 0.0, 1_000.0, 1_000.0);
    const CARD: Rect = Rect::new(0.0, 0.0, 300.0, 200.0);

    fn running(host: &mut SimulatedViewport) -> EngagementAutoScroll {
        let mut viewport = EngagementAutoScroll::new(EngagementAutoScrollConfig {
            scroll: AutoScrollConfig {
                speed: 100.0,
                ..AutoScrollConfig::default()
            },
            ..Default::default()
        });
        viewport.set_active(0, true, host);
        viewport.update_visibility(0, Some(CARD), ROOT, host);
        viewport.tick(1_500, host);
        viewport.frame(1_500, host);
        viewport
    }

    fn phases(viewport: &mut EngagementAutoScroll) -> Vec<UserPhase> {
        viewport.signals().drain().collect()
    }

    #[test]
    fn starts_after_delay_once_visible() {
        let mut host = SimulatedViewport::new(1_000.0, 200.0);
        let mut viewport = EngagementAutoScroll::default();
        viewport.set_active(0, true, &mut host);
        assert!(!viewport.in_view());
        viewport.tick(5_000, &mut host);
        assert!(!viewport.engine().is_animating());

        viewport.update_visibility(6_000, Some(CARD), ROOT, &mut host);
        assert_eq!(viewport.engine().start_deadline(), Some(7_500));
        viewport.tick(7_500, &mut host);
        assert!(viewport.engine().is_animating());
    }

    #[test]
    fn own_scrolls_are_not_user_input() {
        let mut host = SimulatedViewport::new(1_000.0, 200.0);
        let mut viewport = running(&mut host);
        for now in (1_516..2_500).step_by(16) {
            viewport.frame(now, &mut host);
            // The host echoes the programmatic scroll back as a scroll event.
            viewport.on_scroll(now, &mut host);
            viewport.tick(now, &mut host);
        }
        assert!(host.scroll_top > 0.0);
        assert!(!viewport.is_paused());
        assert!(!viewport.is_engaged());
        assert!(viewport.signals().is_empty());
    }

    #[test]
    fn user_scroll_pauses_and_resumes_after_quiet() {
        let mut host = SimulatedViewport::new(1_000.0, 200.0);
        let mut viewport = running(&mut host);
        viewport.frame(1_550, &mut host);
        viewport.frame(1_600, &mut host);

        viewport.on_wheel(1_620, WheelInput::vertical(30.0), &mut host);
        assert!(viewport.is_paused());
        assert!(!viewport.engine().is_animating());
        assert_eq!(host.scroll_top, 10.0, "pausing keeps the position");
        assert_eq!(phases(&mut viewport), [UserPhase::Start]);

        viewport.tick(1_699, &mut host);
        assert!(viewport.is_engaged());
        viewport.tick(1_700, &mut host);
        assert_eq!(phases(&mut viewport), [UserPhase::End]);
        assert!(viewport.is_resume_scheduled());

        viewport.tick(2_599, &mut host);
        assert!(viewport.is_paused());
        viewport.tick(2_600, &mut host);
        assert!(!viewport.is_paused());
        assert!(viewport.engine().is_animating(), "this cycle already started");
    }

    #[test]
    fn tiny_wheel_ticks_still_end_and_resume() {
        let mut host = SimulatedViewport::new(1_000.0, 200.0);
        let mut viewport = running(&mut host);
        viewport.on_wheel(2_000, WheelInput::vertical(0.5), &mut host);
        assert!(viewport.is_paused());
        assert_eq!(phases(&mut viewport), [UserPhase::Start]);

        viewport.on_wheel(2_100, WheelInput::vertical(0.5), &mut host);
        viewport.tick(2_259, &mut host);
        assert!(viewport.is_engaged(), "each tick extends the idle period");
        viewport.tick(2_260, &mut host);
        assert!(!viewport.is_engaged());
        assert_eq!(phases(&mut viewport), [UserPhase::End]);
        assert!(viewport.is_resume_scheduled());

        viewport.tick(3_160, &mut host);
        assert!(!viewport.is_paused());
        assert!(viewport.engine().is_animating());
    }

    #[test]
    fn idle_period_does_not_end_a_held_touch() {
        let mut host = SimulatedViewport::new(1_000.0, 200.0);
        let mut viewport = running(&mut host);
        viewport.on_touch_start(2_000, Point::ZERO, &mut host);
        viewport.on_wheel(2_010, WheelInput::vertical(0.5), &mut host);
        viewport.tick(3_000, &mut host);
        assert!(viewport.is_engaged());
        assert_eq!(phases(&mut viewport), [UserPhase::Start]);
    }

    #[test]
    fn user_scroll_between_frames_is_detected() {
        let mut host = SimulatedViewport::new(1_000.0, 200.0);
        let mut viewport = running(&mut host);
        viewport.engine_mut().stop_now();
        // The frame boundary lowers the guard and the stopped engine writes nothing.
        viewport.frame(1_516, &mut host);
        host.scroll_top = 120.0;
        viewport.on_scroll(1_520, &mut host);
        assert!(viewport.is_paused());
        assert_eq!(phases(&mut viewport), [UserPhase::Start]);
    }

    #[test]
    fn touch_holds_until_release() {
        let mut host = SimulatedViewport::new(1_000.0, 200.0);
        let mut viewport = running(&mut host);
        viewport.on_touch_start(2_000, Point::new(10.0, 10.0), &mut host);
        viewport.on_touch_move(2_050, Point::new(10.0, 60.0), &mut host);
        viewport.tick(2_700, &mut host);
        assert!(viewport.is_paused());
        assert_eq!(phases(&mut viewport), [UserPhase::Start]);

        viewport.on_touch_end(3_000, Point::new(10.0, 60.0), &mut host);
        assert_eq!(phases(&mut viewport), [UserPhase::End]);
        viewport.tick(3_900, &mut host);
        assert!(!viewport.is_paused());
    }

    #[test]
    fn input_during_resume_wait_cancels_it() {
        let mut host = SimulatedViewport::new(1_000.0, 200.0);
        let mut viewport = running(&mut host);
        viewport.on_touch_start(2_000, Point::ZERO, &mut host);
        viewport.on_touch_end(2_100, Point::ZERO, &mut host);
        viewport.on_wheel(2_500, WheelInput::vertical(3.0), &mut host);
        assert!(!viewport.is_resume_scheduled());
        viewport.tick(3_000, &mut host);
        assert!(viewport.is_paused());
    }

    #[test]
    fn no_resume_when_disabled() {
        let mut host = SimulatedViewport::new(1_000.0, 200.0);
        let mut viewport = EngagementAutoScroll::new(EngagementAutoScrollConfig {
            resume_on_user_input: false,
            ..Default::default()
        });
        viewport.set_active(0, true, &mut host);
        viewport.update_visibility(0, Some(CARD), ROOT, &mut host);
        viewport.on_touch_start(10, Point::ZERO, &mut host);
        viewport.on_touch_end(20, Point::ZERO, &mut host);
        viewport.tick(10_000, &mut host);
        assert!(viewport.is_paused());
    }

    #[test]
    fn leaving_view_resets_engagement_and_position() {
        let mut host = SimulatedViewport::new(1_000.0, 200.0);
        let mut viewport = running(&mut host);
        viewport.frame(1_550, &mut host);
        viewport.on_touch_start(1_600, Point::ZERO, &mut host);
        assert!(viewport.is_paused());

        viewport.update_visibility(1_700, Some(Rect::new(0.0, 2_000.0, 300.0, 2_200.0)), ROOT, &mut host);
        assert!(!viewport.in_view());
        assert!(!viewport.is_paused());
        assert!(!viewport.is_engaged());
        assert_eq!(host.scroll_top, 0.0);
    }
}

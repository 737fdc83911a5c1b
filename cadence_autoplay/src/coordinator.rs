// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel autoplay coordinator.

use core::hash::Hash;

use cadence_engagement::{
    Delay, EngagementState, PauseableConfig, PauseableState, PlaybackIndex, ResumeTrigger,
    ResumeTriggers, TimedAdvance, UserPhase,
};
use cadence_event_state::click::{ClickDetector, ClickOutcome};
use cadence_event_state::region::RegionMap;
use cadence_event_state::scroll::{ScrollConfig, ScrollDetector, ScrollEvent, WheelInput};
use cadence_timer::Millis;
use kurbo::Point;
use smallvec::SmallVec;

/// Tuning for [`EngagementAutoplay`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutoplayConfig {
    /// Quiet period before a paused carousel resumes.
    pub resume_delay: Millis,
    /// Activities that may schedule a resume.
    pub resume_triggers: ResumeTriggers,
    /// Pause as soon as the user engages, instead of only marking engagement.
    pub pause_on_engage: bool,
    /// Only the active item engages on hover, click or inner viewport input.
    pub engage_only_on_active_item: bool,
    /// Wrap from the last item to the first.
    pub looping: bool,
    /// Page scroll detection used for the scroll resume trigger.
    pub scroll: ScrollConfig,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            resume_delay: 5_000,
            resume_triggers: ResumeTriggers::all(),
            pause_on_engage: false,
            engage_only_on_active_item: false,
            looping: true,
            scroll: ScrollConfig {
                threshold: 10.0,
                debounce: 120,
                ..ScrollConfig::default()
            },
        }
    }
}

/// Something the host should react to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AutoplayEvent {
    /// The carousel moved to `index` on its own.
    Advanced {
        /// The new current item.
        index: usize,
    },
    /// A scheduled resume fired and playback continues.
    Resumed,
}

/// Events produced by one [`EngagementAutoplay::tick`].
pub type AutoplayEvents = SmallVec<[AutoplayEvent; 2]>;

/// Keeps a carousel advancing while idle and out of the user's way.
///
/// `C` and `I` are the host's handles for containers and items, registered
/// in [`regions_mut`](Self::regions_mut) with their bounds and an active
/// flag on the item currently presented.
///
/// Advancing is scheduled only while the carousel is not paused and in
/// view. Every time that becomes true, and after every index change, a
/// fresh timer is started with the autoplay delay resolved at that moment.
#[derive(Debug)]
pub struct EngagementAutoplay<C, I> {
    config: AutoplayConfig,
    state: PauseableState,
    index: PlaybackIndex,
    advance: TimedAdvance,
    in_view: bool,
    grace: bool,
    started: bool,
    scroll: ScrollDetector,
    clicks: ClickDetector,
    regions: RegionMap<C, I>,
}

impl<C, I> EngagementAutoplay<C, I>
where
    C: Clone + PartialEq,
    I: Clone + Eq + Hash,
{
    /// Create a coordinator for `total` items advancing every `autoplay_time`.
    ///
    /// Nothing is scheduled before [`start`](Self::start).
    #[must_use]
    pub fn new(config: AutoplayConfig, total: usize, autoplay_time: Delay) -> Self {
        Self {
            state: PauseableState::new(PauseableConfig {
                initial_paused: false,
                resume_triggers: config.resume_triggers,
                resume_delay: config.resume_delay,
            }),
            index: PlaybackIndex::new(total, config.looping),
            advance: TimedAdvance::new(autoplay_time),
            in_view: true,
            grace: false,
            started: false,
            scroll: ScrollDetector::new(config.scroll, 0.0),
            clicks: ClickDetector::default(),
            regions: RegionMap::new(),
            config,
        }
    }

    /// Begin autoplay at `now`.
    pub fn start(&mut self, now: Millis) {
        self.started = true;
        let enabled = self.is_enabled();
        self.advance.set_enabled(enabled);
        if enabled {
            self.advance.schedule(now, &self.index);
        }
    }

    /// Drive timers: scheduled resume, scroll burst end and the advance.
    pub fn tick(&mut self, now: Millis) -> AutoplayEvents {
        let mut events = AutoplayEvents::new();
        if self.state.poll(now) {
            events.push(AutoplayEvent::Resumed);
            self.sync(now);
        }
        self.scroll.poll(now);
        if let Some(index) = self.advance.poll(now, &mut self.index) {
            self.grace = false;
            self.advance.schedule(now, &self.index);
            events.push(AutoplayEvent::Advanced { index });
        }
        events
    }

    /// Report whether the carousel is on screen.
    pub fn set_in_view(&mut self, now: Millis, in_view: bool) {
        self.in_view = in_view;
        self.sync(now);
    }

    /// Record the page's current scroll offset without treating it as
    /// movement. Call this when the page may already be scrolled, before
    /// the first [`on_window_scroll`](Self::on_window_scroll).
    pub fn set_scroll_origin(&mut self, pos: f64) {
        self.scroll.set_position(pos);
    }

    /// Page scroll position changed.
    pub fn on_window_scroll(&mut self, now: Millis, pos: f64) {
        let events = self.scroll.on_scroll(now, pos, false);
        self.scroll_activity(now, &events);
    }

    /// Page wheel input.
    pub fn on_window_wheel(&mut self, now: Millis, wheel: WheelInput) {
        let events = self.scroll.on_wheel(now, wheel, false);
        self.scroll_activity(now, &events);
    }

    /// A click anywhere on the page.
    ///
    /// Clicks outside every container schedule a resume; clicks on an
    /// eligible item engage.
    pub fn on_click(&mut self, now: Millis, pt: Point, trusted: bool) {
        match self.clicks.classify(&self.regions, pt, trusted) {
            Some(ClickOutcome::Outside) => self.resume_activity(now, ResumeTrigger::ClickOutside),
            Some(ClickOutcome::Item { item, .. }) if self.is_eligible(Some(&item)) => {
                self.engage(now);
            }
            _ => {}
        }
    }

    /// The pointer entered `item`.
    pub fn on_item_enter(&mut self, now: Millis, item: &I) {
        if self.is_eligible(Some(item)) {
            self.engage(now);
        }
    }

    /// The pointer left an item, moving to `next` (if it is over another item).
    ///
    /// Moving straight onto another eligible item is not a hover-away.
    pub fn on_item_leave(&mut self, now: Millis, next: Option<&I>) {
        if !self.is_eligible(next) {
            self.resume_activity(now, ResumeTrigger::HoverAway);
        }
    }

    /// Pointer position fallback for missed leave notifications.
    ///
    /// While engaged, a pointer over no eligible item counts as hover-away.
    pub fn on_pointer_move(&mut self, now: Millis, pt: Point) {
        if !self.state.is_user_engaged() {
            return;
        }
        let under = self.regions.item_at(pt).cloned();
        if !self.is_eligible(under.as_ref()) {
            self.resume_activity(now, ResumeTrigger::HoverAway);
        }
    }

    /// A nested auto-scrolling viewport inside `from` reported user input.
    pub fn on_viewport_signal(&mut self, now: Millis, phase: UserPhase, from: Option<&I>) {
        if self.config.engage_only_on_active_item && !self.is_eligible(from) {
            return;
        }
        match phase {
            UserPhase::Start => self.engage(now),
            UserPhase::End => self.resume_activity(now, ResumeTrigger::Scroll),
        }
    }

    /// The driving media ended: pause right away if the user is engaged.
    pub fn begin_grace_window(&mut self, now: Millis) {
        self.grace = true;
        if self.state.is_user_engaged() && !self.state.is_paused() {
            self.state.pause();
            self.sync(now);
        }
    }

    /// Jump to `index`. Returns whether it was in range.
    pub fn go_to(&mut self, now: Millis, index: usize) -> bool {
        if !self.advance.go_to(&mut self.index, index) {
            return false;
        }
        self.index_changed(now);
        true
    }

    /// Manually move to the next item.
    pub fn next(&mut self, now: Millis) -> usize {
        self.advance.advance(&mut self.index);
        self.index_changed(now);
        self.index.current()
    }

    /// Manually move to the previous item.
    pub fn previous(&mut self, now: Millis) -> usize {
        self.advance.clear();
        self.index.retreat();
        self.index_changed(now);
        self.index.current()
    }

    /// Change the number of items.
    pub fn set_total(&mut self, now: Millis, total: usize) {
        self.index.set_total(total);
        self.index_changed(now);
    }

    /// Pause unconditionally.
    pub fn pause(&mut self, now: Millis) {
        self.state.pause();
        self.sync(now);
    }

    /// Resume now, dropping engagement and any pending resume.
    pub fn resume(&mut self, now: Millis) {
        self.state.resume();
        self.sync(now);
    }

    /// Mark the user as engaged, as if they hovered an eligible item.
    pub fn engage_user(&mut self, now: Millis) {
        self.engage(now);
    }

    /// Cancel every timer. The coordinator stays usable after [`start`](Self::start).
    pub fn teardown(&mut self) {
        self.started = false;
        self.state.teardown();
        self.advance.clear();
        self.scroll.teardown();
    }

    /// Current item.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.index.current()
    }

    /// Position and bounds.
    #[must_use]
    pub const fn index(&self) -> &PlaybackIndex {
        &self.index
    }

    /// Whether autoplay is paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    /// Whether the user is engaged.
    #[must_use]
    pub const fn is_user_engaged(&self) -> bool {
        self.state.is_user_engaged()
    }

    /// Whether a resume is pending.
    #[must_use]
    pub const fn is_resume_scheduled(&self) -> bool {
        self.state.is_resume_scheduled()
    }

    /// Engagement flags.
    #[must_use]
    pub const fn state(&self) -> EngagementState {
        self.state.state()
    }

    /// Whether the carousel is on screen.
    #[must_use]
    pub const fn is_in_view(&self) -> bool {
        self.in_view
    }

    /// Whether a grace window is open.
    #[must_use]
    pub const fn in_grace_window(&self) -> bool {
        self.grace
    }

    /// Whether an advance is pending.
    #[must_use]
    pub const fn is_advance_scheduled(&self) -> bool {
        self.advance.is_scheduled()
    }

    /// Earliest pending timer, for hosts that sleep between ticks.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        [
            self.state.resume_deadline(),
            self.advance.deadline(),
            self.scroll.end_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Configuration.
    #[must_use]
    pub const fn config(&self) -> &AutoplayConfig {
        &self.config
    }

    /// Registered containers and items.
    #[must_use]
    pub const fn regions(&self) -> &RegionMap<C, I> {
        &self.regions
    }

    /// Register and update containers and items.
    pub fn regions_mut(&mut self) -> &mut RegionMap<C, I> {
        &mut self.regions
    }

    /// Replace the autoplay delay. Applies from the next schedule.
    pub fn set_autoplay_time(&mut self, delay: Delay) {
        self.advance.set_delay(delay);
    }

    fn is_enabled(&self) -> bool {
        !self.state.is_paused() && self.in_view
    }

    fn is_eligible(&self, item: Option<&I>) -> bool {
        match item {
            None => false,
            Some(item) if self.config.engage_only_on_active_item => self.regions.is_active(item),
            Some(item) => self.regions.item(item).is_some(),
        }
    }

    fn engage(&mut self, now: Millis) {
        self.state.engage_user();
        if (self.config.pause_on_engage || self.grace) && !self.state.is_paused() {
            tracing::debug!(grace = self.grace, "pausing on engagement");
            self.state.pause();
        }
        self.sync(now);
    }

    fn resume_activity(&mut self, now: Millis, trigger: ResumeTrigger) {
        self.state.handle_resume_activity(now, trigger);
        self.sync(now);
    }

    fn scroll_activity(&mut self, now: Millis, events: &[ScrollEvent]) {
        if events
            .iter()
            .any(|e| matches!(e, ScrollEvent::Activity { .. }))
        {
            self.resume_activity(now, ResumeTrigger::Scroll);
        }
    }

    fn index_changed(&mut self, now: Millis) {
        self.grace = false;
        if self.started {
            self.advance.schedule(now, &self.index);
        }
    }

    fn sync(&mut self, now: Millis) {
        if !self.started {
            return;
        }
        let enabled = self.is_enabled();
        if self.advance.set_enabled(enabled) && enabled {
            self.advance.schedule(now, &self.index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::Rect;

    type Carousel = EngagementAutoplay<&'static str, usize>;

    fn carousel(config: AutoplayConfig) -> Carousel {
        let mut c = Carousel::new(config, 3, Delay::from(1_000));
        let regions = c.regions_mut();
        regions.insert_container("hero", Rect::new(0.0, 0.0, 300.0, 100.0));
        for i in 0..3 {
            let x = 100.0 * i as f64;
            regions.insert_item(i, "hero", Rect::new(x, 0.0, x + 100.0, 100.0), i == 0);
        }
        c
    }

    #[test]
    fn idle_carousel_loops_through_items() {
        let mut c = carousel(AutoplayConfig::default());
        c.start(0);
        let mut seen = vec![c.current_index()];
        for now in (0..=3_000).step_by(50) {
            for event in c.tick(now) {
                if let AutoplayEvent::Advanced { index } = event {
                    seen.push(index);
                }
            }
        }
        assert_eq!(seen, [0, 1, 2, 0]);
    }

    #[test]
    fn hover_pauses_and_leave_resumes_after_delay() {
        let mut c = carousel(AutoplayConfig {
            pause_on_engage: true,
            resume_delay: 500,
            ..Default::default()
        });
        c.start(0);
        c.on_item_enter(200, &0);
        assert!(c.is_paused());
        assert!(!c.is_advance_scheduled());

        c.on_item_leave(400, None);
        assert!(c.is_resume_scheduled());
        assert!(c.tick(899).is_empty());
        assert!(c.is_paused());

        assert_eq!(c.tick(900).as_slice(), [AutoplayEvent::Resumed]);
        assert!(!c.is_paused());
        assert_eq!(c.next_deadline(), Some(1_900), "advance rescheduled on resume");
    }

    #[test]
    fn re_engagement_cancels_resume() {
        let mut c = carousel(AutoplayConfig {
            pause_on_engage: true,
            resume_delay: 500,
            ..Default::default()
        });
        c.start(0);
        c.on_item_enter(100, &1);
        c.on_item_leave(200, None);
        c.on_item_enter(300, &1);
        for now in (300..2_000).step_by(100) {
            assert!(c.tick(now).is_empty());
        }
        assert!(c.is_paused());
    }

    #[test]
    fn engagement_without_pause_keeps_advancing() {
        let mut c = carousel(AutoplayConfig::default());
        c.start(0);
        c.on_item_enter(100, &0);
        assert!(c.is_user_engaged());
        assert!(!c.is_paused());
        assert_eq!(c.tick(1_000).as_slice(), [AutoplayEvent::Advanced { index: 1 }]);
    }

    #[test]
    fn moving_between_items_is_not_hover_away() {
        let mut c = carousel(AutoplayConfig {
            pause_on_engage: true,
            ..Default::default()
        });
        c.start(0);
        c.on_item_enter(0, &0);
        c.on_item_leave(10, Some(&1));
        assert!(!c.is_resume_scheduled());
        assert!(c.is_user_engaged());
    }

    #[test]
    fn only_active_item_engages() {
        let mut c = carousel(AutoplayConfig {
            pause_on_engage: true,
            engage_only_on_active_item: true,
            ..Default::default()
        });
        c.start(0);
        c.on_item_enter(0, &2);
        assert!(!c.is_paused(), "inactive slide must not pause");
        c.on_viewport_signal(10, UserPhase::Start, Some(&2));
        assert!(!c.is_paused());
        c.on_viewport_signal(20, UserPhase::Start, Some(&0));
        assert!(c.is_paused());
        c.on_viewport_signal(30, UserPhase::End, Some(&0));
        assert!(c.is_resume_scheduled());
    }

    #[test]
    fn clicks_outside_schedule_resume_and_item_clicks_engage() {
        let mut c = carousel(AutoplayConfig {
            pause_on_engage: true,
            resume_delay: 100,
            ..Default::default()
        });
        c.start(0);
        c.on_click(10, Point::new(150.0, 50.0), true);
        assert!(c.is_paused());
        c.on_click(20, Point::new(150.0, 50.0), false);
        c.on_click(30, Point::new(900.0, 900.0), false);
        assert!(!c.is_resume_scheduled(), "untrusted clicks are ignored");
        c.on_click(40, Point::new(900.0, 900.0), true);
        assert!(c.is_resume_scheduled());
        assert_eq!(c.tick(140).as_slice(), [AutoplayEvent::Resumed]);
    }

    #[test]
    fn pointer_move_fallback_detects_missed_leave() {
        let mut c = carousel(AutoplayConfig {
            pause_on_engage: true,
            ..Default::default()
        });
        c.start(0);
        c.on_item_enter(0, &0);
        c.on_pointer_move(10, Point::new(50.0, 50.0));
        assert!(!c.is_resume_scheduled());
        c.on_pointer_move(20, Point::new(50.0, 500.0));
        assert!(c.is_resume_scheduled());
        assert!(!c.is_user_engaged());
    }

    #[test]
    fn page_scroll_schedules_resume() {
        let mut c = carousel(AutoplayConfig {
            pause_on_engage: true,
            ..Default::default()
        });
        c.start(0);
        c.engage_user(0);
        c.on_window_scroll(10, 4.0);
        assert!(!c.is_resume_scheduled(), "below threshold");
        c.on_window_scroll(20, 40.0);
        assert!(c.is_resume_scheduled());
    }

    #[test]
    fn jitter_on_an_already_scrolled_page_is_ignored() {
        let mut c = carousel(AutoplayConfig {
            pause_on_engage: true,
            ..Default::default()
        });
        c.set_scroll_origin(3_000.0);
        c.start(0);
        c.on_item_enter(10, &0);
        c.on_window_scroll(20, 3_001.0);
        assert!(c.is_user_engaged());
        assert!(!c.is_resume_scheduled());
        c.on_window_scroll(30, 3_040.0);
        assert!(c.is_resume_scheduled());
    }

    #[test]
    fn nested_viewport_input_pauses_until_quiet() {
        use cadence_autoscroll::{EngagementAutoScroll, SimulatedViewport};

        fn forward(c: &mut Carousel, viewport: &mut EngagementAutoScroll, now: Millis) {
            for phase in viewport.signals().drain() {
                c.on_viewport_signal(now, phase, Some(&0));
            }
        }

        let mut c = carousel(AutoplayConfig {
            pause_on_engage: true,
            resume_delay: 500,
            ..Default::default()
        });
        c.start(0);
        let mut host = SimulatedViewport::new(1_000.0, 200.0);
        let mut viewport = EngagementAutoScroll::default();
        let root = Rect::new(0.0, 0.0, 1_000.0, 1_000.0);
        viewport.set_active(0, true, &mut host);
        viewport.update_visibility(0, Some(Rect::new(0.0, 0.0, 300.0, 200.0)), root, &mut host);

        viewport.on_wheel(100, WheelInput::vertical(30.0), &mut host);
        forward(&mut c, &mut viewport, 100);
        assert!(c.is_user_engaged());
        assert!(c.is_paused());
        assert!(!c.is_advance_scheduled());

        viewport.tick(180, &mut host);
        forward(&mut c, &mut viewport, 180);
        assert!(!c.is_user_engaged());
        assert!(c.is_resume_scheduled());
        assert!(c.tick(679).is_empty());
        assert_eq!(c.tick(680).as_slice(), [AutoplayEvent::Resumed]);
        assert!(!c.is_paused());
    }

    #[test]
    fn out_of_view_suspends_and_return_reschedules() {
        let mut c = carousel(AutoplayConfig::default());
        c.start(0);
        c.set_in_view(500, false);
        assert!(c.tick(5_000).is_empty());
        c.set_in_view(6_000, true);
        assert_eq!(c.next_deadline(), Some(7_000));
        assert_eq!(c.tick(7_000).as_slice(), [AutoplayEvent::Advanced { index: 1 }]);
    }

    #[test]
    fn grace_window_pauses_engaged_user() {
        let mut c = carousel(AutoplayConfig::default());
        c.start(0);
        c.begin_grace_window(100);
        assert!(!c.is_paused(), "nobody engaged yet");
        c.on_item_enter(200, &0);
        assert!(c.is_paused(), "engaging inside the grace window pauses");

        c.resume(300);
        c.engage_user(400);
        assert!(c.in_grace_window());
        assert!(c.go_to(500, 2));
        assert!(!c.in_grace_window(), "index change closes the window");
    }

    #[test]
    fn manual_navigation_reschedules() {
        let mut c = carousel(AutoplayConfig::default());
        c.start(0);
        assert_eq!(c.next(400), 1);
        assert_eq!(c.next_deadline(), Some(1_400));
        assert_eq!(c.previous(500), 0);
        assert_eq!(c.previous(600), 2);
        assert!(!c.go_to(700, 3));
        c.teardown();
        assert_eq!(c.next_deadline(), None);
    }
}

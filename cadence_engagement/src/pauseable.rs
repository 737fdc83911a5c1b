// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paused/engaged state with a cancel-and-replace delayed resume.

use bitflags::bitflags;
use cadence_timer::{Millis, Timer};

bitflags! {
    /// Kinds of activity allowed to schedule a resume.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ResumeTriggers: u8 {
        /// Page scroll activity.
        const SCROLL = 1 << 0;
        /// A click outside the engaged component.
        const CLICK_OUTSIDE = 1 << 1;
        /// The pointer leaving the engaged item.
        const HOVER_AWAY = 1 << 2;
    }
}

impl Default for ResumeTriggers {
    fn default() -> Self {
        Self::all()
    }
}

/// One resume-worthy activity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResumeTrigger {
    /// Page scroll activity.
    Scroll,
    /// A click outside the engaged component.
    ClickOutside,
    /// The pointer left the engaged item.
    HoverAway,
}

impl ResumeTrigger {
    /// The flag for this trigger.
    #[must_use]
    pub const fn flag(self) -> ResumeTriggers {
        match self {
            Self::Scroll => ResumeTriggers::SCROLL,
            Self::ClickOutside => ResumeTriggers::CLICK_OUTSIDE,
            Self::HoverAway => ResumeTriggers::HOVER_AWAY,
        }
    }
}

/// Tuning for [`PauseableState`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PauseableConfig {
    /// Start paused.
    pub initial_paused: bool,
    /// Activities that may schedule a resume.
    pub resume_triggers: ResumeTriggers,
    /// Quiet period between resume activity and resuming.
    pub resume_delay: Millis,
}

impl Default for PauseableConfig {
    fn default() -> Self {
        Self {
            initial_paused: false,
            resume_triggers: ResumeTriggers::all(),
            resume_delay: 5_000,
        }
    }
}

/// Snapshot of the three engagement flags.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EngagementState {
    /// The engine should not advance.
    pub paused: bool,
    /// The user is currently interacting.
    pub user_engaged: bool,
    /// A delayed resume is pending.
    pub resume_scheduled: bool,
}

/// Paused/engaged state holder with a delayed resume.
///
/// New engagement always cancels a pending resume, so a resume scheduled
/// before the user came back can never fire.
///
/// ```
/// use cadence_engagement::{PauseableConfig, PauseableState, ResumeTrigger};
///
/// let mut state = PauseableState::new(PauseableConfig { resume_delay: 500, ..Default::default() });
/// state.engage_user();
/// state.pause();
///
/// assert!(state.handle_resume_activity(1_000, ResumeTrigger::HoverAway));
/// assert!(state.is_resume_scheduled());
///
/// // The user comes back before the delay elapses.
/// state.engage_user();
/// assert!(!state.poll(1_500));
/// assert!(state.is_paused());
/// ```
#[derive(Clone, Debug)]
pub struct PauseableState {
    /// Tuning; may be changed at any time and applies to the next schedule.
    pub config: PauseableConfig,
    paused: bool,
    user_engaged: bool,
    pause_after_video: bool,
    resume: Timer,
}

impl Default for PauseableState {
    fn default() -> Self {
        Self::new(PauseableConfig::default())
    }
}

impl PauseableState {
    /// Create state with `config`.
    #[must_use]
    pub const fn new(config: PauseableConfig) -> Self {
        Self {
            paused: config.initial_paused,
            config,
            user_engaged: false,
            pause_after_video: false,
            resume: Timer::new(),
        }
    }

    /// Whether the engine should hold still.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the user is interacting.
    #[must_use]
    pub const fn is_user_engaged(&self) -> bool {
        self.user_engaged
    }

    /// Whether a resume is pending. True only while a live timer exists.
    #[must_use]
    pub const fn is_resume_scheduled(&self) -> bool {
        self.resume.is_armed()
    }

    /// Whether the end of the current media should pause playback.
    #[must_use]
    pub const fn should_pause_after_video(&self) -> bool {
        self.pause_after_video
    }

    /// When the pending resume fires, if any.
    #[must_use]
    pub const fn resume_deadline(&self) -> Option<Millis> {
        self.resume.deadline()
    }

    /// All three flags at once.
    #[must_use]
    pub const fn state(&self) -> EngagementState {
        EngagementState {
            paused: self.paused,
            user_engaged: self.user_engaged,
            resume_scheduled: self.resume.is_armed(),
        }
    }

    /// Pause unconditionally.
    pub fn pause(&mut self) {
        if !self.paused {
            tracing::debug!("paused");
        }
        self.paused = true;
    }

    /// Resume now, dropping any pending resume and engagement.
    pub fn resume(&mut self) {
        self.cancel_scheduled_resume();
        self.paused = false;
        self.user_engaged = false;
        self.pause_after_video = false;
        tracing::debug!("resumed");
    }

    /// Flip the paused flag.
    pub fn toggle(&mut self) {
        self.paused = !self.paused;
    }

    /// Record user engagement, invalidating any pending resume.
    pub fn engage_user(&mut self) {
        if self.cancel_scheduled_resume() {
            tracing::debug!("engagement cancelled a scheduled resume");
        }
        self.user_engaged = true;
        self.pause_after_video = true;
    }

    /// Clear engagement without touching the paused flag or timer.
    pub fn disengage_user(&mut self) {
        self.user_engaged = false;
        self.pause_after_video = false;
    }

    /// Pause if the user is engaged when the driving media ends.
    ///
    /// Returns whether playback was paused.
    pub fn pause_after_video_if_engaged(&mut self) -> bool {
        if self.pause_after_video && self.user_engaged {
            self.pause();
            true
        } else {
            false
        }
    }

    /// React to resume-worthy activity.
    ///
    /// Triggers outside the configured set are ignored. Otherwise engagement
    /// is cleared and, if paused, a resume is scheduled. Returns whether a
    /// resume was scheduled.
    pub fn handle_resume_activity(&mut self, now: Millis, trigger: ResumeTrigger) -> bool {
        if !self.config.resume_triggers.contains(trigger.flag()) {
            return false;
        }
        self.disengage_user();
        if self.paused {
            self.schedule_resume(now);
            true
        } else {
            false
        }
    }

    /// Schedule a resume `resume_delay` from `now`, replacing any pending one.
    pub fn schedule_resume(&mut self, now: Millis) {
        self.resume.arm(now, self.config.resume_delay);
        tracing::debug!(at = now.saturating_add(self.config.resume_delay), "resume scheduled");
    }

    /// Drop the pending resume. Returns whether one was pending.
    pub fn cancel_scheduled_resume(&mut self) -> bool {
        self.resume.cancel()
    }

    /// Fire the pending resume if due. Returns whether playback resumed.
    pub fn poll(&mut self, now: Millis) -> bool {
        if !self.resume.fire(now) {
            return false;
        }
        self.user_engaged = false;
        self.pause_after_video = false;
        self.paused = false;
        tracing::debug!(now, "scheduled resume fired");
        true
    }

    /// Drop the pending resume.
    pub fn teardown(&mut self) {
        self.resume.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> PauseableState {
        PauseableState::new(PauseableConfig {
            resume_delay: 500,
            ..Default::default()
        })
    }

    #[test]
    fn resume_fires_after_quiet_period() {
        let mut state = quick();
        state.engage_user();
        state.pause();
        assert!(state.handle_resume_activity(100, ResumeTrigger::Scroll));
        assert!(!state.is_user_engaged());
        assert!(!state.poll(599));
        assert!(state.poll(600));
        assert_eq!(state.state(), EngagementState::default());
    }

    #[test]
    fn engagement_preempts_every_pending_resume() {
        // Re-engaging at any point inside the delay must keep playback paused.
        for gap in [0, 1, 250, 499] {
            let mut state = quick();
            state.engage_user();
            state.pause();
            state.handle_resume_activity(1_000, ResumeTrigger::HoverAway);
            state.engage_user();
            assert!(!state.is_resume_scheduled());
            for t in (1_000 + gap..3_000).step_by(50) {
                assert!(!state.poll(t), "resume fired at {t} after gap {gap}");
            }
            assert!(state.is_paused());
        }
    }

    #[test]
    fn disallowed_trigger_is_ignored() {
        let mut state = PauseableState::new(PauseableConfig {
            resume_triggers: ResumeTriggers::HOVER_AWAY,
            ..Default::default()
        });
        state.engage_user();
        state.pause();
        assert!(!state.handle_resume_activity(0, ResumeTrigger::Scroll));
        assert!(state.is_user_engaged(), "ignored trigger keeps engagement");
        assert!(!state.is_resume_scheduled());
    }

    #[test]
    fn resume_activity_while_playing_only_disengages() {
        let mut state = quick();
        state.engage_user();
        assert!(!state.handle_resume_activity(0, ResumeTrigger::ClickOutside));
        assert!(!state.is_user_engaged());
        assert!(!state.is_resume_scheduled());
    }

    #[test]
    fn reschedule_replaces_deadline() {
        let mut state = quick();
        state.pause();
        state.schedule_resume(0);
        state.schedule_resume(300);
        assert_eq!(state.resume_deadline(), Some(800));
        assert!(!state.poll(500));
        assert!(state.poll(800));
    }

    #[test]
    fn manual_resume_cancels_timer() {
        let mut state = quick();
        state.pause();
        state.schedule_resume(0);
        state.resume();
        assert!(!state.is_resume_scheduled());
        state.pause();
        assert!(!state.poll(1_000), "cancelled resume must not fire");
        assert!(state.is_paused());
    }

    #[test]
    fn pause_after_video() {
        let mut state = quick();
        assert!(!state.pause_after_video_if_engaged());
        state.engage_user();
        assert!(state.pause_after_video_if_engaged());
        assert!(state.is_paused());
        state.toggle();
        assert!(!state.is_paused());
    }

    #[test]
    fn initial_paused() {
        let state = PauseableState::new(PauseableConfig {
            initial_paused: true,
            ..Default::default()
        });
        assert!(state.is_paused());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_round_trips_through_json() {
        let config = PauseableConfig {
            resume_triggers: ResumeTriggers::SCROLL | ResumeTriggers::HOVER_AWAY,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: PauseableConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}

// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cadence Engagement: pause/resume state and timed advance for autoplay.
//!
//! These are the building blocks an autoplaying component composes:
//!
//! - [`PauseableState`]: `paused`, `user_engaged` and a pending delayed
//!   resume. Engaging the user always cancels a pending resume, and resume
//!   activity only schedules one for the configured [`ResumeTriggers`].
//! - [`PlaybackIndex`]: a bounded position that wraps or clamps.
//! - [`TimedAdvance`]: a single-shot timer that moves a [`PlaybackIndex`]
//!   forward after a fixed or computed [`Delay`].
//! - [`SignalQueue`]: an explicit channel for [`UserPhase`] signals from a
//!   nested viewport to its outer controller.
//!
//! All timers are explicit: pass the current time in milliseconds and call
//! `poll` from the host's loop.
//!
//! ```rust
//! use cadence_engagement::{PauseableConfig, PauseableState, ResumeTrigger};
//!
//! let mut state = PauseableState::new(PauseableConfig { resume_delay: 500, ..Default::default() });
//!
//! // Hovering an item engages the user and pauses playback.
//! state.engage_user();
//! state.pause();
//!
//! // Leaving the item schedules a resume after the quiet period.
//! state.handle_resume_activity(2_000, ResumeTrigger::HoverAway);
//! assert!(!state.poll(2_499));
//! assert!(state.poll(2_500));
//! assert!(!state.is_paused());
//! ```
//!
//! This crate is `no_std` (without the default `std` feature) and uses `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod advance;
mod delay;
mod index;
mod pauseable;
mod signal;

pub use advance::TimedAdvance;
pub use delay::{Delay, DelayError, DelayFn, FALLBACK_DELAY};
pub use index::PlaybackIndex;
pub use pauseable::{
    EngagementState, PauseableConfig, PauseableState, ResumeTrigger, ResumeTriggers,
};
pub use signal::{SignalQueue, UserPhase};

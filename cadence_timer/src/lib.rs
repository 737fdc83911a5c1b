// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cadence Timer: explicit-clock timers and frame loops.
//!
//! Every Cadence state machine is driven by timestamps supplied by its host,
//! in milliseconds on any monotonic clock. Nothing here reads a clock or
//! spawns anything; a host calls `fire`/`advance` from its own event loop and
//! reacts to the result.
//!
//! - [`Timer`]: a single-shot deadline with cancel-and-replace semantics.
//!   Arming a live timer replaces its deadline, so a stale callback can never
//!   fire after newer state superseded it.
//! - [`TimerSet`]: independent keyed timers, for example one long-press timer
//!   per active pointer.
//! - [`FrameLoop`]: the state of one `requestAnimationFrame`-style loop,
//!   reporting elapsed time between frames.
//! - [`FrameFlag`]: a flag that stays raised until the next frame boundary.
//!
//! ```
//! use cadence_timer::Timer;
//!
//! let mut resume = Timer::new();
//! resume.arm(1_000, 500);
//! // New engagement re-arms the timer; the first deadline is gone.
//! resume.arm(1_200, 500);
//! assert!(!resume.fire(1_500));
//! assert!(resume.fire(1_700));
//! assert!(!resume.is_armed());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod frame;
mod timer;

pub use frame::{FrameFlag, FrameLoop};
pub use timer::{Timer, TimerSet};

/// Milliseconds on the host's monotonic clock.
pub type Millis = u64;

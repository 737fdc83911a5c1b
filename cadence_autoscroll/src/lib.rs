// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cadence Autoscroll: continuous scrolling of an inner viewport.
//!
//! - [`AutoScroll`]: the frame-driven engine. It accumulates a fractional
//!   offset at a fixed or computed px/s rate (or a rate that covers the whole
//!   distance in `cycle_duration` seconds), loops or halts at the end and
//!   raises a one-frame guard around each programmatic scroll.
//! - [`EngagementAutoScroll`]: wraps the engine with visibility, touch and
//!   scroll detection. User input pauses scrolling and publishes
//!   [`UserPhase`] signals; scrolling resumes after a quiet period.
//! - [`ScrollHost`]: the element being scrolled. [`SimulatedViewport`] is an
//!   in-memory implementation.
//!
//! ```rust
//! use cadence_autoscroll::{AutoScroll, AutoScrollConfig, FrameStep, SimulatedViewport};
//!
//! let mut host = SimulatedViewport::new(600.0, 200.0);
//! let mut engine = AutoScroll::new(AutoScrollConfig { speed: 200.0, ..Default::default() });
//!
//! engine.set_active(0, true, &mut host);
//! engine.tick(1_500, &mut host);
//! engine.frame(1_500, &mut host);
//! assert_eq!(engine.frame(1_550, &mut host), FrameStep::Scrolled { top: 10.0 });
//!
//! // The scroll event the host sees for that write is marked as programmatic.
//! assert!(engine.is_internal_scroll());
//! ```
//!
//! [`UserPhase`]: cadence_engagement::UserPhase
//!
//! This crate is `no_std` (without the default `std` feature) and uses `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod engagement;
mod engine;
mod host;

pub use engagement::{EngagementAutoScroll, EngagementAutoScrollConfig};
pub use engine::{AutoScroll, AutoScrollConfig, AutoScrollMetrics, FrameStep, Speed};
pub use host::{ScrollError, ScrollHost, ScrollMetrics, SimulatedViewport};

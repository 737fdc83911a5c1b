// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cadence Event State: headless interaction detectors.
//!
//! Each detector is a small state machine fed with raw input and an explicit
//! timestamp. Instead of invoking callbacks, every input method returns the
//! semantic events it produced, and timer-driven events come out of a `poll`
//! method the host calls with the current time. Detectors never read a
//! clock and never touch a platform event system.
//!
//! - [`scroll::ScrollDetector`]: scroll and wheel activity with direction
//!   tracking, a movement threshold and a debounced end.
//! - [`touch::TouchDetector`]: single-touch tap, long-press and swipe.
//! - [`pointer::PointerDetector`]: multi-pointer press, click and long-press
//!   filtered by pointer kind.
//! - [`hover::HoverDetector`]: enter/leave with an optional report delay and
//!   "unhover intent", a grace window that forgives brief exits.
//! - [`click::ClickDetector`]: classifies a click as outside, inside a
//!   container or on an item, using a [`region::RegionMap`].
//!
//! ## Minimal example
//!
//! ```rust
//! use cadence_event_state::scroll::{ScrollConfig, ScrollDetector, ScrollEvent};
//!
//! let mut scroll = ScrollDetector::new(ScrollConfig::default(), 0.0);
//! let started = scroll.on_scroll(0, 40.0, false);
//! assert!(matches!(started.first(), Some(ScrollEvent::Start { .. })));
//!
//! // Nothing ends until the debounce elapses after the last activity.
//! assert!(scroll.poll(100).is_none());
//! assert!(matches!(scroll.poll(150), Some(ScrollEvent::End { .. })));
//! ```
//!
//! Positions use [`kurbo`] geometry types in a caller-chosen coordinate space.
//!
//! This crate is `no_std` (without the default `std` feature) and uses `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod click;
pub mod hover;
pub mod pointer;
pub mod region;
pub mod scroll;
pub mod touch;

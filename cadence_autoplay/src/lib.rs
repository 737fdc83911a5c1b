// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cadence Autoplay: an engagement-aware carousel controller.
//!
//! [`EngagementAutoplay`] composes the pieces from `cadence_engagement` and
//! `cadence_event_state` into one state machine for a carousel:
//!
//! - it advances a bounded index on a timer while the carousel is in view
//!   and not paused;
//! - hovering, clicking or scrolling inside an eligible item engages the
//!   user (and optionally pauses right away);
//! - page scroll, clicks outside the carousel and the pointer leaving
//!   schedule a resume after a quiet period;
//! - a nested auto-scrolling viewport forwards [`UserPhase`] signals so
//!   that interacting with inner content also holds the carousel.
//!
//! ```rust
//! use cadence_autoplay::{AutoplayConfig, AutoplayEvent, EngagementAutoplay};
//! use cadence_engagement::Delay;
//! use kurbo::Rect;
//!
//! let config = AutoplayConfig { pause_on_engage: true, resume_delay: 500, ..Default::default() };
//! let mut carousel: EngagementAutoplay<u8, u8> =
//!     EngagementAutoplay::new(config, 3, Delay::from(1_000));
//! carousel.regions_mut().insert_container(0, Rect::new(0.0, 0.0, 600.0, 400.0));
//! carousel.regions_mut().insert_item(0, 0, Rect::new(0.0, 0.0, 600.0, 400.0), true);
//! carousel.start(0);
//!
//! carousel.on_item_enter(300, &0);
//! assert!(carousel.is_paused());
//!
//! carousel.on_item_leave(800, None);
//! assert_eq!(carousel.tick(1_300).as_slice(), [AutoplayEvent::Resumed]);
//! assert_eq!(carousel.tick(2_300).as_slice(), [AutoplayEvent::Advanced { index: 1 }]);
//! ```
//!
//! [`UserPhase`]: cadence_engagement::UserPhase
//!
//! This crate is `no_std` (without the default `std` feature) and uses `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod coordinator;

pub use coordinator::{AutoplayConfig, AutoplayEvent, AutoplayEvents, EngagementAutoplay};

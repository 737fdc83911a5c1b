// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cadence Visibility: headless "is this element on screen" tracking.
//!
//! This crate computes what an intersection observer would report, from
//! rectangles the host supplies:
//!
//! - [`VisibilityObserver`]: threshold-based visibility of one target inside
//!   a root, with an optional seen-once mode that stops observing after the
//!   first enter.
//! - [`RootMargin`]: CSS-style per-side growth (or shrinkage) of the root
//!   before intersecting, in px or percent.
//! - [`DirectionWatch`]: scroll/wheel driven forward/backward signals that
//!   are independent of any target's intersection.
//!
//! The host owns geometry. It calls [`VisibilityObserver::update`] whenever
//! layout or scroll may have changed; a target that is not mounted yet is
//! passed as `None` and leaves the observer untouched.
//!
//! ```rust
//! use cadence_visibility::{RootMargin, VisibilityConfig, VisibilityObserver};
//! use kurbo::Rect;
//!
//! let config = VisibilityConfig {
//!     threshold: 0.2,
//!     root_margin: "0px 0px -50px 0px".parse().unwrap(),
//!     once: false,
//! };
//! let mut observer = VisibilityObserver::new(config);
//! let viewport = Rect::new(0.0, 0.0, 1024.0, 768.0);
//!
//! // Peeking in at the very bottom does not count yet.
//! observer.update(Some(Rect::new(0.0, 730.0, 200.0, 930.0)), viewport);
//! assert!(!observer.is_visible());
//!
//! observer.update(Some(Rect::new(0.0, 500.0, 200.0, 700.0)), viewport);
//! assert!(observer.is_visible());
//! # let _ = RootMargin::ZERO;
//! ```
//!
//! This crate is `no_std` (without the default `std` feature) and uses `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod direction;
mod margin;
mod observer;

pub use direction::{DirectionConfig, DirectionSignal, DirectionWatch};
pub use margin::{MarginLength, RootMargin, RootMarginError};
pub use observer::{
    VisibilityChange, VisibilityConfig, VisibilityError, VisibilityObserver, intersection_ratio,
};

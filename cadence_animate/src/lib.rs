// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cadence Animate: presentation state derived from visibility and engagement.
//!
//! - [`AnimatedElement`] turns visibility edges into CSS custom properties
//!   and data attributes, so styles alone describe the enter and exit
//!   transitions.
//! - [`ReversibleProgress`] is a frame-driven percentage for effects such as
//!   animated borders that fill while engaged.
//! - [`EngagedByTriggers`] decides when such an effect is engaged, from
//!   hover, visibility, an owner-controlled flag, or always.
//!
//! ```rust
//! use cadence_animate::{AnimatedElement, AnimationEdge};
//! use kurbo::Rect;
//!
//! let root = Rect::new(0.0, 0.0, 400.0, 800.0);
//! let mut card = AnimatedElement::default();
//!
//! let edge = card.update(Some(Rect::new(0.0, 200.0, 400.0, 300.0)), root);
//! assert_eq!(edge, Some(AnimationEdge::Started));
//! assert_eq!(card.props().data_value("data-visible"), Some("true"));
//! ```
//!
//! This crate is `no_std` (without the default `std` feature) and uses `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod element;
mod progress;
mod triggers;

pub use element::{
    AnimatedElement, AnimatedElementConfig, AnimationDirection, AnimationEdge, AnimationProps,
    DEFAULT_EASING,
};
pub use progress::{ProgressMode, ReversibleProgress};
pub use triggers::{EngageTriggers, EngagedByTriggers, EngagedConfig, EngagementEdge};

// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engagement derived from hover, visibility, a controlled flag or nothing.

use bitflags::bitflags;
use cadence_event_state::hover::{HoverConfig, HoverDetector, HoverEvent, HoverEvents};
use cadence_timer::Millis;
use cadence_visibility::{RootMargin, VisibilityConfig, VisibilityObserver};
use kurbo::{Point, Rect};

bitflags! {
    /// Sources that engage an element.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EngageTriggers: u8 {
        /// The pointer is over the element.
        const HOVER = 1 << 0;
        /// The element is in view.
        const VISIBLE = 1 << 1;
        /// Always engaged.
        const ALWAYS = 1 << 2;
        /// Engaged while the owner says so.
        const CONTROLLED = 1 << 3;
    }
}

impl Default for EngageTriggers {
    fn default() -> Self {
        Self::HOVER
    }
}

impl EngageTriggers {
    /// Collect triggers by name, ignoring case. Unknown names are skipped.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut triggers = Self::empty();
        for name in names {
            let name = name.trim();
            let flag = if name.eq_ignore_ascii_case("hover") {
                Self::HOVER
            } else if name.eq_ignore_ascii_case("visible") {
                Self::VISIBLE
            } else if name.eq_ignore_ascii_case("always") {
                Self::ALWAYS
            } else if name.eq_ignore_ascii_case("controlled") {
                Self::CONTROLLED
            } else {
                tracing::trace!(name, "ignoring unknown engage trigger");
                continue;
            };
            triggers |= flag;
        }
        triggers
    }
}

/// Tuning for [`EngagedByTriggers`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngagedConfig {
    /// Which sources engage.
    pub triggers: EngageTriggers,
    /// Hover delay and unhover intent.
    pub hover: HoverConfig,
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    /// Root margin for the visibility trigger. The default shrinks the root
    /// by 120 at the top and bottom so engagement starts late and ends early.
    pub root_margin: RootMargin,
}

impl Default for EngagedConfig {
    fn default() -> Self {
        Self {
            triggers: EngageTriggers::HOVER,
            hover: HoverConfig::default(),
            threshold: 0.25,
            root_margin: RootMargin::shrink_vertical(120.0),
        }
    }
}

/// A change of [`EngagedByTriggers::is_engaged`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EngagementEdge {
    /// Became engaged.
    Engaged,
    /// Stopped being engaged.
    Disengaged,
}

/// Combines the configured triggers into one engaged flag.
///
/// Inputs for triggers that are not configured are ignored. Each input
/// returns the edge it caused, if any.
///
/// ```rust
/// use cadence_animate::{EngageTriggers, EngagedByTriggers, EngagedConfig, EngagementEdge};
///
/// let config = EngagedConfig {
///     triggers: EngageTriggers::HOVER | EngageTriggers::CONTROLLED,
///     ..Default::default()
/// };
/// let mut border = EngagedByTriggers::new(config);
/// assert_eq!(border.on_enter(0, "card"), Some(EngagementEdge::Engaged));
/// assert_eq!(border.set_controlled(true), None);
/// assert_eq!(border.on_leave(50, "card", None), None);
/// assert_eq!(border.set_controlled(false), Some(EngagementEdge::Disengaged));
/// ```
#[derive(Clone, Debug)]
pub struct EngagedByTriggers<K> {
    triggers: EngageTriggers,
    hover: HoverDetector<K>,
    visibility: VisibilityObserver,
    hovered: bool,
    controlled: bool,
    engaged: bool,
}

impl<K: Clone> EngagedByTriggers<K> {
    /// Create with nothing hovered, visible or controlled.
    ///
    /// With [`EngageTriggers::ALWAYS`] the element starts engaged without an
    /// edge.
    #[must_use]
    pub fn new(config: EngagedConfig) -> Self {
        let mut this = Self {
            triggers: config.triggers,
            hover: HoverDetector::new(config.hover),
            visibility: VisibilityObserver::new(VisibilityConfig {
                threshold: config.threshold,
                root_margin: config.root_margin,
                once: false,
            }),
            hovered: false,
            controlled: false,
            engaged: false,
        };
        this.engaged = this.compute();
        this
    }

    /// Configured triggers.
    #[must_use]
    pub const fn triggers(&self) -> EngageTriggers {
        self.triggers
    }

    /// Whether any configured trigger holds.
    #[must_use]
    pub const fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Whether the element is considered hovered.
    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether the element is in view by the configured threshold.
    #[must_use]
    pub const fn in_view(&self) -> bool {
        self.visibility.is_visible()
    }

    /// The controlled flag.
    #[must_use]
    pub const fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// The pointer entered `target`.
    pub fn on_enter(&mut self, now: Millis, target: K) -> Option<EngagementEdge> {
        if !self.triggers.contains(EngageTriggers::HOVER) {
            return None;
        }
        let events = self.hover.on_enter(now, target);
        self.apply_hover(&events);
        self.settle()
    }

    /// The pointer left `target`.
    pub fn on_leave(&mut self, now: Millis, target: K, bounds: Option<Rect>) -> Option<EngagementEdge> {
        if !self.triggers.contains(EngageTriggers::HOVER) {
            return None;
        }
        let events = self.hover.on_leave(now, target, bounds);
        self.apply_hover(&events);
        self.settle()
    }

    /// Pointer position for the unhover intent watch.
    pub fn on_pointer_move(&mut self, now: Millis, position: Point) {
        if self.triggers.contains(EngageTriggers::HOVER) {
            self.hover.on_pointer_move(now, position);
        }
    }

    /// Deliver delayed hover reports.
    pub fn poll(&mut self, now: Millis) -> Option<EngagementEdge> {
        let events = self.hover.poll(now);
        self.apply_hover(&events);
        self.settle()
    }

    /// Recompute visibility for the element's bounds.
    pub fn update_visibility(&mut self, target: Option<Rect>, root: Rect) -> Option<EngagementEdge> {
        if !self.triggers.contains(EngageTriggers::VISIBLE) {
            return None;
        }
        self.visibility.update(target, root);
        self.settle()
    }

    /// Set the controlled flag.
    pub fn set_controlled(&mut self, active: bool) -> Option<EngagementEdge> {
        self.controlled = active;
        self.settle()
    }

    /// Earliest pending hover deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.hover.next_deadline()
    }

    /// Drop pending hover reports.
    pub fn teardown(&mut self) {
        self.hover.teardown();
    }

    fn apply_hover(&mut self, events: &HoverEvents<K>) {
        for event in events {
            match event {
                HoverEvent::Start(_) => self.hovered = true,
                HoverEvent::End(_) => self.hovered = false,
                HoverEvent::UnhoverCommit { .. } | HoverEvent::UnhoverCancel { .. } => {}
            }
        }
    }

    fn compute(&self) -> bool {
        let t = self.triggers;
        t.contains(EngageTriggers::ALWAYS)
            || (t.contains(EngageTriggers::HOVER) && self.hovered)
            || (t.contains(EngageTriggers::CONTROLLED) && self.controlled)
            || (t.contains(EngageTriggers::VISIBLE) && self.visibility.is_visible())
    }

    fn settle(&mut self) -> Option<EngagementEdge> {
        let engaged = self.compute();
        if engaged == self.engaged {
            return None;
        }
        self.engaged = engaged;
        tracing::trace!(engaged, "engagement changed");
        Some(if engaged {
            EngagementEdge::Engaged
        } else {
            EngagementEdge::Disengaged
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: Rect = Rect::new(0.0, 0.0, 400.0, 800.0);

    fn with(triggers: EngageTriggers) -> EngagedByTriggers<u32> {
        EngagedByTriggers::new(EngagedConfig {
            triggers,
            ..Default::default()
        })
    }

    #[test]
    fn names() {
        let t = EngageTriggers::from_names(["Hover", " visible ", "sparkle"]);
        assert_eq!(t, EngageTriggers::HOVER | EngageTriggers::VISIBLE);
        assert_eq!(EngageTriggers::default(), EngageTriggers::HOVER);
    }

    #[test]
    fn always_is_engaged_from_the_start() {
        let mut e = with(EngageTriggers::ALWAYS);
        assert!(e.is_engaged());
        assert_eq!(e.set_controlled(false), None);
        assert_eq!(e.on_enter(0, 1), None);
    }

    #[test]
    fn hover_ignored_unless_configured() {
        let mut e = with(EngageTriggers::CONTROLLED);
        assert_eq!(e.on_enter(0, 1), None);
        assert!(!e.is_hovered());
        assert_eq!(e.set_controlled(true), Some(EngagementEdge::Engaged));
    }

    #[test]
    fn delayed_hover_engages_on_poll() {
        let mut e = EngagedByTriggers::new(EngagedConfig {
            hover: HoverConfig {
                hover_delay: 100,
                unhover_intent: None,
            },
            ..Default::default()
        });
        assert_eq!(e.on_enter(0, 7), None);
        assert_eq!(e.next_deadline(), Some(100));
        assert_eq!(e.poll(99), None);
        assert_eq!(e.poll(100), Some(EngagementEdge::Engaged));
        assert_eq!(e.on_leave(150, 7, None), None);
        assert_eq!(e.poll(250), Some(EngagementEdge::Disengaged));
    }

    #[test]
    fn visibility_uses_the_shrunk_root() {
        let mut e = with(EngageTriggers::VISIBLE);
        // The root is 120..680 after shrinking. 20 of 100 showing is below 0.25.
        assert_eq!(e.update_visibility(Some(Rect::new(0.0, 660.0, 400.0, 760.0)), ROOT), None);
        assert_eq!(
            e.update_visibility(Some(Rect::new(0.0, 600.0, 400.0, 700.0)), ROOT),
            Some(EngagementEdge::Engaged)
        );
        assert!(e.in_view());
        assert_eq!(
            e.update_visibility(Some(Rect::new(0.0, 0.0, 400.0, 100.0)), ROOT),
            Some(EngagementEdge::Disengaged)
        );
    }

    #[test]
    fn any_source_keeps_engagement() {
        let mut e = with(EngageTriggers::HOVER | EngageTriggers::VISIBLE);
        let inside = Some(Rect::new(0.0, 300.0, 400.0, 400.0));
        assert_eq!(e.update_visibility(inside, ROOT), Some(EngagementEdge::Engaged));
        assert_eq!(e.on_enter(10, 1), None);
        assert_eq!(e.on_leave(20, 1, None), None);
        assert!(e.is_engaged());
    }
}

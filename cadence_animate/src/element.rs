// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility-only animation driver.

use alloc::borrow::ToOwned;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use cadence_timer::Millis;
use cadence_visibility::{RootMargin, RootMarginError, VisibilityConfig, VisibilityObserver};
use kurbo::Rect;

/// Easing used when none is configured.
pub const DEFAULT_EASING: &str = "cubic-bezier(0.4, 0, 0.2, 1)";

/// Which way the element last transitioned.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AnimationDirection {
    /// Entering, or never left.
    #[default]
    Forward,
    /// Leaving.
    Reverse,
}

impl AnimationDirection {
    /// The attribute value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
        }
    }
}

impl fmt::Display for AnimationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tuning for [`AnimatedElement`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimatedElementConfig {
    /// Transition duration exposed to styles.
    pub duration: Millis,
    /// Transition delay exposed to styles.
    pub delay: Millis,
    /// CSS timing function exposed to styles.
    pub easing: String,
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    /// Root margin; by default the element triggers 50 units above the
    /// bottom of the root.
    pub root_margin: RootMargin,
    /// Stay visible after the first enter.
    pub once: bool,
}

impl Default for AnimatedElementConfig {
    fn default() -> Self {
        Self {
            duration: 600,
            delay: 0,
            easing: DEFAULT_EASING.to_owned(),
            threshold: 0.2,
            root_margin: RootMargin::from_bottom_offset(-50.0),
            once: false,
        }
    }
}

impl AnimatedElementConfig {
    /// Set the root margin from a string.
    ///
    /// A lone `px` length such as `-80px` is a bottom offset; anything else
    /// is CSS margin shorthand.
    pub fn with_root_margin(mut self, margin: &str) -> Result<Self, RootMarginError> {
        self.root_margin = RootMargin::parse_offset_or_shorthand(margin)?;
        Ok(self)
    }

    fn visibility(&self) -> VisibilityConfig {
        VisibilityConfig {
            threshold: self.threshold,
            root_margin: self.root_margin,
            once: self.once,
        }
    }
}

/// Visibility edge reported by [`AnimatedElement::update`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnimationEdge {
    /// The element came into view; the forward transition starts.
    Started,
    /// The element left view; the reverse transition starts.
    Reversed,
}

/// Style variables and data attributes for the animated element.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationProps {
    /// CSS custom properties in declaration order.
    pub style: Vec<(&'static str, String)>,
    /// `data-*` attributes.
    pub data: [(&'static str, &'static str); 2],
}

impl AnimationProps {
    /// Value of a custom property.
    #[must_use]
    pub fn style_value(&self, name: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value of a data attribute.
    #[must_use]
    pub fn data_value(&self, name: &str) -> Option<&'static str> {
        self.data.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }

    /// The custom properties as an inline `style` attribute.
    #[must_use]
    pub fn style_attribute(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.style {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push(';');
        }
        out
    }
}

/// Derives transition state for one element from its visibility.
///
/// The driver never animates anything itself: styles read the variables in
/// [`AnimatedElement::props`] and transition between the two states.
#[derive(Clone, Debug)]
pub struct AnimatedElement {
    config: AnimatedElementConfig,
    observer: VisibilityObserver,
    in_view: bool,
    direction: AnimationDirection,
}

impl Default for AnimatedElement {
    fn default() -> Self {
        Self::new(AnimatedElementConfig::default())
    }
}

impl AnimatedElement {
    /// Create a driver for an element that is not yet in view.
    #[must_use]
    pub fn new(config: AnimatedElementConfig) -> Self {
        Self {
            observer: VisibilityObserver::new(config.visibility()),
            config,
            in_view: false,
            direction: AnimationDirection::Forward,
        }
    }

    /// Configuration.
    #[must_use]
    pub const fn config(&self) -> &AnimatedElementConfig {
        &self.config
    }

    /// Recompute visibility for the element's current bounds.
    ///
    /// A missing element leaves the state untouched.
    pub fn update(&mut self, target: Option<Rect>, root: Rect) -> Option<AnimationEdge> {
        self.observer.update(target, root);
        let in_view = self.observer.is_visible();
        if in_view == self.in_view {
            return None;
        }
        self.in_view = in_view;
        if in_view {
            self.direction = AnimationDirection::Forward;
            tracing::trace!("animated element entered");
            Some(AnimationEdge::Started)
        } else {
            self.direction = AnimationDirection::Reverse;
            tracing::trace!("animated element left");
            Some(AnimationEdge::Reversed)
        }
    }

    /// Whether the element is in view (or, with `once`, has been).
    #[must_use]
    pub const fn in_view(&self) -> bool {
        self.in_view
    }

    /// Transition progress in percent: 100 in view, 0 otherwise.
    #[must_use]
    pub const fn progress(&self) -> u8 {
        if self.in_view { 100 } else { 0 }
    }

    /// Transition progress as a fraction.
    #[must_use]
    pub const fn progress_decimal(&self) -> f64 {
        if self.in_view { 1.0 } else { 0.0 }
    }

    /// Direction of the last edge.
    #[must_use]
    pub const fn direction(&self) -> AnimationDirection {
        self.direction
    }

    /// Whether the forward transition is the current target.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.in_view
    }

    /// Whether the element has ever entered view.
    #[must_use]
    pub const fn has_animated(&self) -> bool {
        self.observer.has_been_seen()
    }

    /// Style variables and data attributes for the current state.
    #[must_use]
    pub fn props(&self) -> AnimationProps {
        let visible = if self.in_view { "true" } else { "false" };
        let direction = self.direction.as_str();
        AnimationProps {
            style: Vec::from([
                ("--animation-duration", format!("{}ms", self.config.duration)),
                ("--animation-delay", format!("{}ms", self.config.delay)),
                ("--animation-easing", self.config.easing.clone()),
                ("--animation-progress", format!("{}%", self.progress())),
                (
                    "--animation-progress-decimal",
                    format!("{}", self.progress_decimal()),
                ),
                ("--animation-direction", direction.to_owned()),
            ]),
            data: [
                ("data-visible", visible),
                ("data-animation-direction", direction),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: Rect = Rect::new(0.0, 0.0, 400.0, 800.0);

    fn at(top: f64) -> Option<Rect> {
        Some(Rect::new(0.0, top, 400.0, top + 100.0))
    }

    #[test]
    fn default_props_before_entering() {
        let el = AnimatedElement::default();
        let props = el.props();
        assert_eq!(props.style_value("--animation-duration"), Some("600ms"));
        assert_eq!(props.style_value("--animation-delay"), Some("0ms"));
        assert_eq!(props.style_value("--animation-easing"), Some(DEFAULT_EASING));
        assert_eq!(props.style_value("--animation-progress"), Some("0%"));
        assert_eq!(props.style_value("--animation-progress-decimal"), Some("0"));
        assert_eq!(props.style_value("--animation-direction"), Some("forward"));
        assert_eq!(props.data_value("data-visible"), Some("false"));
        assert_eq!(props.data_value("data-animation-direction"), Some("forward"));
    }

    #[test]
    fn enter_then_leave() {
        let mut el = AnimatedElement::default();
        // Bottom margin -50: the root ends at 750, so 20 units showing is 20%.
        assert_eq!(el.update(at(740.0), ROOT), None);
        assert_eq!(el.update(at(730.0), ROOT), Some(AnimationEdge::Started));
        assert!(el.in_view());
        let props = el.props();
        assert_eq!(props.style_value("--animation-progress"), Some("100%"));
        assert_eq!(props.style_value("--animation-progress-decimal"), Some("1"));
        assert_eq!(props.data_value("data-visible"), Some("true"));

        assert_eq!(el.update(at(900.0), ROOT), Some(AnimationEdge::Reversed));
        assert_eq!(el.direction(), AnimationDirection::Reverse);
        assert_eq!(el.props().data_value("data-animation-direction"), Some("reverse"));
        assert!(el.has_animated());
        assert!(!el.is_animating());
    }

    #[test]
    fn once_never_reverses() {
        let config = AnimatedElementConfig {
            once: true,
            ..Default::default()
        };
        let mut el = AnimatedElement::new(config);
        assert_eq!(el.update(at(100.0), ROOT), Some(AnimationEdge::Started));
        assert_eq!(el.update(at(2_000.0), ROOT), None);
        assert!(el.in_view());
    }

    #[test]
    fn missing_element_is_not_visible() {
        let mut el = AnimatedElement::default();
        assert_eq!(el.update(None, ROOT), None);
        assert!(!el.in_view());
    }

    #[test]
    fn root_margin_strings() {
        let config = AnimatedElementConfig::default()
            .with_root_margin("-80px")
            .unwrap();
        assert_eq!(config.root_margin, RootMargin::from_bottom_offset(-80.0));
        assert!(AnimatedElementConfig::default().with_root_margin("1 2 3 4 5").is_err());
    }

    #[test]
    fn inline_style() {
        let config = AnimatedElementConfig {
            easing: "ease".to_owned(),
            ..Default::default()
        };
        let style = AnimatedElement::new(config).props().style_attribute();
        assert!(style.starts_with("--animation-duration: 600ms; --animation-delay: 0ms;"));
        assert!(style.ends_with("--animation-direction: forward;"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_config_keeps_defaults() {
        let config: AnimatedElementConfig =
            serde_json::from_str(r#"{ "duration": 900, "once": true }"#).unwrap();
        assert_eq!(config.duration, 900);
        assert!(config.once);
        assert_eq!(config.easing, DEFAULT_EASING);
        assert_eq!(config.root_margin, RootMargin::from_bottom_offset(-50.0));
    }
}

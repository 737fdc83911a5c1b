// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Threshold-based visibility of one target against one root.

use kurbo::Rect;

use crate::margin::RootMargin;

/// Errors from [`VisibilityConfig::validate`].
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum VisibilityError {
    /// The threshold is not a finite fraction in `0.0..=1.0`.
    #[error("visibility threshold {0} is outside 0..=1")]
    Threshold(f64),
}

/// Visibility tuning.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VisibilityConfig {
    /// Fraction of the target that must overlap the expanded root.
    ///
    /// `0.0` means any overlap, including touching edges.
    pub threshold: f64,
    /// Growth applied to the root before intersecting.
    pub root_margin: RootMargin,
    /// Report "has ever been visible" and stop observing after the first enter.
    pub once: bool,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: RootMargin::ZERO,
            once: false,
        }
    }
}

impl VisibilityConfig {
    /// Check that the threshold is usable.
    pub fn validate(&self) -> Result<(), VisibilityError> {
        if self.threshold.is_finite() && (0.0..=1.0).contains(&self.threshold) {
            Ok(())
        } else {
            Err(VisibilityError::Threshold(self.threshold))
        }
    }

    fn effective_threshold(&self) -> f64 {
        if self.threshold.is_nan() {
            0.0
        } else {
            self.threshold.clamp(0.0, 1.0)
        }
    }
}

/// A threshold crossing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum VisibilityChange {
    /// The target became visible.
    Enter {
        /// Overlap ratio at the crossing.
        ratio: f64,
    },
    /// The target stopped being visible.
    Exit {
        /// Overlap ratio at the crossing.
        ratio: f64,
    },
}

/// Fraction of `target` covered by `root`, or `None` when they do not touch.
///
/// An empty target that touches the root counts as fully covered.
#[must_use]
pub fn intersection_ratio(target: Rect, root: Rect) -> Option<f64> {
    let x0 = target.x0.max(root.x0);
    let y0 = target.y0.max(root.y0);
    let x1 = target.x1.min(root.x1);
    let y1 = target.y1.min(root.y1);
    if x0 > x1 || y0 > y1 {
        return None;
    }
    let area = target.area();
    if area <= 0.0 {
        return Some(1.0);
    }
    Some(((x1 - x0) * (y1 - y0) / area).min(1.0))
}

/// Tracks whether one target is visible inside a root.
///
/// The host calls [`update`](Self::update) whenever the target or root
/// geometry may have changed (scroll, resize, layout) and reacts to the
/// returned edge.
///
/// ```
/// use cadence_visibility::{VisibilityChange, VisibilityConfig, VisibilityObserver};
/// use kurbo::Rect;
///
/// let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
/// let mut seen = VisibilityObserver::new(VisibilityConfig { once: true, ..Default::default() });
///
/// assert_eq!(seen.update(Some(Rect::new(0.0, 700.0, 100.0, 800.0)), viewport), None);
/// assert!(matches!(
///     seen.update(Some(Rect::new(0.0, 500.0, 100.0, 600.0)), viewport),
///     Some(VisibilityChange::Enter { .. })
/// ));
/// // Observation has stopped; scrolling away changes nothing.
/// assert_eq!(seen.update(Some(Rect::new(0.0, 900.0, 100.0, 1000.0)), viewport), None);
/// assert!(seen.is_visible());
/// ```
#[derive(Clone, Debug)]
pub struct VisibilityObserver {
    config: VisibilityConfig,
    visible: bool,
    seen: bool,
    connected: bool,
    ratio: f64,
}

impl Default for VisibilityObserver {
    fn default() -> Self {
        Self::new(VisibilityConfig::default())
    }
}

impl VisibilityObserver {
    /// Start observing with `config`.
    ///
    /// An out-of-range threshold is clamped into `0.0..=1.0` and logged.
    #[must_use]
    pub fn new(config: VisibilityConfig) -> Self {
        if let Err(err) = config.validate() {
            tracing::warn!(%err, "clamping visibility threshold");
        }
        Self {
            config,
            visible: false,
            seen: false,
            connected: true,
            ratio: 0.0,
        }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &VisibilityConfig {
        &self.config
    }

    /// Replace the configuration and observe again from scratch.
    ///
    /// The seen-once flag survives.
    pub fn set_config(&mut self, config: VisibilityConfig) {
        *self = Self {
            seen: self.seen,
            ..Self::new(config)
        };
    }

    /// Recompute visibility for the current geometry.
    ///
    /// A missing target leaves the state untouched. Returns the edge, if the
    /// threshold was crossed.
    pub fn update(&mut self, target: Option<Rect>, root: Rect) -> Option<VisibilityChange> {
        if !self.connected {
            return None;
        }
        let target = target?;
        let bounds = self.config.root_margin.expand(root);
        let overlap = intersection_ratio(target, bounds);
        let ratio = overlap.unwrap_or(0.0);
        self.ratio = ratio;
        let now_in = overlap.is_some() && ratio >= self.config.effective_threshold();
        if now_in == self.visible {
            return None;
        }
        self.visible = now_in;
        if now_in {
            self.seen = true;
            if self.config.once {
                self.connected = false;
                tracing::trace!(ratio, "seen once, observation stopped");
            }
            Some(VisibilityChange::Enter { ratio })
        } else {
            Some(VisibilityChange::Exit { ratio })
        }
    }

    /// The reported value: seen-once with `once`, otherwise current visibility.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        if self.config.once {
            self.seen
        } else {
            self.visible
        }
    }

    /// Whether the target crossed the threshold at the last update.
    #[must_use]
    pub const fn is_intersecting(&self) -> bool {
        self.visible
    }

    /// Whether the target has ever been visible. Never reverts.
    #[must_use]
    pub const fn has_been_seen(&self) -> bool {
        self.seen
    }

    /// Overlap ratio computed at the last update.
    #[must_use]
    pub const fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Whether updates are still processed.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Stop processing updates.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }
}

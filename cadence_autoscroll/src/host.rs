// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between the engine and the element it scrolls.

/// Vertical scroll geometry of a host element.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Current scroll offset.
    pub scroll_top: f64,
    /// Total content height.
    pub scroll_height: f64,
    /// Visible height.
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Largest reachable scroll offset.
    #[must_use]
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    /// Fraction of the scrollable distance covered, `0.0` when nothing scrolls.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let max = self.max_scroll();
        if max > 0.0 {
            self.scroll_top / max
        } else {
            0.0
        }
    }
}

/// Failure of [`ScrollHost::scroll_to`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScrollError {
    /// The element is no longer attached.
    #[error("scroll host is detached")]
    Detached,
    /// The host cannot perform option-based scrolling.
    #[error("scroll host does not support scroll_to")]
    Unsupported,
}

/// A scrollable element.
pub trait ScrollHost {
    /// Current geometry.
    fn metrics(&self) -> ScrollMetrics;

    /// Scroll to `top` immediately.
    fn scroll_to(&mut self, top: f64) -> Result<(), ScrollError>;

    /// Assign the scroll offset directly. Used when `scroll_to` fails.
    fn set_scroll_top(&mut self, top: f64);
}

impl<H: ScrollHost + ?Sized> ScrollHost for &mut H {
    fn metrics(&self) -> ScrollMetrics {
        (**self).metrics()
    }

    fn scroll_to(&mut self, top: f64) -> Result<(), ScrollError> {
        (**self).scroll_to(top)
    }

    fn set_scroll_top(&mut self, top: f64) {
        (**self).set_scroll_top(top);
    }
}

/// An in-memory scroll host, for simulations and tests.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SimulatedViewport {
    /// Current scroll offset.
    pub scroll_top: f64,
    /// Total content height.
    pub content_height: f64,
    /// Visible height.
    pub viewport_height: f64,
    /// Make `scroll_to` fail, exercising the fallback path.
    pub reject_scroll_to: bool,
}

impl SimulatedViewport {
    /// A viewport of `viewport_height` over `content_height` of content.
    #[must_use]
    pub const fn new(content_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_top: 0.0,
            content_height,
            viewport_height,
            reject_scroll_to: false,
        }
    }

    fn clamp(&self, top: f64) -> f64 {
        top.clamp(0.0, self.metrics().max_scroll())
    }
}

impl ScrollHost for SimulatedViewport {
    fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: self.scroll_top,
            scroll_height: self.content_height,
            client_height: self.viewport_height,
        }
    }

    fn scroll_to(&mut self, top: f64) -> Result<(), ScrollError> {
        if self.reject_scroll_to {
            return Err(ScrollError::Unsupported);
        }
        self.scroll_top = self.clamp(top);
        Ok(())
    }

    fn set_scroll_top(&mut self, top: f64) {
        self.scroll_top = self.clamp(top);
    }
}

// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Root margins in CSS shorthand form.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Rect;

/// One side of a root margin.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarginLength {
    /// Absolute length in the root's coordinate units.
    Px(f64),
    /// Percentage of the root's extent along the same axis.
    Percent(f64),
}

impl MarginLength {
    /// Resolve against the root extent along this side's axis.
    #[must_use]
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(p) => extent * p / 100.0,
        }
    }
}

impl Default for MarginLength {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

impl fmt::Display for MarginLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

/// Errors from parsing a root margin string.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RootMarginError {
    /// No values were given.
    #[error("root margin is empty")]
    Empty,
    /// More than four values were given.
    #[error("root margin has {0} values, expected 1 to 4")]
    TooManyValues(usize),
    /// A value was neither a `px` length, a percentage nor zero.
    #[error("invalid root margin length `{0}`")]
    InvalidLength(String),
}

/// Per-side growth applied to the root before intersecting.
///
/// Positive values grow the root, negative values shrink it. A margin of
/// `0px 0px -50px 0px` makes a target count as visible only once it is 50
/// units above the bottom edge of the root.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RootMargin {
    /// Top side.
    pub top: MarginLength,
    /// Right side.
    pub right: MarginLength,
    /// Bottom side.
    pub bottom: MarginLength,
    /// Left side.
    pub left: MarginLength,
}

impl RootMargin {
    /// No margin.
    pub const ZERO: Self = Self::uniform(MarginLength::Px(0.0));

    /// The same length on all four sides.
    #[must_use]
    pub const fn uniform(len: MarginLength) -> Self {
        Self {
            top: len,
            right: len,
            bottom: len,
            left: len,
        }
    }

    /// Only the bottom side set, in px.
    ///
    /// A negative offset delays visibility until the target has scrolled
    /// that far into the root.
    #[must_use]
    pub const fn from_bottom_offset(offset: f64) -> Self {
        Self {
            bottom: MarginLength::Px(offset),
            ..Self::ZERO
        }
    }

    /// Shrink the root by `amount` px at both the top and the bottom.
    ///
    /// Negative and fractional amounts are truncated towards zero first.
    #[must_use]
    pub fn shrink_vertical(amount: f64) -> Self {
        let n = if amount.is_finite() {
            amount.max(0.0).floor()
        } else {
            0.0
        };
        if n == 0.0 {
            return Self::ZERO;
        }
        Self {
            top: MarginLength::Px(-n),
            bottom: MarginLength::Px(-n),
            ..Self::ZERO
        }
    }

    /// Parse CSS margin shorthand with one to four values.
    ///
    /// A lone `px` value is the exception: it sets only the bottom side,
    /// matching [`RootMargin::from_bottom_offset`].
    pub fn parse_offset_or_shorthand(s: &str) -> Result<Self, RootMarginError> {
        let trimmed = s.trim();
        let single = !trimmed.is_empty() && !trimmed.contains(char::is_whitespace);
        if single && trimmed.ends_with("px") {
            if let MarginLength::Px(v) = parse_length(trimmed)? {
                return Ok(Self::from_bottom_offset(v));
            }
        }
        trimmed.parse()
    }

    /// Grow `root` by this margin.
    #[must_use]
    pub fn expand(&self, root: Rect) -> Rect {
        let (w, h) = (root.width(), root.height());
        Rect::new(
            root.x0 - self.left.resolve(w),
            root.y0 - self.top.resolve(h),
            root.x1 + self.right.resolve(w),
            root.y1 + self.bottom.resolve(h),
        )
    }
}

fn parse_length(token: &str) -> Result<MarginLength, RootMarginError> {
    let invalid = || RootMarginError::InvalidLength(token.to_string());
    let len = if let Some(num) = token.strip_suffix("px") {
        MarginLength::Px(num.parse().map_err(|_| invalid())?)
    } else if let Some(num) = token.strip_suffix('%') {
        MarginLength::Percent(num.parse().map_err(|_| invalid())?)
    } else {
        let v: f64 = token.parse().map_err(|_| invalid())?;
        if v != 0.0 {
            return Err(invalid());
        }
        MarginLength::Px(0.0)
    };
    match len {
        MarginLength::Px(v) | MarginLength::Percent(v) if !v.is_finite() => Err(invalid()),
        _ => Ok(len),
    }
}

impl FromStr for RootMargin {
    type Err = RootMarginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = [MarginLength::default(); 4];
        let mut count = 0;
        for token in s.split_whitespace() {
            if count == 4 {
                return Err(RootMarginError::TooManyValues(s.split_whitespace().count()));
            }
            values[count] = parse_length(token)?;
            count += 1;
        }
        let [a, b, c, d] = values;
        match count {
            0 => Err(RootMarginError::Empty),
            1 => Ok(Self::uniform(a)),
            2 => Ok(Self {
                top: a,
                right: b,
                bottom: a,
                left: b,
            }),
            3 => Ok(Self {
                top: a,
                right: b,
                bottom: c,
                left: b,
            }),
            _ => Ok(Self {
                top: a,
                right: b,
                bottom: c,
                left: d,
            }),
        }
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

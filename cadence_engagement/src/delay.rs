// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed or computed delays with a safe fallback.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use cadence_timer::Millis;

/// Delay used when a computed delay fails or is not a finite number.
pub const FALLBACK_DELAY: Millis = 3_000;

/// Failure reported by a computed delay.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DelayError {
    /// The value the delay depends on is not known yet.
    #[error("delay source is unavailable")]
    Unavailable,
    /// The delay could not be computed.
    #[error("delay computation failed: {0}")]
    Failed(String),
}

/// Closure type of [`Delay::Computed`].
pub type DelayFn = Box<dyn FnMut() -> Result<f64, DelayError>>;

/// A delay in milliseconds, either literal or computed at schedule time.
///
/// A computed delay is evaluated fresh every time it is resolved, for
/// example "remaining video time plus a short pad".
pub enum Delay {
    /// A literal delay.
    Fixed(f64),
    /// A delay computed on every resolution.
    Computed(DelayFn),
}

impl Delay {
    /// Wrap a closure as a computed delay.
    pub fn computed(f: impl FnMut() -> Result<f64, DelayError> + 'static) -> Self {
        Self::Computed(Box::new(f))
    }

    /// Resolve to whole milliseconds.
    ///
    /// Negative values floor at zero. Errors and non-finite values resolve
    /// to [`FALLBACK_DELAY`].
    #[allow(
        clippy::cast_possible_truncation,
        reason = "non-negative finite delays saturate at u64::MAX"
    )]
    pub fn resolve(&mut self) -> Millis {
        let raw = match self {
            Self::Fixed(v) => Ok(*v),
            Self::Computed(f) => f(),
        };
        match raw {
            Ok(v) if v.is_finite() => v.max(0.0) as Millis,
            Ok(v) => {
                tracing::warn!(value = v, fallback = FALLBACK_DELAY, "non-finite delay");
                FALLBACK_DELAY
            }
            Err(err) => {
                tracing::warn!(%err, fallback = FALLBACK_DELAY, "delay computation failed");
                FALLBACK_DELAY
            }
        }
    }
}

impl Default for Delay {
    fn default() -> Self {
        Self::from(FALLBACK_DELAY)
    }
}

impl From<Millis> for Delay {
    #[allow(
        clippy::cast_precision_loss,
        reason = "millisecond delays are far below 2^52"
    )]
    fn from(ms: Millis) -> Self {
        Self::Fixed(ms as f64)
    }
}

impl fmt::Debug for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_delays_floor_at_zero() {
        assert_eq!(Delay::Fixed(1_250.7).resolve(), 1_250);
        assert_eq!(Delay::Fixed(-40.0).resolve(), 0);
        assert_eq!(Delay::from(800).resolve(), 800);
    }

    #[test]
    fn invalid_values_fall_back() {
        assert_eq!(Delay::Fixed(f64::NAN).resolve(), FALLBACK_DELAY);
        assert_eq!(Delay::Fixed(f64::INFINITY).resolve(), FALLBACK_DELAY);
        let mut failing = Delay::computed(|| Err(DelayError::Unavailable));
        assert_eq!(failing.resolve(), FALLBACK_DELAY);
    }

    #[test]
    fn computed_is_evaluated_each_time() {
        let mut remaining = 4_000.0;
        let mut delay = Delay::computed(move || {
            remaining -= 1_000.0;
            Ok(remaining + 300.0)
        });
        assert_eq!(delay.resolve(), 3_300);
        assert_eq!(delay.resolve(), 2_300);
    }
}

// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded playback position.

/// Current item of a sequence of `total` items.
///
/// The index always stays in `0..total` (or at `0` for an empty sequence).
/// Advancing past the last item wraps when looping and otherwise stays put.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlaybackIndex {
    current: usize,
    total: usize,
    looping: bool,
}

impl PlaybackIndex {
    /// Start at item `0` of `total`.
    #[must_use]
    pub const fn new(total: usize, looping: bool) -> Self {
        Self {
            current: 0,
            total,
            looping,
        }
    }

    /// Start at `current`, clamped into range.
    #[must_use]
    pub fn with_current(mut self, current: usize) -> Self {
        self.current = current.min(self.total.saturating_sub(1));
        self
    }

    /// The current item.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Number of items.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Whether advancing past the end wraps to the start.
    #[must_use]
    pub const fn is_looping(&self) -> bool {
        self.looping
    }

    /// Change the looping mode.
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Change the item count, clamping the current item.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.current = self.current.min(total.saturating_sub(1));
    }

    /// Whether a non-looping sequence sits on its last item.
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        !self.looping && self.current + 1 >= self.total
    }

    /// The item [`advance`](Self::advance) would move to.
    #[must_use]
    pub const fn next(&self) -> usize {
        if self.total == 0 {
            0
        } else if self.looping {
            (self.current + 1) % self.total
        } else if self.current + 1 < self.total {
            self.current + 1
        } else {
            self.total - 1
        }
    }

    /// Move to the next item and return it.
    pub fn advance(&mut self) -> usize {
        self.current = self.next();
        self.current
    }

    /// Move to the previous item and return it.
    pub fn retreat(&mut self) -> usize {
        self.current = match self.current {
            0 if self.looping => self.total.saturating_sub(1),
            0 => 0,
            c => c - 1,
        };
        self.current
    }

    /// Jump to `index`. Out-of-range indices are ignored.
    ///
    /// Returns whether the index was accepted.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index < self.total {
            self.current = index;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_advance_never_leaves_range() {
        for total in 1..8 {
            let mut index = PlaybackIndex::new(total, false);
            for _ in 0..(total * 3) {
                assert!(index.advance() < total);
            }
            assert_eq!(index.current(), total - 1);
            assert!(index.is_at_end());
        }
    }

    #[test]
    fn looping_returns_to_start_after_total_steps() {
        for total in 1..8 {
            let mut index = PlaybackIndex::new(total, true);
            for _ in 0..total {
                index.advance();
            }
            assert_eq!(index.current(), 0, "total {total}");
        }
    }

    #[test]
    fn retreat_wraps_when_looping() {
        let mut index = PlaybackIndex::new(3, true);
        assert_eq!(index.retreat(), 2);
        index.set_looping(false);
        assert_eq!(index.retreat(), 1);
        assert_eq!(index.retreat(), 0);
        assert_eq!(index.retreat(), 0);
    }

    #[test]
    fn go_to_and_set_total() {
        let mut index = PlaybackIndex::new(5, true).with_current(9);
        assert_eq!(index.current(), 4);
        assert!(!index.go_to(5));
        assert!(index.go_to(2));
        index.set_total(2);
        assert_eq!(index.current(), 1);
        index.set_total(0);
        assert_eq!(index.current(), 0);
        assert_eq!(index.advance(), 0);
    }
}

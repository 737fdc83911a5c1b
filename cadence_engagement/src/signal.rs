// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fire-and-forget signals between decoupled components.

use alloc::collections::VecDeque;

/// Phase of a user interaction with a nested viewport.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UserPhase {
    /// The user started interacting.
    Start,
    /// The user stopped interacting.
    End,
}

/// An ordered queue of published signals.
///
/// The publisher pushes, and the host drains and forwards to whoever is
/// interested. There is no back-pressure.
#[derive(Clone, Debug)]
pub struct SignalQueue<T> {
    pending: VecDeque<T>,
}

impl<T> Default for SignalQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SignalQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    /// Publish a signal.
    pub fn publish(&mut self, signal: T) {
        self.pending.push_back(signal);
    }

    /// Take all pending signals in publication order.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.pending.drain(..)
    }

    /// Number of pending signals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop everything pending.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn drains_in_order() {
        let mut queue = SignalQueue::new();
        queue.publish(UserPhase::Start);
        queue.publish(UserPhase::End);
        assert_eq!(queue.len(), 2);
        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained, [UserPhase::Start, UserPhase::End]);
        assert!(queue.is_empty());
    }
}

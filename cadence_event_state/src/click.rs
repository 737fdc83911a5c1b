// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click classification against a [`RegionMap`].
//!
//! A click either lands outside every registered container, inside a
//! container, or on a registered item inside a container. Synthetic clicks
//! (not marked trusted by the platform) are dropped by default so that
//! programmatic `click()` calls do not count as user engagement.
//!
//! ```
//! use cadence_event_state::click::{ClickDetector, ClickOutcome};
//! use cadence_event_state::region::RegionMap;
//! use kurbo::{Point, Rect};
//!
//! let mut regions: RegionMap<&str, u32> = RegionMap::new();
//! regions.insert_container("gallery", Rect::new(0.0, 0.0, 400.0, 300.0));
//! regions.insert_item(7, "gallery", Rect::new(10.0, 10.0, 110.0, 110.0), true);
//!
//! let clicks = ClickDetector::default();
//! assert_eq!(
//!     clicks.classify(&regions, Point::new(50.0, 50.0), true),
//!     Some(ClickOutcome::Item { container: "gallery", item: 7 })
//! );
//! assert_eq!(
//!     clicks.classify(&regions, Point::new(500.0, 50.0), true),
//!     Some(ClickOutcome::Outside)
//! );
//! ```

use core::hash::Hash;

use kurbo::Point;

use crate::region::RegionMap;

/// Where a click landed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome<C, I> {
    /// Outside every registered container.
    Outside,
    /// Inside a container but not on a registered item.
    Inside {
        /// The container hit.
        container: C,
    },
    /// On a registered item inside a container.
    Item {
        /// The container hit.
        container: C,
        /// The item hit.
        item: I,
    },
}

/// Stateless click classifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClickDetector {
    /// Ignore clicks the platform did not mark as user-generated.
    pub trusted_only: bool,
}

impl Default for ClickDetector {
    fn default() -> Self {
        Self { trusted_only: true }
    }
}

impl ClickDetector {
    /// Classify a click at `pt`.
    ///
    /// Returns `None` when the click is filtered out as untrusted.
    pub fn classify<C, I>(
        &self,
        regions: &RegionMap<C, I>,
        pt: Point,
        trusted: bool,
    ) -> Option<ClickOutcome<C, I>>
    where
        C: Clone + PartialEq,
        I: Clone + Eq + Hash,
    {
        if self.trusted_only && !trusted {
            return None;
        }
        let Some(container) = regions.container_at(pt).cloned() else {
            return Some(ClickOutcome::Outside);
        };
        Some(match regions.item_at(pt).cloned() {
            Some(item) => ClickOutcome::Item { container, item },
            None => ClickOutcome::Inside { container },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    #[test]
    fn untrusted_clicks_are_filtered() {
        let regions: RegionMap<u8, u8> = RegionMap::new();
        let clicks = ClickDetector::default();
        assert_eq!(clicks.classify(&regions, Point::ZERO, false), None);

        let permissive = ClickDetector {
            trusted_only: false,
        };
        assert_eq!(
            permissive.classify(&regions, Point::ZERO, false),
            Some(ClickOutcome::Outside)
        );
    }

    #[test]
    fn container_gap_is_inside() {
        let mut regions: RegionMap<u8, u8> = RegionMap::new();
        regions.insert_container(1, Rect::new(0.0, 0.0, 100.0, 100.0));
        regions.insert_item(5, 1, Rect::new(0.0, 0.0, 10.0, 10.0), false);

        assert_eq!(
            ClickDetector::default().classify(&regions, Point::new(50.0, 50.0), true),
            Some(ClickOutcome::Inside { container: 1 })
        );
    }
}

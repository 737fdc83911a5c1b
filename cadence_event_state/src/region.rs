// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explicit registry of engagement containers and items.
//!
//! Coordinators need to know which carousel a point belongs to, which slide
//! is under the pointer and whether that slide is the active one. Instead of
//! discovering elements by selector at event time, the host registers typed
//! handles with their current bounds and keeps the "active" flag up to date.
//!
//! Later registrations are treated as stacked above earlier ones when
//! regions overlap.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Rect};

/// Registered item data.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemRegion<C> {
    /// Container the item belongs to.
    pub container: C,
    /// Current bounds in the shared coordinate space.
    pub bounds: Rect,
    /// Whether the item is the currently active (presented) one.
    pub active: bool,
}

/// Containers and items keyed by host-chosen handles.
#[derive(Clone, Debug)]
pub struct RegionMap<C, I> {
    containers: Vec<(C, Rect)>,
    items: HashMap<I, ItemRegion<C>>,
    item_order: Vec<I>,
}

impl<C, I> RegionMap<C, I>
where
    C: Clone + PartialEq,
    I: Clone + Eq + Hash,
{
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            containers: Vec::new(),
            items: HashMap::new(),
            item_order: Vec::new(),
        }
    }

    /// Register a container, or update its bounds if already present.
    pub fn insert_container(&mut self, id: C, bounds: Rect) {
        if let Some(entry) = self.containers.iter_mut().find(|(c, _)| *c == id) {
            entry.1 = bounds;
        } else {
            self.containers.push((id, bounds));
        }
    }

    /// Remove a container and every item registered under it.
    pub fn remove_container(&mut self, id: &C) {
        self.containers.retain(|(c, _)| c != id);
        let items = &mut self.items;
        self.item_order.retain(|item| {
            let keep = items.get(item).is_some_and(|r| r.container != *id);
            if !keep {
                items.remove(item);
            }
            keep
        });
    }

    /// Register an item, or replace its data if already present.
    pub fn insert_item(&mut self, id: I, container: C, bounds: Rect, active: bool) {
        let region = ItemRegion {
            container,
            bounds,
            active,
        };
        if self.items.insert(id.clone(), region).is_none() {
            self.item_order.push(id);
        }
    }

    /// Remove an item.
    pub fn remove_item(&mut self, id: &I) -> Option<ItemRegion<C>> {
        let removed = self.items.remove(id)?;
        self.item_order.retain(|item| item != id);
        Some(removed)
    }

    /// Update the bounds of a registered item.
    pub fn set_item_bounds(&mut self, id: &I, bounds: Rect) -> bool {
        self.items
            .get_mut(id)
            .map(|region| region.bounds = bounds)
            .is_some()
    }

    /// Set the active flag of a registered item.
    pub fn set_active(&mut self, id: &I, active: bool) -> bool {
        self.items
            .get_mut(id)
            .map(|region| region.active = active)
            .is_some()
    }

    /// Mark `id` active and every other item of the same container inactive.
    pub fn set_active_only(&mut self, id: &I) -> bool {
        let Some(container) = self.items.get(id).map(|r| r.container.clone()) else {
            return false;
        };
        for (item, region) in &mut self.items {
            if region.container == container {
                region.active = item == id;
            }
        }
        true
    }

    /// Registered data for an item.
    #[must_use]
    pub fn item(&self, id: &I) -> Option<&ItemRegion<C>> {
        self.items.get(id)
    }

    /// Whether the item is registered and active.
    #[must_use]
    pub fn is_active(&self, id: &I) -> bool {
        self.items.get(id).is_some_and(|r| r.active)
    }

    /// Topmost container containing `pt`.
    #[must_use]
    pub fn container_at(&self, pt: Point) -> Option<&C> {
        self.containers
            .iter()
            .rev()
            .find(|(_, bounds)| bounds.contains(pt))
            .map(|(id, _)| id)
    }

    /// Topmost item containing `pt`.
    #[must_use]
    pub fn item_at(&self, pt: Point) -> Option<&I> {
        self.item_order
            .iter()
            .rev()
            .find(|id| self.items.get(*id).is_some_and(|r| r.bounds.contains(pt)))
    }

    /// Items in registration order.
    pub fn items(&self) -> impl Iterator<Item = (&I, &ItemRegion<C>)> + '_ {
        self.item_order
            .iter()
            .filter_map(|id| self.items.get(id).map(|region| (id, region)))
    }

    /// Number of registered items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl<C, I> Default for RegionMap<C, I>
where
    C: Clone + PartialEq,
    I: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Per-year memoisation.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use crate::error::CalendarError;

type Slot<V> = Arc<Mutex<Option<V>>>;

/// A map from year to a lazily computed value.
///
/// The map itself sits behind a read-mostly lock; each year owns a slot mutex
/// that is held across the existence check and the computation, so a value
/// is computed at most once even when several threads ask for it together.
/// Failed computations leave the slot empty.
///
/// Every distinct year queried keeps one slot. Once `capacity` years are
/// held, asking for a new year first drops all of them, so memory stays
/// bounded under an unbounded stream of years. Values already handed out
/// stay valid; a dropped year is simply computed again on its next use.
pub struct YearCache<V> {
    name: &'static str,
    capacity: usize,
    slots: RwLock<HashMap<i32, Slot<V>>>,
}

/// Years kept by [`YearCache::new`].
pub const DEFAULT_YEAR_CAPACITY: usize = 1024;

impl<V: Clone> YearCache<V> {
    pub fn new(name: &'static str) -> Self {
        Self::with_capacity(name, DEFAULT_YEAR_CAPACITY)
    }

    /// A cache holding at most `capacity` years (at least one).
    pub fn with_capacity(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            capacity: capacity.max(1),
            slots: RwLock::new(HashMap::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn slot(&self, year: i32) -> Slot<V> {
        if let Some(slot) = self.slots.read().get(&year) {
            return Arc::clone(slot);
        }
        let mut slots = self.slots.write();
        if !slots.contains_key(&year) && slots.len() >= self.capacity {
            debug!(cache = self.name, years = slots.len(), "capacity reached, dropping cached years");
            slots.clear();
        }
        Arc::clone(slots.entry(year).or_default())
    }

    /// Cached value for `year`, computing it with `compute` on first use.
    pub fn get_or_try_insert_with<F>(&self, year: i32, compute: F) -> Result<V, CalendarError>
    where
        F: FnOnce() -> Result<V, CalendarError>,
    {
        let slot = self.slot(year);
        let mut value = slot.lock();
        if let Some(v) = value.as_ref() {
            trace!(cache = self.name, year, "hit");
            return Ok(v.clone());
        }
        debug!(cache = self.name, year, "computing");
        let v = compute()?;
        *value = Some(v.clone());
        Ok(v)
    }

    /// Number of years with a computed value.
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .values()
            .filter(|slot| slot.lock().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.slots.write().clear();
    }
}

impl<V> std::fmt::Debug for YearCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YearCache")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("years", &self.slots.read().len())
            .finish()
    }
}

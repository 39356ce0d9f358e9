//! Fixed-capacity table
//!
//! The table never resizes. Every operation visits at most
//! `min(probe_budget, capacity)` slots and reports failure instead of scanning
//! further, so a clustered or over-full table degrades into rejected inserts
//! and missed lookups rather than unbounded probe chains.

use std::fmt;
use std::mem;

use super::hash::bucket_index;
use super::slot::{Slot, SlotState};
use super::{is_reserved, Key, Upsert, TOMBSTONE};
use crate::config::{self, Config, DEFAULT_PROBE_BUDGET};
use crate::error::{FlatError, Result};

/// Result of walking a probe chain for one key
enum Probe {
    /// Slot index holding the live key
    Found(usize),

    /// Key is absent; slot index where it would be inserted
    Vacant(usize),

    /// Key is absent and no reusable slot lies within the budget
    Exhausted,
}

/// Open-addressing table with linear probing and a hard probe budget
///
/// ## Invariants
/// - `slots.len()` is a non-zero power of two and `mask == slots.len() - 1`
/// - every live key sits within `probe_limit` slots of its home bucket
/// - `len` counts `Occupied` slots, `tombstones` counts `Tombstone` slots
pub struct BoundedTable<V> {
    /// Backing array, owned for the table's whole lifetime
    slots: Box<[Slot<V>]>,

    /// `capacity - 1`, applied instead of a modulo
    mask: usize,

    /// Configured per-operation ceiling on slot visits
    probe_budget: usize,

    /// Effective ceiling: a chain longer than the array revisits slots
    probe_limit: usize,

    /// Live entries
    len: usize,

    /// Deleted slots not yet reused
    tombstones: usize,
}

impl<V: Default> BoundedTable<V> {
    /// Create a table with `capacity` slots and the default probe budget
    ///
    /// Fails unless `capacity` is a non-zero power of two.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_probe_budget(capacity, DEFAULT_PROBE_BUDGET)
    }

    /// Create a table from a validated config
    pub fn with_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::with_probe_budget(config.capacity, config.probe_budget)
    }

    /// Create a table with an explicit probe budget
    pub fn with_probe_budget(capacity: usize, probe_budget: usize) -> Result<Self> {
        if !config::is_valid_capacity(capacity) {
            return Err(FlatError::InvalidCapacity(capacity));
        }
        if probe_budget == 0 {
            return Err(FlatError::Config("probe budget must be positive".into()));
        }

        let slots: Box<[Slot<V>]> = (0..capacity).map(|_| Slot::empty()).collect();

        tracing::debug!(capacity, probe_budget, "created bounded table");

        Ok(Self {
            slots,
            mask: capacity - 1,
            probe_budget,
            probe_limit: probe_budget.min(capacity),
            len: 0,
            tombstones: 0,
        })
    }

    /// Insert or overwrite `key`
    ///
    /// The first tombstone or empty slot on the chain becomes the insertion
    /// point, but the walk continues past tombstones until an empty slot so a
    /// live copy of `key` further down is updated instead of duplicated.
    pub fn upsert(&mut self, key: Key, value: V) -> Result<Upsert<V>> {
        if is_reserved(key) {
            return Err(FlatError::ReservedKey(key));
        }

        match self.probe(key) {
            Probe::Found(idx) => {
                let previous = mem::replace(&mut self.slots[idx].value, value);
                Ok(Upsert::Updated(previous))
            }
            Probe::Vacant(idx) => {
                if self.slots[idx].key == TOMBSTONE {
                    self.tombstones -= 1;
                }
                let slot = &mut self.slots[idx];
                slot.key = key;
                slot.value = value;
                self.len += 1;
                Ok(Upsert::Inserted)
            }
            Probe::Exhausted => {
                tracing::trace!(key, probe_limit = self.probe_limit, "probe budget exhausted on upsert");
                Ok(Upsert::Rejected(value))
            }
        }
    }

    /// Remove `key`, leaving a tombstone, and return its value
    ///
    /// Sentinel keys are never stored, so they are reported as absent.
    pub fn erase(&mut self, key: Key) -> Option<V> {
        if is_reserved(key) {
            return None;
        }

        match self.probe(key) {
            Probe::Found(idx) => {
                let slot = &mut self.slots[idx];
                slot.key = TOMBSTONE;
                let value = mem::take(&mut slot.value);
                self.len -= 1;
                self.tombstones += 1;
                Some(value)
            }
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    /// Reset every slot to empty, dropping live entries and tombstones
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::empty();
        }
        self.len = 0;
        self.tombstones = 0;
    }
}

impl<V> BoundedTable<V> {
    /// Look up the value stored for `key`
    pub fn find(&self, key: Key) -> Option<&V> {
        self.locate(key).map(|idx| &self.slots[idx].value)
    }

    /// Mutable lookup; the key itself cannot be changed through it
    pub fn find_mut(&mut self, key: Key) -> Option<&mut V> {
        match self.locate(key) {
            Some(idx) => Some(&mut self.slots[idx].value),
            None => None,
        }
    }

    pub fn contains_key(&self, key: Key) -> bool {
        self.locate(key).is_some()
    }

    /// Slot index currently holding `key`, if it is live
    pub fn locate(&self, key: Key) -> Option<usize> {
        if is_reserved(key) {
            return None;
        }
        match self.probe(key) {
            Probe::Found(idx) => Some(idx),
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    /// State of the slot at `index`, or `None` past the end
    pub fn slot_state(&self, index: usize) -> Option<SlotState> {
        self.slots.get(index).map(Slot::state)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Live-entry count
    pub fn len(&self) -> usize {
        self.len
    }

    /// Live-entry count (alias of [`len`](Self::len))
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn probe_budget(&self) -> usize {
        self.probe_budget
    }

    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Live entries divided by capacity
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Live entries in slot order, for rebuilding into another table
    pub(crate) fn live(&self) -> impl Iterator<Item = (Key, &V)> + '_ {
        self.slots
            .iter()
            .filter(|slot| slot.state() == SlotState::Occupied)
            .map(|slot| (slot.key, &slot.value))
    }

    /// Walk the chain for `key`, visiting at most `probe_limit` slots
    fn probe(&self, key: Key) -> Probe {
        let mut idx = bucket_index(key, self.mask);
        let mut reusable = None;

        for _ in 0..self.probe_limit {
            let slot = &self.slots[idx];
            match slot.state() {
                SlotState::Empty => return Probe::Vacant(reusable.unwrap_or(idx)),
                SlotState::Tombstone => {
                    reusable.get_or_insert(idx);
                }
                SlotState::Occupied if slot.key == key => return Probe::Found(idx),
                SlotState::Occupied => {}
            }
            idx = (idx + 1) & self.mask;
        }

        // Inserts only ever land inside the window, so a key absent from it
        // is absent from the table and a tombstone seen here is safe to reuse
        match reusable {
            Some(idx) => Probe::Vacant(idx),
            None => Probe::Exhausted,
        }
    }
}

impl<V> fmt::Debug for BoundedTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedTable")
            .field("capacity", &self.capacity())
            .field("len", &self.len)
            .field("tombstones", &self.tombstones)
            .field("probe_budget", &self.probe_budget)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tombstone_counter_follows_reuse() {
        let mut table = BoundedTable::<u32>::new(8).unwrap();
        assert!(table.upsert(10, 1).unwrap().is_inserted());
        assert_eq!(table.erase(10), Some(1));
        assert_eq!(table.tombstones(), 1);
        assert_eq!(table.slot_state(1), Some(SlotState::Tombstone));

        // 18 shares bucket 1 with 10, so it reclaims the tombstone
        assert!(table.upsert(18, 2).unwrap().is_inserted());
        assert_eq!(table.tombstones(), 0);
        assert_eq!(table.locate(18), Some(1));
    }

    #[test]
    fn test_upsert_past_tombstone_updates_in_place() {
        let mut table = BoundedTable::<u32>::new(8).unwrap();
        table.upsert(10, 1).unwrap();
        table.upsert(18, 2).unwrap();
        assert_eq!(table.locate(18), Some(2));

        table.erase(10);
        assert_eq!(table.upsert(18, 3).unwrap(), Upsert::Updated(2));
        assert_eq!(table.len(), 1);
        assert_eq!(table.locate(18), Some(2));
        assert_eq!(table.find(18), Some(&3));
    }

    #[test]
    fn test_probe_limit_capped_by_capacity() {
        let table = BoundedTable::<u32>::with_probe_budget(4, 128).unwrap();
        assert_eq!(table.probe_limit, 4);
        assert_eq!(table.probe_budget(), 128);
    }

    #[test]
    fn test_full_table_of_tombstones_terminates() {
        let mut table = BoundedTable::<u32>::new(4).unwrap();
        let mut key = 2;
        while table.len() < 4 {
            let _ = table.upsert(key, 0).unwrap();
            key += 1;
        }
        for k in 2..key {
            table.erase(k);
        }
        assert_eq!(table.tombstones(), 4);
        assert_eq!(table.find(1_000), None);
        assert!(table.upsert(1_000, 7).unwrap().is_inserted());
    }

    #[test]
    fn test_clear_restores_empty_slots() {
        let mut table = BoundedTable::<u32>::new(8).unwrap();
        table.upsert(2, 1).unwrap();
        table.upsert(10, 1).unwrap();
        table.erase(2);
        table.clear();

        assert!(table.is_empty());
        assert_eq!(table.tombstones(), 0);
        assert!((0..8).all(|i| table.slot_state(i) == Some(SlotState::Empty)));
    }

    #[test]
    fn test_live_skips_dead_slots() {
        let mut table = BoundedTable::<u32>::new(16).unwrap();
        for k in 2..8 {
            table.upsert(k, k as u32).unwrap();
        }
        table.erase(3);
        table.erase(5);

        let mut live: Vec<_> = table.live().map(|(k, v)| (k, *v)).collect();
        live.sort();
        assert_eq!(live, vec![(2, 2), (4, 4), (6, 6), (7, 7)]);
    }
}

//! Growable table
//!
//! Wraps a [`BoundedTable`] and rebuilds it whenever occupancy crosses the
//! configured load factor or an insert is rejected. The probing core is never
//! touched; growth is a fresh bounded table with every live entry re-inserted.

use super::{is_reserved, BoundedTable, Key, Upsert};
use crate::config::Config;
use crate::error::{FlatError, Result};

/// Resizing wrapper around a bounded table
#[derive(Debug)]
pub struct GrowableTable<V> {
    /// Current bounded table (replaced wholesale on rebuild)
    inner: BoundedTable<V>,

    /// Occupancy threshold that triggers a rebuild
    max_load_factor: f64,

    /// Number of completed rebuilds
    rebuilds: usize,
}

impl<V: Default + Clone> GrowableTable<V> {
    /// Create a growable table starting at `capacity` slots
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(&Config::builder().capacity(capacity).build())
    }

    /// Create a growable table from a validated config
    pub fn with_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: BoundedTable::with_config(config)?,
            max_load_factor: config.max_load_factor,
            rebuilds: 0,
        })
    }

    /// Insert or overwrite `key`, growing as needed
    ///
    /// Never returns [`Upsert::Rejected`]: a rejected insert forces a rebuild
    /// at double capacity and is retried. Any rebuild happens before the key
    /// is written, so an error leaves the table exactly as it was.
    pub fn upsert(&mut self, key: Key, value: V) -> Result<Upsert<V>> {
        if is_reserved(key) {
            return Err(FlatError::ReservedKey(key));
        }

        if !self.inner.contains_key(key) {
            while self.over_threshold_with(1) {
                self.relieve_pressure()?;
            }
        }

        let mut value = value;
        loop {
            match self.inner.upsert(key, value)? {
                Upsert::Rejected(returned) => {
                    value = returned;
                    let capacity = grown(self.inner.capacity())?;
                    self.rebuild(capacity)?;
                }
                outcome => return Ok(outcome),
            }
        }
    }

    /// Remove `key`; the slot becomes a tombstone until the next rebuild
    pub fn erase(&mut self, key: Key) -> Option<V> {
        self.inner.erase(key)
    }

    /// Occupancy (live + tombstones + `extra`) above the configured threshold
    fn over_threshold_with(&self, extra: usize) -> bool {
        let occupied = self.inner.len() + self.inner.tombstones() + extra;
        occupied as f64 > self.max_load_factor * self.inner.capacity() as f64
    }

    /// Rebuild in place when tombstones cause the pressure, otherwise double
    fn relieve_pressure(&mut self) -> Result<()> {
        let capacity = self.inner.capacity();
        let live_ceiling = self.max_load_factor * capacity as f64 / 2.0;

        let target = if ((self.inner.len() + 1) as f64) <= live_ceiling {
            capacity
        } else {
            grown(capacity)?
        };
        self.rebuild(target)
    }

    /// Replace the inner table with one of at least `capacity` slots
    ///
    /// The old table stays in place until a replacement holds every live
    /// entry, so a failed rebuild loses nothing.
    fn rebuild(&mut self, capacity: usize) -> Result<()> {
        let mut capacity = capacity;
        loop {
            if let Some(table) = self.rebuilt_at(capacity)? {
                tracing::debug!(
                    from = self.inner.capacity(),
                    to = capacity,
                    live = table.len(),
                    purged_tombstones = self.inner.tombstones(),
                    "rebuilt growable table"
                );
                self.inner = table;
                self.rebuilds += 1;
                return Ok(());
            }
            capacity = grown(capacity)?;
        }
    }

    /// Copy of the live entries at `capacity`, or `None` if one is rejected
    fn rebuilt_at(&self, capacity: usize) -> Result<Option<BoundedTable<V>>> {
        let mut fresh = BoundedTable::with_probe_budget(capacity, self.inner.probe_budget())?;
        for (key, value) in self.inner.live() {
            if fresh.upsert(key, value.clone())?.is_rejected() {
                return Ok(None);
            }
        }
        Ok(Some(fresh))
    }
}

impl<V> GrowableTable<V> {
    pub fn find(&self, key: Key) -> Option<&V> {
        self.inner.find(key)
    }

    pub fn find_mut(&mut self, key: Key) -> Option<&mut V> {
        self.inner.find_mut(key)
    }

    pub fn contains_key(&self, key: Key) -> bool {
        self.inner.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub fn tombstones(&self) -> usize {
        self.inner.tombstones()
    }

    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    /// Borrow the current bounded table
    pub fn as_bounded(&self) -> &BoundedTable<V> {
        &self.inner
    }
}

fn grown(capacity: usize) -> Result<usize> {
    capacity
        .checked_mul(2)
        .ok_or(FlatError::CapacityOverflow(capacity))
}

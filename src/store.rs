//! Keyed store seam
//!
//! A uniform upsert/find/erase surface over the flat tables and the standard
//! library map, so the benchmark driver can run one workload against each.

use std::collections::HashMap;

use crate::config::{capacity_for, Config};
use crate::error::Result;
use crate::order::Order;
use crate::table::{BoundedTable, GrowableTable, Key};

/// Headroom given to the standard map when pre-sizing
pub const STD_HEADROOM: f64 = 1.6;

/// Headroom given to the flat tables when sizing
pub const FLAT_HEADROOM: f64 = 1.25;

/// Store of orders keyed by identifier
pub trait KeyedStore: Sized {
    /// Short label used in reports
    const NAME: &'static str;

    /// Create a store sized for `expected` live orders
    ///
    /// `probe_budget` applies to open-addressing stores; others ignore it.
    fn with_expected(expected: usize, probe_budget: usize) -> Result<Self>;

    /// Insert or overwrite; `false` when the store refused the order
    fn store(&mut self, key: Key, order: Order) -> Result<bool>;

    fn lookup(&self, key: Key) -> Option<&Order>;

    /// `true` when a live order was removed
    fn remove(&mut self, key: Key) -> bool;

    /// Number of live orders
    fn live(&self) -> usize;
}

impl KeyedStore for HashMap<Key, Order> {
    const NAME: &'static str = "std::collections::HashMap";

    fn with_expected(expected: usize, _probe_budget: usize) -> Result<Self> {
        Ok(HashMap::with_capacity(capacity_for(expected, STD_HEADROOM)?))
    }

    fn store(&mut self, key: Key, order: Order) -> Result<bool> {
        self.insert(key, order);
        Ok(true)
    }

    fn lookup(&self, key: Key) -> Option<&Order> {
        self.get(&key)
    }

    fn remove(&mut self, key: Key) -> bool {
        HashMap::remove(self, &key).is_some()
    }

    fn live(&self) -> usize {
        self.len()
    }
}

impl KeyedStore for BoundedTable<Order> {
    const NAME: &'static str = "BoundedTable";

    fn with_expected(expected: usize, probe_budget: usize) -> Result<Self> {
        BoundedTable::with_config(&flat_config(expected, probe_budget)?)
    }

    fn store(&mut self, key: Key, order: Order) -> Result<bool> {
        Ok(self.upsert(key, order)?.is_stored())
    }

    fn lookup(&self, key: Key) -> Option<&Order> {
        self.find(key)
    }

    fn remove(&mut self, key: Key) -> bool {
        self.erase(key).is_some()
    }

    fn live(&self) -> usize {
        self.len()
    }
}

impl KeyedStore for GrowableTable<Order> {
    const NAME: &'static str = "GrowableTable";

    fn with_expected(expected: usize, probe_budget: usize) -> Result<Self> {
        GrowableTable::with_config(&flat_config(expected, probe_budget)?)
    }

    fn store(&mut self, key: Key, order: Order) -> Result<bool> {
        Ok(self.upsert(key, order)?.is_stored())
    }

    fn lookup(&self, key: Key) -> Option<&Order> {
        self.find(key)
    }

    fn remove(&mut self, key: Key) -> bool {
        self.erase(key).is_some()
    }

    fn live(&self) -> usize {
        self.len()
    }
}

fn flat_config(expected: usize, probe_budget: usize) -> Result<Config> {
    let mut config = Config::for_expected_entries(expected, FLAT_HEADROOM)?;
    config.probe_budget = probe_budget;
    Ok(config)
}

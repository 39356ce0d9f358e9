//! GrowableTable Tests
//!
//! Tests verify:
//! - Growth on load-factor pressure
//! - Growth on probe-budget rejection
//! - Tombstone purging without growth
//! - Entries survive every rebuild

use flatkv::table::hash;
use flatkv::{Config, FlatError, GrowableTable, Key, Upsert};

// =============================================================================
// Helper Functions
// =============================================================================

fn keys_in_bucket(bucket: usize, capacity: usize, count: usize) -> Vec<Key> {
    (2..)
        .filter(|&k| hash::bucket_index(k, capacity - 1) == bucket)
        .take(count)
        .collect()
}

// =============================================================================
// Growth Tests
// =============================================================================

#[test]
fn test_grows_past_initial_capacity() {
    let mut table = GrowableTable::<u64>::new(8).unwrap();

    for k in 2..1_002 {
        assert_eq!(table.upsert(k, k * 10).unwrap(), Upsert::Inserted);
    }

    assert_eq!(table.len(), 1_000);
    assert!(table.capacity() >= 1_024);
    assert!(table.capacity().is_power_of_two());
    assert!(table.rebuilds() > 0);
    for k in 2..1_002 {
        assert_eq!(table.find(k), Some(&(k * 10)));
    }
}

#[test]
fn test_load_factor_stays_under_threshold() {
    let config = Config::builder().capacity(16).max_load_factor(0.5).build();
    let mut table = GrowableTable::<u64>::with_config(&config).unwrap();

    for k in 2..500 {
        let _ = table.upsert(k, k).unwrap();
        assert!(table.as_bounded().load_factor() <= 0.5);
    }
}

#[test]
fn test_rejection_forces_growth() {
    let capacity = 256;
    let config = Config::builder()
        .capacity(capacity)
        .probe_budget(4)
        .max_load_factor(1.0)
        .build();
    let mut table = GrowableTable::<u64>::with_config(&config).unwrap();

    // Five keys sharing one home bucket overflow a budget of four
    for k in keys_in_bucket(0, capacity, 5) {
        assert!(table.upsert(k, k).unwrap().is_inserted());
    }

    assert!(table.capacity() > capacity);
    assert_eq!(table.len(), 5);
    for k in keys_in_bucket(0, capacity, 5) {
        assert_eq!(table.find(k), Some(&k));
    }
}

#[test]
fn test_updates_do_not_grow() {
    let mut table = GrowableTable::<u64>::new(16).unwrap();
    for k in 2..10 {
        let _ = table.upsert(k, 0).unwrap();
    }
    let capacity = table.capacity();
    let rebuilds = table.rebuilds();

    for round in 1..50 {
        for k in 2..10 {
            assert_eq!(table.upsert(k, round - 1).unwrap(), Upsert::Updated(round - 1));
            let _ = table.find_mut(k).map(|v| *v = round);
        }
    }

    assert_eq!(table.capacity(), capacity);
    assert_eq!(table.rebuilds(), rebuilds);
    assert_eq!(table.len(), 8);
}

// =============================================================================
// Tombstone Tests
// =============================================================================

#[test]
fn test_churn_purges_tombstones_in_place() {
    let mut table = GrowableTable::<u64>::new(64).unwrap();

    // Few live entries, many deletes: pressure comes from tombstones only
    for k in 2..20_002u64 {
        assert!(table.upsert(k, k).unwrap().is_inserted());
        if k >= 6 {
            assert_eq!(table.erase(k - 4), Some(k - 4));
        }
    }

    assert_eq!(table.len(), 4);
    assert_eq!(table.capacity(), 64);
    assert!(table.rebuilds() > 0);
    assert!(table.tombstones() < 64);
    for k in 19_998..20_002 {
        assert!(table.contains_key(k));
    }
}

#[test]
fn test_erase_and_reserved_keys() {
    let mut table = GrowableTable::<u64>::new(8).unwrap();
    assert_eq!(table.upsert(1, 5), Err(FlatError::ReservedKey(1)));
    assert!(table.is_empty());

    let _ = table.upsert(7, 70).unwrap();
    assert_eq!(table.erase(7), Some(70));
    assert_eq!(table.erase(7), None);
    assert_eq!(table.find(7), None);
}

#[test]
fn test_invalid_config_rejected() {
    let config = Config::builder().capacity(10).build();
    assert_eq!(
        GrowableTable::<u64>::with_config(&config).unwrap_err(),
        FlatError::InvalidCapacity(10)
    );
}

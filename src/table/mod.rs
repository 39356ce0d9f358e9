//! Table Module
//!
//! Open-addressing key/value tables over a power-of-two slot array.
//!
//! ## Responsibilities
//! - Bucket addressing via a SplitMix64 finalizer and index masking
//! - Linear probing bounded by a fixed probe budget
//! - Tombstone deletion with opportunistic slot reuse
//! - Growth by composition (`GrowableTable` rebuilds a `BoundedTable`)
//!
//! ## Slot Layout
//! ```text
//! ┌──────────────┬──────────────────────┐
//! │ key (u64)    │ value (V)            │
//! └──────────────┴──────────────────────┘
//!   0 => EMPTY      terminates a probe chain
//!   1 => TOMBSTONE  skipped, reusable by insert
//!   k >= 2          OCCUPIED
//! ```

pub mod hash;
mod slot;
mod bounded;
mod growable;

pub use bounded::BoundedTable;
pub use growable::GrowableTable;
pub use slot::SlotState;

/// Caller-facing key type
pub type Key = u64;

/// Sentinel key of a never-used slot
pub const EMPTY: Key = 0;

/// Sentinel key of a deleted slot
pub const TOMBSTONE: Key = 1;

/// Smallest key callers may store
pub const MIN_KEY: Key = 2;

/// True for the two keys reserved as slot sentinels
#[inline]
pub fn is_reserved(key: Key) -> bool {
    key < MIN_KEY
}

/// Outcome of an upsert
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Upsert<V> {
    /// The key was absent and now occupies a slot
    Inserted,

    /// The key was live; holds the value it had before
    Updated(V),

    /// The probe budget ran out; holds the value that was not stored
    Rejected(V),
}

impl<V> Upsert<V> {
    pub fn is_inserted(&self) -> bool {
        matches!(self, Upsert::Inserted)
    }

    pub fn is_updated(&self) -> bool {
        matches!(self, Upsert::Updated(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Upsert::Rejected(_))
    }

    /// True when the value now lives in the table
    pub fn is_stored(&self) -> bool {
        !self.is_rejected()
    }
}

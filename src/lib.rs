//! # flatkv
//!
//! A fixed-capacity, open-addressing key/value table for order-book style
//! records:
//! - Power-of-two slot array addressed by a SplitMix64 finalizer
//! - Linear probing with tombstones for deletion
//! - A hard probe budget that bounds every operation
//! - A growable wrapper built by composition on top of the bounded core
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Benchmark Driver (bench)                    │
//! │          key population, timing, percentile report           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ KeyedStore
//!          ┌────────────┴────────────┬──────────────────┐
//!          │                         │                  │
//!          ▼                         ▼                  ▼
//!   ┌─────────────┐          ┌──────────────┐    ┌─────────────┐
//!   │BoundedTable │◄─────────│GrowableTable │    │  HashMap    │
//!   │ (fixed cap) │ rebuilds │  (wrapper)   │    │ (baseline)  │
//!   └─────────────┘          └──────────────┘    └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod table;
pub mod order;
pub mod store;
pub mod bench;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FlatError, Result};
pub use config::Config;
pub use order::{Order, Side};
pub use table::{BoundedTable, GrowableTable, Key, Upsert};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of flatkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

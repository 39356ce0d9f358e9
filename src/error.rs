//! Error types for flatkv
//!
//! Probe-budget exhaustion is not an error: it is reported through
//! [`Upsert::Rejected`](crate::table::Upsert) or a `None` lookup.

use thiserror::Error;

/// Result type alias using FlatError
pub type Result<T> = std::result::Result<T, FlatError>;

/// Unified error type for flatkv operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlatError {
    // -------------------------------------------------------------------------
    // Construction Errors
    // -------------------------------------------------------------------------
    #[error("Invalid capacity: {0} is not a non-zero power of two")]
    InvalidCapacity(usize),

    #[error("Capacity overflow: cannot grow past {0} slots")]
    CapacityOverflow(usize),

    // -------------------------------------------------------------------------
    // Key Errors
    // -------------------------------------------------------------------------
    #[error("Reserved key: {0} is a slot sentinel")]
    ReservedKey(u64),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

//! Configuration for flatkv
//!
//! Centralized table configuration with sensible defaults.

use crate::error::{FlatError, Result};

/// Probe budget used when none is configured
pub const DEFAULT_PROBE_BUDGET: usize = 128;

/// Main configuration for a table instance
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Layout Configuration
    // -------------------------------------------------------------------------
    /// Number of slots. Must be a non-zero power of two so the bucket index
    /// can be masked instead of reduced modulo capacity.
    pub capacity: usize,

    // -------------------------------------------------------------------------
    // Probe Configuration
    // -------------------------------------------------------------------------
    /// Maximum number of slots a single operation may visit
    pub probe_budget: usize,

    // -------------------------------------------------------------------------
    // Growth Configuration (GrowableTable only)
    // -------------------------------------------------------------------------
    /// Occupancy (live + tombstones) / capacity above which a rebuild happens
    pub max_load_factor: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1024,
            probe_budget: DEFAULT_PROBE_BUDGET,
            max_load_factor: 0.75,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Config sized for `expected` live entries with `headroom` spare room,
    /// rounded up to the next power of two
    pub fn for_expected_entries(expected: usize, headroom: f64) -> Result<Self> {
        let capacity = capacity_for(expected, headroom)?;
        Ok(Self::builder().capacity(capacity).build())
    }

    /// Check every field, returning the first violation
    pub fn validate(&self) -> Result<()> {
        if !is_valid_capacity(self.capacity) {
            return Err(FlatError::InvalidCapacity(self.capacity));
        }

        if self.probe_budget == 0 {
            return Err(FlatError::Config("probe budget must be positive".into()));
        }

        if !(self.max_load_factor > 0.0 && self.max_load_factor <= 1.0) {
            return Err(FlatError::Config(format!(
                "max load factor must be in (0, 1], got {}",
                self.max_load_factor
            )));
        }

        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the slot count (must be a power of two)
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Set the per-operation probe budget
    pub fn probe_budget(mut self, budget: usize) -> Self {
        self.config.probe_budget = budget;
        self
    }

    /// Set the rebuild threshold used by the growable wrapper
    pub fn max_load_factor(mut self, factor: f64) -> Self {
        self.config.max_load_factor = factor;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

// =============================================================================
// Capacity Helpers
// =============================================================================

/// True when `capacity` is a non-zero power of two
pub fn is_valid_capacity(capacity: usize) -> bool {
    capacity.is_power_of_two()
}

/// Smallest power of two holding `expected * headroom` slots
pub fn capacity_for(expected: usize, headroom: f64) -> Result<usize> {
    if expected == 0 {
        return Err(FlatError::Config("expected entries must be positive".into()));
    }
    if !(headroom >= 1.0 && headroom.is_finite()) {
        return Err(FlatError::Config(format!(
            "headroom must be a finite factor >= 1, got {headroom}"
        )));
    }

    let wanted = (expected as f64 * headroom).ceil();
    if wanted > usize::MAX as f64 {
        return Err(FlatError::CapacityOverflow(expected));
    }

    (wanted as usize)
        .max(1)
        .checked_next_power_of_two()
        .ok_or(FlatError::CapacityOverflow(wanted as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_capacity_for_rounds_up() {
        assert_eq!(capacity_for(200_000, 1.25).unwrap(), 262_144);
        assert_eq!(capacity_for(200_000, 1.6).unwrap(), 524_288);
        assert_eq!(capacity_for(1, 1.0).unwrap(), 1);
        assert_eq!(capacity_for(8, 1.0).unwrap(), 8);
    }

    #[test]
    fn test_capacity_for_rejects_bad_input() {
        assert!(matches!(capacity_for(0, 1.25), Err(FlatError::Config(_))));
        assert!(matches!(capacity_for(10, 0.5), Err(FlatError::Config(_))));
        assert!(matches!(capacity_for(10, f64::NAN), Err(FlatError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_each_field() {
        let bad_capacity = Config::builder().capacity(12).build();
        assert_eq!(bad_capacity.validate(), Err(FlatError::InvalidCapacity(12)));

        let zero_capacity = Config::builder().capacity(0).build();
        assert_eq!(zero_capacity.validate(), Err(FlatError::InvalidCapacity(0)));

        let no_budget = Config::builder().probe_budget(0).build();
        assert!(matches!(no_budget.validate(), Err(FlatError::Config(_))));

        let bad_load = Config::builder().max_load_factor(1.5).build();
        assert!(matches!(bad_load.validate(), Err(FlatError::Config(_))));
    }
}

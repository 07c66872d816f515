//! Ledger configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a parking ledger.
///
/// Passed explicitly at construction so tests can run with small capacities
/// and synthetic rates; nothing here is a compile-time constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Number of parking spaces, ids 1 through `capacity`.
    pub capacity: usize,
    /// Flat rate billed per hour, prorated by fractional hours.
    pub hourly_rate: f64,
    /// Maximum accepted length of a vehicle number, in characters.
    pub vehicle_number_max_len: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            capacity: 50,
            hourly_rate: 100.0,
            vehicle_number_max_len: 19,
        }
    }
}

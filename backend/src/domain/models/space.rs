//! Domain model for a parking space.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single fixed-identity parking slot.
///
/// The `space_id` is assigned once when the ledger initializes and never
/// changes. Everything else describes the current or most recent occupancy
/// session: while a vehicle is parked, `entry_time` is set and `exit_time`
/// is `None`; after checkout, both timestamps and the computed fee remain
/// on the record until the space is reused or force-cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingSpace {
    pub space_id: u32,
    /// Registration number of the current or last-known occupant.
    /// Empty when the space has never been used or was cleared.
    pub vehicle_number: String,
    pub entry_time: Option<DateTime<Utc>>,
    pub exit_time: Option<DateTime<Utc>>,
    /// Fee billed for the most recent completed session. Zero while
    /// occupied or unused; derived from the session duration on checkout.
    pub parking_fee: f64,
    pub is_occupied: bool,
}

impl ParkingSpace {
    /// Create a blank vacant space with the given identity.
    pub fn vacant(space_id: u32) -> Self {
        Self {
            space_id,
            vehicle_number: String::new(),
            entry_time: None,
            exit_time: None,
            parking_fee: 0.0,
            is_occupied: false,
        }
    }

    /// Reset this space to its blank vacant state, keeping its identity.
    pub fn clear(&mut self) {
        let space_id = self.space_id;
        *self = Self::vacant(space_id);
    }

    /// Whether this space holds anything worth showing: an active session
    /// or a completed one whose record has not been overwritten.
    pub fn has_history(&self) -> bool {
        self.is_occupied || self.exit_time.is_some()
    }
}

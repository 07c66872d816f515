//! # Storage Traits
//!
//! This module defines the storage abstraction that allows different
//! persistence backends to be used interchangeably by the domain layer.
//!
//! The ledger persists as a whole-state snapshot: every save rewrites the
//! complete set of space records, and a load either returns the full state
//! or nothing. There is no incremental log.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::space::ParkingSpace;

/// Current snapshot schema version. Bump when the record layout changes;
/// loaders treat snapshots with any other version as absent.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A full serialized copy of all space records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub spaces: Vec<ParkingSpace>,
}

impl LedgerSnapshot {
    /// Build a current-version snapshot of the given spaces.
    pub fn new(spaces: Vec<ParkingSpace>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            spaces,
        }
    }
}

/// Trait defining the interface for snapshot storage operations.
///
/// Implementations must treat an unreadable or corrupt store as absent
/// (`Ok(None)`) rather than failing the load; the ledger degrades to a
/// blank state in that case. Save failures are real errors and propagate.
pub trait SnapshotStorage: Send + Sync {
    /// Load the persisted snapshot, or `None` if no usable snapshot exists.
    fn load_snapshot(&self) -> Result<Option<LedgerSnapshot>>;

    /// Persist the full snapshot, replacing any previous one.
    fn save_snapshot(&self, snapshot: &LedgerSnapshot) -> Result<()>;
}

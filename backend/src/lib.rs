//! # Parking Tracker Backend
//!
//! Core library for the parking tracker. It owns the ledger of numbered
//! parking spaces and exposes the operations any front end needs:
//! - Check a vehicle in (entry)
//! - Check a vehicle out (exit + fee)
//! - Delete a record (forced administrative clear)
//! - List current and historical occupancy
//!
//! The backend is synchronous and desktop-oriented: every operation runs to
//! completion before the next begins, and mutations are written through to a
//! snapshot file before success is reported. Storage is abstracted behind the
//! `SnapshotStorage` trait so the ledger works the same whether it is backed
//! by the JSON snapshot repository or kept purely in memory.

use anyhow::Result;
use std::path::Path;

pub mod domain;
pub mod storage;

pub use domain::errors::LedgerError;
pub use domain::ledger_service::LedgerService;
pub use domain::models::config::LedgerConfig;
pub use storage::json::{JsonConnection, JsonSnapshotRepository};
pub use storage::memory::MemorySnapshotStore;

/// Main backend struct that wires storage to the ledger service.
pub struct Backend {
    pub ledger_service: LedgerService<JsonSnapshotRepository>,
}

impl Backend {
    /// Create a backend persisting to the given data directory.
    pub fn new<P: AsRef<Path>>(data_dir: P, config: LedgerConfig) -> Result<Self> {
        let connection = JsonConnection::new(data_dir)?;
        let repository = JsonSnapshotRepository::new(connection);
        Ok(Self {
            ledger_service: LedgerService::new(config, repository),
        })
    }

    /// Create a backend persisting to the default data directory
    /// (`~/Parking Tracker`).
    pub fn new_default(config: LedgerConfig) -> Result<Self> {
        let connection = JsonConnection::new_default()?;
        let repository = JsonSnapshotRepository::new(connection);
        Ok(Self {
            ledger_service: LedgerService::new(config, repository),
        })
    }
}

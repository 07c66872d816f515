//! # Storage Module
//!
//! Persistence for the parking ledger. The domain layer only sees the
//! `SnapshotStorage` trait; the concrete backends are a versioned JSON
//! snapshot file (state survives restarts) and an in-process store
//! (state lost at exit).

pub mod json;
pub mod memory;
pub mod traits;

pub use json::{JsonConnection, JsonSnapshotRepository};
pub use memory::MemorySnapshotStore;
pub use traits::{LedgerSnapshot, SnapshotStorage, SNAPSHOT_VERSION};

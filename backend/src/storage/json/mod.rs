//! # JSON Snapshot Storage
//!
//! File-based persistence for the parking ledger. The whole ledger is
//! serialized as a single versioned JSON document and rewritten on every
//! mutating operation; at startup it is read back in full.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "saved_at": "2024-03-01T10:30:00Z",
//!   "spaces": [
//!     { "space_id": 1, "vehicle_number": "KA01AB1234",
//!       "entry_time": "2024-03-01T09:00:00Z", "exit_time": null,
//!       "parking_fee": 0.0, "is_occupied": true }
//!   ]
//! }
//! ```
//!
//! Writes go to a temporary file first and are renamed into place, so a
//! crash mid-write leaves the previous snapshot intact. A missing, corrupt,
//! or wrong-version file loads as "absent" and the ledger starts blank.

pub mod connection;
pub mod snapshot_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::JsonConnection;
pub use snapshot_repository::JsonSnapshotRepository;

//! Ledger service domain logic for the parking tracker.
//!
//! This module contains the core business logic for the parking ledger:
//! assigning vehicles to spaces, billing completed sessions, clearing
//! records, and listing occupancy.
//!
//! ## Key Responsibilities
//!
//! - **Check-in**: Assign a vehicle to the lowest-numbered vacant space
//! - **Check-out**: Close the session and bill by fractional hours
//! - **Delete**: Force-clear a record without billing
//! - **Listing**: Snapshot current and historical occupancy
//! - **Persistence**: Write the full ledger through to storage on every
//!   mutation, before success is reported
//!
//! ## Business Rules
//!
//! - Vehicle numbers are validated before any scan (non-empty, bounded length)
//! - A vehicle already parked cannot check in a second time
//! - Matching is exact and case-sensitive
//! - A released record is kept for display until the space is reused

use chrono::Utc;
use log::{info, warn};
use std::sync::{Arc, Mutex};

use crate::domain::commands::ledger::{
    CheckInCommand, CheckInResult, CheckOutCommand, CheckOutResult, DeleteRecordCommand,
    DeleteRecordResult, ListRecordsResult,
};
use crate::domain::errors::LedgerError;
use crate::domain::fee::parking_fee;
use crate::domain::models::config::LedgerConfig;
use crate::domain::models::space::ParkingSpace;
use crate::storage::traits::{LedgerSnapshot, SnapshotStorage};

/// Service owning the parking ledger.
///
/// All operations serialize behind a single mutex; the service can be cloned
/// and shared across threads, with every clone seeing the same ledger.
pub struct LedgerService<S: SnapshotStorage> {
    spaces: Arc<Mutex<Vec<ParkingSpace>>>,
    config: LedgerConfig,
    storage: Arc<S>,
}

impl<S: SnapshotStorage> Clone for LedgerService<S> {
    fn clone(&self) -> Self {
        Self {
            spaces: Arc::clone(&self.spaces),
            config: self.config.clone(),
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: SnapshotStorage> LedgerService<S> {
    /// Create a ledger with `config.capacity` spaces.
    ///
    /// If the storage backend holds a usable snapshot it is restored in
    /// full; otherwise (no snapshot, unreadable store, or a snapshot that
    /// does not match the configured capacity) the ledger starts blank.
    pub fn new(config: LedgerConfig, storage: S) -> Self {
        let spaces = match storage.load_snapshot() {
            Ok(Some(snapshot)) if snapshot_matches(&snapshot, &config) => {
                info!(
                    "Restored {} parking spaces from snapshot saved at {}",
                    snapshot.spaces.len(),
                    snapshot.saved_at
                );
                snapshot.spaces
            }
            Ok(Some(snapshot)) => {
                warn!(
                    "Ignoring snapshot with {} spaces; ledger capacity is {}. Starting blank.",
                    snapshot.spaces.len(),
                    config.capacity
                );
                blank_spaces(config.capacity)
            }
            Ok(None) => blank_spaces(config.capacity),
            Err(e) => {
                warn!("Could not load parking snapshot: {:#}. Starting blank.", e);
                blank_spaces(config.capacity)
            }
        };

        Self {
            spaces: Arc::new(Mutex::new(spaces)),
            config,
            storage: Arc::new(storage),
        }
    }

    /// Check a vehicle in, assigning the lowest-numbered vacant space.
    pub fn check_in(&self, command: CheckInCommand) -> Result<CheckInResult, LedgerError> {
        let vehicle_number = self.validate_vehicle_number(&command.vehicle_number)?;
        let mut spaces = self.spaces.lock().unwrap();

        if let Some(parked) = spaces
            .iter()
            .find(|s| s.is_occupied && s.vehicle_number == vehicle_number)
        {
            return Err(LedgerError::AlreadyParked {
                vehicle_number,
                space_id: parked.space_id,
            });
        }

        let space = spaces
            .iter_mut()
            .find(|s| !s.is_occupied)
            .ok_or(LedgerError::LotFull)?;

        let entry_time = Utc::now();
        space.vehicle_number = vehicle_number;
        space.entry_time = Some(entry_time);
        space.exit_time = None;
        space.parking_fee = 0.0;
        space.is_occupied = true;
        let space_id = space.space_id;

        info!("Vehicle {} checked in to space {}", space.vehicle_number, space_id);
        self.persist(&spaces)?;

        Ok(CheckInResult { space_id, entry_time })
    }

    /// Check a vehicle out, billing the completed session.
    pub fn check_out(&self, command: CheckOutCommand) -> Result<CheckOutResult, LedgerError> {
        let vehicle_number = self.validate_vehicle_number(&command.vehicle_number)?;
        let mut spaces = self.spaces.lock().unwrap();

        let space = spaces
            .iter_mut()
            .find(|s| s.is_occupied && s.vehicle_number == vehicle_number)
            .ok_or_else(|| LedgerError::VehicleNotFound(vehicle_number.clone()))?;

        let exit_time = Utc::now();
        // Entry is always recorded while occupied; a record missing it
        // (hand-edited snapshot) bills zero rather than failing the exit.
        let entry_time = space.entry_time.unwrap_or(exit_time);
        let fee = parking_fee(entry_time, exit_time, self.config.hourly_rate);

        space.exit_time = Some(exit_time);
        space.parking_fee = fee;
        space.is_occupied = false;
        let space_id = space.space_id;

        info!(
            "Vehicle {} checked out of space {} (fee {:.2})",
            vehicle_number, space_id, fee
        );
        self.persist(&spaces)?;

        Ok(CheckOutResult {
            space_id,
            exit_time,
            parking_fee: fee,
        })
    }

    /// Force-clear the first record carrying the given vehicle number,
    /// occupied or not. No fee is computed.
    pub fn delete_record(
        &self,
        command: DeleteRecordCommand,
    ) -> Result<DeleteRecordResult, LedgerError> {
        let vehicle_number = self.validate_vehicle_number(&command.vehicle_number)?;
        let mut spaces = self.spaces.lock().unwrap();

        let space = spaces
            .iter_mut()
            .find(|s| s.vehicle_number == vehicle_number)
            .ok_or_else(|| LedgerError::VehicleNotFound(vehicle_number.clone()))?;

        let space_id = space.space_id;
        space.clear();

        info!("Cleared record for vehicle {} in space {}", vehicle_number, space_id);
        self.persist(&spaces)?;

        Ok(DeleteRecordResult { space_id })
    }

    /// List every space with an active session or retained history, by
    /// ascending space id. Never-used spaces are omitted. No side effects.
    pub fn list_records(&self) -> ListRecordsResult {
        let spaces = self.spaces.lock().unwrap();
        ListRecordsResult {
            records: spaces.iter().filter(|s| s.has_history()).cloned().collect(),
        }
    }

    /// Total number of spaces in the ledger.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Number of spaces currently free.
    pub fn vacant_count(&self) -> usize {
        let spaces = self.spaces.lock().unwrap();
        spaces.iter().filter(|s| !s.is_occupied).count()
    }

    fn validate_vehicle_number(&self, raw: &str) -> Result<String, LedgerError> {
        let vehicle_number = raw.trim();
        if vehicle_number.is_empty() {
            return Err(LedgerError::EmptyVehicleNumber);
        }
        let max = self.config.vehicle_number_max_len;
        if vehicle_number.chars().count() > max {
            return Err(LedgerError::VehicleNumberTooLong { max });
        }
        Ok(vehicle_number.to_string())
    }

    /// Write the full ledger through to storage. Called inside every
    /// mutating operation, before its result is returned; the in-memory
    /// state stands even if the save fails, so the caller can retry or
    /// continue memory-only.
    fn persist(&self, spaces: &[ParkingSpace]) -> Result<(), LedgerError> {
        let snapshot = LedgerSnapshot::new(spaces.to_vec());
        self.storage
            .save_snapshot(&snapshot)
            .map_err(LedgerError::Persistence)
    }

    /// Shift a parked vehicle's entry time into the past to simulate a
    /// long stay.
    #[cfg(test)]
    pub(crate) fn backdate_entry(&self, vehicle_number: &str, hours: i64) {
        let mut spaces = self.spaces.lock().unwrap();
        if let Some(space) = spaces
            .iter_mut()
            .find(|s| s.is_occupied && s.vehicle_number == vehicle_number)
        {
            space.entry_time = space.entry_time.map(|t| t - chrono::Duration::hours(hours));
        }
    }
}

fn blank_spaces(capacity: usize) -> Vec<ParkingSpace> {
    (1..=capacity as u32).map(ParkingSpace::vacant).collect()
}

/// A snapshot is only restored when it describes exactly the configured
/// spaces: same count, ids sequential from 1.
fn snapshot_matches(snapshot: &LedgerSnapshot, config: &LedgerConfig) -> bool {
    snapshot.spaces.len() == config.capacity
        && snapshot
            .spaces
            .iter()
            .enumerate()
            .all(|(i, s)| s.space_id == i as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::test_utils::TestEnvironment;
    use crate::storage::json::JsonSnapshotRepository;
    use crate::storage::memory::MemorySnapshotStore;

    fn test_config(capacity: usize) -> LedgerConfig {
        LedgerConfig {
            capacity,
            hourly_rate: 100.0,
            vehicle_number_max_len: 19,
        }
    }

    fn memory_service(capacity: usize) -> LedgerService<MemorySnapshotStore> {
        LedgerService::new(test_config(capacity), MemorySnapshotStore::new())
    }

    fn check_in<S: SnapshotStorage>(
        service: &LedgerService<S>,
        vehicle_number: &str,
    ) -> Result<CheckInResult, LedgerError> {
        service.check_in(CheckInCommand {
            vehicle_number: vehicle_number.to_string(),
        })
    }

    fn check_out<S: SnapshotStorage>(
        service: &LedgerService<S>,
        vehicle_number: &str,
    ) -> Result<CheckOutResult, LedgerError> {
        service.check_out(CheckOutCommand {
            vehicle_number: vehicle_number.to_string(),
        })
    }

    fn delete_record<S: SnapshotStorage>(
        service: &LedgerService<S>,
        vehicle_number: &str,
    ) -> Result<DeleteRecordResult, LedgerError> {
        service.delete_record(DeleteRecordCommand {
            vehicle_number: vehicle_number.to_string(),
        })
    }

    #[test]
    fn new_ledger_starts_empty() {
        let service = memory_service(5);

        assert_eq!(service.capacity(), 5);
        assert_eq!(service.vacant_count(), 5);
        assert!(service.list_records().records.is_empty());
    }

    #[test]
    fn check_in_takes_lowest_vacant_space() {
        let service = memory_service(3);

        let first = check_in(&service, "KA01AB1234").expect("First check-in should succeed");
        let second = check_in(&service, "MH12CD5678").expect("Second check-in should succeed");

        assert_eq!(first.space_id, 1);
        assert_eq!(second.space_id, 2);
        assert_eq!(service.vacant_count(), 1);
    }

    #[test]
    fn check_in_fails_when_lot_is_full() {
        let service = memory_service(2);
        check_in(&service, "AAA111").expect("First check-in should succeed");
        check_in(&service, "BBB222").expect("Second check-in should succeed");

        let err = check_in(&service, "CCC333").expect_err("Lot is full");
        assert!(matches!(err, LedgerError::LotFull));
    }

    #[test]
    fn check_in_rejects_blank_vehicle_numbers() {
        let service = memory_service(2);

        let err = check_in(&service, "").expect_err("Empty number should be rejected");
        assert!(matches!(err, LedgerError::EmptyVehicleNumber));

        let err = check_in(&service, "   ").expect_err("Whitespace number should be rejected");
        assert!(matches!(err, LedgerError::EmptyVehicleNumber));
    }

    #[test]
    fn check_in_rejects_overlong_vehicle_numbers() {
        let service = memory_service(2);

        let err = check_in(&service, "X".repeat(20).as_str())
            .expect_err("20-character number should be rejected");
        assert!(matches!(err, LedgerError::VehicleNumberTooLong { max: 19 }));
    }

    #[test]
    fn check_in_rejects_vehicle_already_parked() {
        let service = memory_service(3);
        check_in(&service, "KA01AB1234").expect("First check-in should succeed");

        let err = check_in(&service, "KA01AB1234").expect_err("Duplicate should be rejected");
        match err {
            LedgerError::AlreadyParked {
                vehicle_number,
                space_id,
            } => {
                assert_eq!(vehicle_number, "KA01AB1234");
                assert_eq!(space_id, 1);
            }
            other => panic!("Expected AlreadyParked, got {:?}", other),
        }
    }

    #[test]
    fn check_in_trims_surrounding_whitespace() {
        let service = memory_service(2);
        check_in(&service, "  KA01AB1234  ").expect("Check-in should succeed");

        let records = service.list_records().records;
        assert_eq!(records[0].vehicle_number, "KA01AB1234");
        check_out(&service, "KA01AB1234").expect("Trimmed number should match");
    }

    #[test]
    fn check_out_bills_by_fractional_hours() {
        let service = memory_service(2);
        check_in(&service, "KA01AB1234").expect("Check-in should succeed");
        service.backdate_entry("KA01AB1234", 2);

        let result = check_out(&service, "KA01AB1234").expect("Check-out should succeed");

        assert_eq!(result.space_id, 1);
        assert!((result.parking_fee - 200.0).abs() < 0.1);
        assert_eq!(service.vacant_count(), 2);

        // The stored fee is exactly what the stored timestamps produce.
        let records = service.list_records().records;
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert!(!record.is_occupied);
        let entry = record.entry_time.expect("Entry time should be retained");
        let exit = record.exit_time.expect("Exit time should be set");
        assert_eq!(record.parking_fee, parking_fee(entry, exit, 100.0));
    }

    #[test]
    fn check_out_unknown_vehicle_leaves_state_unchanged() {
        let service = memory_service(2);
        check_in(&service, "KA01AB1234").expect("Check-in should succeed");
        let before = service.list_records().records;

        let err = check_out(&service, "MH12CD5678").expect_err("Unknown vehicle");
        assert!(matches!(err, LedgerError::VehicleNotFound(_)));

        assert_eq!(service.list_records().records, before);
        assert_eq!(service.vacant_count(), 1);
    }

    #[test]
    fn check_out_is_case_sensitive() {
        let service = memory_service(2);
        check_in(&service, "abc123").expect("Check-in should succeed");

        let err = check_out(&service, "ABC123").expect_err("Case must match exactly");
        assert!(matches!(err, LedgerError::VehicleNotFound(_)));
    }

    #[test]
    fn released_space_is_reused_first() {
        let service = memory_service(2);
        check_in(&service, "AAA111").expect("Check-in should succeed");
        check_in(&service, "BBB222").expect("Check-in should succeed");
        check_out(&service, "AAA111").expect("Check-out should succeed");

        let result = check_in(&service, "CCC333").expect("Check-in should succeed");
        assert_eq!(result.space_id, 1);
    }

    #[test]
    fn delete_clears_an_occupied_record_without_billing() {
        let service = memory_service(2);
        check_in(&service, "KA01AB1234").expect("Check-in should succeed");

        let result = delete_record(&service, "KA01AB1234").expect("Delete should succeed");
        assert_eq!(result.space_id, 1);
        assert_eq!(service.vacant_count(), 2);
        assert!(service.list_records().records.is_empty());

        // The session is gone entirely; checking out now finds nothing.
        let err = check_out(&service, "KA01AB1234").expect_err("Record was cleared");
        assert!(matches!(err, LedgerError::VehicleNotFound(_)));
    }

    #[test]
    fn delete_matches_an_exited_history_record() {
        let service = memory_service(2);
        check_in(&service, "KA01AB1234").expect("Check-in should succeed");
        check_out(&service, "KA01AB1234").expect("Check-out should succeed");
        assert_eq!(service.list_records().records.len(), 1);

        let result = delete_record(&service, "KA01AB1234").expect("Delete should succeed");
        assert_eq!(result.space_id, 1);
        assert!(service.list_records().records.is_empty());
    }

    #[test]
    fn delete_unknown_vehicle_fails() {
        let service = memory_service(2);

        let err = delete_record(&service, "ZZZ999").expect_err("Nothing to delete");
        assert!(matches!(err, LedgerError::VehicleNotFound(_)));
    }

    #[test]
    fn capacity_two_scenario() {
        let service = memory_service(2);

        assert_eq!(check_in(&service, "ABC123").unwrap().space_id, 1);
        assert_eq!(check_in(&service, "XYZ999").unwrap().space_id, 2);
        assert!(matches!(
            check_in(&service, "DEF456").unwrap_err(),
            LedgerError::LotFull
        ));

        service.backdate_entry("ABC123", 2);
        let out = check_out(&service, "ABC123").expect("Check-out should succeed");
        assert!((out.parking_fee - 200.0).abs() < 0.1);
        assert_eq!(service.vacant_count(), 1);

        assert_eq!(check_in(&service, "DEF456").unwrap().space_id, 1);

        let records = service.list_records().records;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].space_id, 1);
        assert_eq!(records[0].vehicle_number, "DEF456");
        assert!(records[0].is_occupied);
        assert_eq!(records[1].space_id, 2);
        assert_eq!(records[1].vehicle_number, "XYZ999");
        assert!(records[1].is_occupied);
    }

    #[test]
    fn snapshot_restores_state_across_services() {
        let env = TestEnvironment::new().expect("Failed to create test env");

        let service = LedgerService::new(
            test_config(3),
            JsonSnapshotRepository::new(env.connection.clone()),
        );
        check_in(&service, "KA01AB1234").expect("Check-in should succeed");
        check_in(&service, "MH12CD5678").expect("Check-in should succeed");
        check_out(&service, "MH12CD5678").expect("Check-out should succeed");
        let before = service.list_records().records;
        drop(service);

        let restored = LedgerService::new(
            test_config(3),
            JsonSnapshotRepository::new(env.connection.clone()),
        );
        assert_eq!(restored.list_records().records, before);
        assert_eq!(restored.vacant_count(), 2);
    }

    #[test]
    fn corrupt_snapshot_starts_blank() {
        let env = TestEnvironment::new().expect("Failed to create test env");
        std::fs::write(env.connection.snapshot_file_path(), "not a snapshot")
            .expect("Failed to write corrupt file");

        let service = LedgerService::new(
            test_config(3),
            JsonSnapshotRepository::new(env.connection.clone()),
        );
        assert!(service.list_records().records.is_empty());
        assert_eq!(service.vacant_count(), 3);
    }

    #[test]
    fn capacity_mismatch_snapshot_is_ignored() {
        let env = TestEnvironment::new().expect("Failed to create test env");

        let service = LedgerService::new(
            test_config(2),
            JsonSnapshotRepository::new(env.connection.clone()),
        );
        check_in(&service, "KA01AB1234").expect("Check-in should succeed");
        drop(service);

        // Reconfigured lot size; the old two-space snapshot no longer applies.
        let resized = LedgerService::new(
            test_config(4),
            JsonSnapshotRepository::new(env.connection.clone()),
        );
        assert!(resized.list_records().records.is_empty());
        assert_eq!(resized.vacant_count(), 4);
    }
}

//! Typed errors returned by ledger operations.

/// Everything that can go wrong in a ledger operation.
///
/// All variants are returned to the caller as values; the backend never
/// panics on bad input and never terminates the process. Front ends render
/// these as user-facing messages.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Vehicle number cannot be empty")]
    EmptyVehicleNumber,
    #[error("Vehicle number cannot exceed {max} characters")]
    VehicleNumberTooLong { max: usize },
    #[error("Vehicle {vehicle_number} is already parked in space {space_id}")]
    AlreadyParked { vehicle_number: String, space_id: u32 },
    #[error("No parking spaces available")]
    LotFull,
    #[error("No record found for vehicle {0}")]
    VehicleNotFound(String),
    #[error("Failed to save parking records: {0}")]
    Persistence(anyhow::Error),
}

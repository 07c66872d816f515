//! Domain-level command and result types.
//!
//! These structs are the interface between the ledger services and any front
//! end (text menu, GUI, tests). Front ends build commands from user input and
//! render the results; the services own all state and rules.

pub mod ledger {
    use crate::domain::models::space::ParkingSpace;
    use chrono::{DateTime, Utc};

    /// Input for checking a vehicle in.
    #[derive(Debug, Clone)]
    pub struct CheckInCommand {
        pub vehicle_number: String,
    }

    /// Result of checking a vehicle in.
    #[derive(Debug, Clone)]
    pub struct CheckInResult {
        pub space_id: u32,
        pub entry_time: DateTime<Utc>,
    }

    /// Input for checking a vehicle out.
    #[derive(Debug, Clone)]
    pub struct CheckOutCommand {
        pub vehicle_number: String,
    }

    /// Result of checking a vehicle out.
    #[derive(Debug, Clone)]
    pub struct CheckOutResult {
        pub space_id: u32,
        pub exit_time: DateTime<Utc>,
        pub parking_fee: f64,
    }

    /// Input for force-clearing a record.
    #[derive(Debug, Clone)]
    pub struct DeleteRecordCommand {
        pub vehicle_number: String,
    }

    /// Result of force-clearing a record.
    #[derive(Debug, Clone)]
    pub struct DeleteRecordResult {
        pub space_id: u32,
    }

    /// Result of listing parking records.
    ///
    /// Contains one snapshot per space with an active session or retained
    /// history, ordered by ascending space id. A record with `is_occupied`
    /// set and no `exit_time` is still parked.
    #[derive(Debug, Clone)]
    pub struct ListRecordsResult {
        pub records: Vec<ParkingSpace>,
    }
}

pub mod config;
pub mod space;

pub use config::LedgerConfig;
pub use space::ParkingSpace;

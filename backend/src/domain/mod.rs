//! # Domain Module
//!
//! Business logic for the parking tracker.
//!
//! This module encapsulates the rules that govern parking spaces: how a
//! vehicle is assigned to the lowest-numbered vacant space, how a completed
//! session is billed by fractional hours, and how records may be cleared or
//! listed. It operates independently of any front end or storage mechanism.
//!
//! ## Module Organization
//!
//! - **models**: The `ParkingSpace` entity and ledger configuration
//! - **commands**: Command/result types consumed by the services
//! - **errors**: The typed error enum returned by every operation
//! - **fee**: Pure fee computation
//! - **ledger_service**: The main service orchestrating all operations
//!
//! ## Business Rules
//!
//! - Vehicle numbers must be non-empty and within the configured length bound
//! - A vehicle can occupy at most one space at a time
//! - Entry always takes the lowest-numbered vacant space
//! - Fees are proportional to fractional hours parked, never negative
//! - Deleting a record clears the space without computing a fee

pub mod commands;
pub mod errors;
pub mod fee;
pub mod ledger_service;
pub mod models;

pub use errors::LedgerError;
pub use ledger_service::LedgerService;

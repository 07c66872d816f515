//! Text-menu front end for the parking tracker.
//!
//! A thin shell over the backend: collects vehicle numbers from stdin,
//! invokes the ledger operations, and renders results and errors as text.
//! All state and rules live in the backend.

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use log::info;
use std::io::{self, BufRead, Write};

use parking_tracker_backend::domain::commands::ledger::{
    CheckInCommand, CheckOutCommand, DeleteRecordCommand,
};
use parking_tracker_backend::{Backend, JsonSnapshotRepository, LedgerConfig, LedgerService};

type Ledger = LedgerService<JsonSnapshotRepository>;

fn main() -> Result<()> {
    env_logger::init();
    info!("Starting parking tracker");

    let backend = Backend::new_default(LedgerConfig::default())?;
    let ledger = backend.ledger_service;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print_menu(&ledger);
        let choice = match read_line(&mut input, "Enter your choice: ")? {
            Some(choice) => choice,
            None => break,
        };

        match choice.as_str() {
            "1" => add_vehicle(&ledger, &mut input)?,
            "2" => update_exit(&ledger, &mut input)?,
            "3" => delete_vehicle(&ledger, &mut input)?,
            "4" => display_records(&ledger),
            "5" => break,
            other => println!("Invalid choice '{}'. Please try again.", other),
        }
    }

    println!("Exiting program. Thank you!");
    Ok(())
}

fn print_menu(ledger: &Ledger) {
    println!();
    println!("=== Parking Management System ===");
    println!("({} of {} spaces free)", ledger.vacant_count(), ledger.capacity());
    println!("1. Add Vehicle (Entry)");
    println!("2. Update Vehicle (Exit)");
    println!("3. Delete Vehicle Record");
    println!("4. Display Parking Records");
    println!("5. Exit");
}

fn add_vehicle(ledger: &Ledger, input: &mut impl BufRead) -> Result<()> {
    let vehicle_number = match read_line(input, "Enter vehicle number: ")? {
        Some(vehicle_number) => vehicle_number,
        None => return Ok(()),
    };

    match ledger.check_in(CheckInCommand { vehicle_number }) {
        Ok(result) => println!(
            "Vehicle added to parking space {} at {}",
            result.space_id,
            format_time(result.entry_time)
        ),
        Err(e) => println!("{}", e),
    }
    Ok(())
}

fn update_exit(ledger: &Ledger, input: &mut impl BufRead) -> Result<()> {
    let vehicle_number = match read_line(input, "Enter vehicle number: ")? {
        Some(vehicle_number) => vehicle_number,
        None => return Ok(()),
    };

    match ledger.check_out(CheckOutCommand { vehicle_number }) {
        Ok(result) => {
            println!(
                "Vehicle exited space {} at {}",
                result.space_id,
                format_time(result.exit_time)
            );
            println!("Parking Fee: {:.2}", result.parking_fee);
        }
        Err(e) => println!("{}", e),
    }
    Ok(())
}

fn delete_vehicle(ledger: &Ledger, input: &mut impl BufRead) -> Result<()> {
    let vehicle_number = match read_line(input, "Enter vehicle number: ")? {
        Some(vehicle_number) => vehicle_number,
        None => return Ok(()),
    };

    match ledger.delete_record(DeleteRecordCommand { vehicle_number }) {
        Ok(result) => println!("Record deleted, space {} is now free", result.space_id),
        Err(e) => println!("{}", e),
    }
    Ok(())
}

fn display_records(ledger: &Ledger) {
    let records = ledger.list_records().records;
    if records.is_empty() {
        println!("No parking records to display.");
        return;
    }

    println!(
        "{:<6} {:<20} {:<20} {:<20} {:>10}",
        "Space", "Vehicle", "Entry", "Exit", "Fee"
    );
    for record in records {
        let entry = record
            .entry_time
            .map(format_time)
            .unwrap_or_else(|| "-".to_string());
        let (exit, fee) = match record.exit_time {
            Some(exit_time) => (format_time(exit_time), format!("{:.2}", record.parking_fee)),
            None => ("Still Parked".to_string(), "-".to_string()),
        };
        println!(
            "{:<6} {:<20} {:<20} {:<20} {:>10}",
            record.space_id, record.vehicle_number, entry, exit, fee
        );
    }
}

fn format_time(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Prompt and read one trimmed line; `None` means stdin closed.
fn read_line(input: &mut impl BufRead, prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

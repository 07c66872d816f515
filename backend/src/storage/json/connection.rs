//! Base-directory management for the JSON snapshot store.

use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

const SNAPSHOT_FILE: &str = "parking_ledger.json";

/// JsonConnection manages the data directory the snapshot file lives in.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: Arc<Mutex<PathBuf>>,
}

impl JsonConnection {
    /// Create a connection rooted at the given directory, creating it if
    /// it does not exist yet.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: Arc::new(Mutex::new(base_path)),
        })
    }

    /// Create a connection in the default data directory,
    /// `~/Parking Tracker`.
    pub fn new_default() -> Result<Self> {
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        let data_dir = PathBuf::from(home_dir).join("Parking Tracker");
        info!("Using data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Path of the snapshot file inside the data directory.
    pub fn snapshot_file_path(&self) -> PathBuf {
        let base_dir = self.base_directory.lock().unwrap();
        base_dir.join(SNAPSHOT_FILE)
    }

    /// Path of the temporary file snapshots are staged in before the
    /// atomic rename.
    pub fn snapshot_temp_path(&self) -> PathBuf {
        let base_dir = self.base_directory.lock().unwrap();
        base_dir.join(format!("{}.tmp", SNAPSHOT_FILE))
    }
}

//! JSON-backed snapshot repository.

use anyhow::{Context, Result};
use log::warn;
use std::fs;

use super::connection::JsonConnection;
use crate::storage::traits::{LedgerSnapshot, SnapshotStorage, SNAPSHOT_VERSION};

/// Snapshot repository persisting the full ledger to a single JSON file.
#[derive(Clone)]
pub struct JsonSnapshotRepository {
    connection: JsonConnection,
}

impl JsonSnapshotRepository {
    /// Create a new JSON snapshot repository.
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl SnapshotStorage for JsonSnapshotRepository {
    /// Read the snapshot file back in full.
    ///
    /// A missing file is a normal first run and loads as `None`. A file that
    /// cannot be read or parsed, or that carries an unknown schema version,
    /// also loads as `None` so the ledger can start blank instead of
    /// refusing to start.
    fn load_snapshot(&self) -> Result<Option<LedgerSnapshot>> {
        let file_path = self.connection.snapshot_file_path();

        if !file_path.exists() {
            return Ok(None);
        }

        let contents = match fs::read_to_string(&file_path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(
                    "Could not read snapshot file {}: {}. Starting with a blank ledger.",
                    file_path.display(),
                    e
                );
                return Ok(None);
            }
        };

        let snapshot: LedgerSnapshot = match serde_json::from_str(&contents) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(
                    "Snapshot file {} is corrupt: {}. Starting with a blank ledger.",
                    file_path.display(),
                    e
                );
                return Ok(None);
            }
        };

        if snapshot.version != SNAPSHOT_VERSION {
            warn!(
                "Snapshot file {} has unsupported version {} (expected {}). Starting with a blank ledger.",
                file_path.display(),
                snapshot.version,
                SNAPSHOT_VERSION
            );
            return Ok(None);
        }

        Ok(Some(snapshot))
    }

    /// Write the full snapshot atomically: serialize to a temporary file in
    /// the same directory, then rename it over the previous snapshot.
    fn save_snapshot(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        let file_path = self.connection.snapshot_file_path();
        let temp_path = self.connection.snapshot_temp_path();

        let contents = serde_json::to_string_pretty(snapshot)
            .context("Failed to serialize ledger snapshot")?;

        fs::write(&temp_path, contents)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &file_path)
            .with_context(|| format!("Failed to replace {}", file_path.display()))?;

        Ok(())
    }
}

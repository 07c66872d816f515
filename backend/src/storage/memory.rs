//! In-process snapshot store.

use anyhow::Result;
use std::sync::{Arc, Mutex};

use crate::storage::traits::{LedgerSnapshot, SnapshotStorage};

/// Snapshot store that keeps the ledger in memory only.
///
/// State is lost when the process exits. Used when persistence is not
/// wanted, and by service tests that don't need a real file.
#[derive(Clone, Default)]
pub struct MemorySnapshotStore {
    snapshot: Arc<Mutex<Option<LedgerSnapshot>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStorage for MemorySnapshotStore {
    fn load_snapshot(&self) -> Result<Option<LedgerSnapshot>> {
        Ok(self.snapshot.lock().unwrap().clone())
    }

    fn save_snapshot(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        *self.snapshot.lock().unwrap() = Some(snapshot.clone());
        Ok(())
    }
}

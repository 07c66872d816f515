/// Test utilities for storage tests.
///
/// Provides RAII-based cleanup so test data is removed even if tests panic
/// or fail.
use anyhow::Result;
use tempfile::TempDir;

use super::connection::JsonConnection;
use super::snapshot_repository::JsonSnapshotRepository;

/// Test environment with a temporary data directory that is cleaned up
/// when the environment is dropped.
pub struct TestEnvironment {
    pub connection: JsonConnection,
    /// Base directory path for manual inspection if needed.
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    /// Create a new test environment with a temporary directory.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = JsonConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}

/// Test helper bundling a repository with its environment.
pub struct TestHelper {
    pub env: TestEnvironment,
    pub snapshot_repo: JsonSnapshotRepository,
}

impl TestHelper {
    /// Create a new test helper with a fresh environment.
    pub fn new() -> Result<Self> {
        let env = TestEnvironment::new()?;
        let snapshot_repo = JsonSnapshotRepository::new(env.connection.clone());
        Ok(Self { env, snapshot_repo })
    }
}

//! Storage layer for anasa
//!
//! Manages persistent state under a single data directory at the store root:
//!
//! ```text
//! .anasa/                       # data directory (configurable name)
//!   store.json                  # full entity snapshot
//!   store.json.lock             # writer lock
//!   user                        # persisted acting-user id
//! ```
//!
//! The snapshot is always replaced as a whole: writers take a file lock and
//! write via temp file + rename, so readers never see a partial snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};
use crate::lock::{FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::model::Snapshot;

/// Default name of the data directory
pub const DATA_DIR: &str = ".anasa";

/// Snapshot file name within the data directory
pub const SNAPSHOT_FILE: &str = "store.json";

/// Storage manager for anasa state
#[derive(Debug, Clone)]
pub struct Storage {
    /// Path to the store root (where the data directory lives)
    root: PathBuf,
    /// Name of the data directory
    data_dir_name: String,
}

impl Storage {
    /// Create a storage manager rooted at the given directory
    pub fn new(root: PathBuf, data_dir_name: impl Into<String>) -> Self {
        Self {
            root,
            data_dir_name: data_dir_name.into(),
        }
    }

    /// Create storage with the default data directory name
    pub fn for_root(root: PathBuf) -> Self {
        Self::new(root, DATA_DIR)
    }

    /// Path to the store root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the data directory
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(&self.data_dir_name)
    }

    /// Path to the snapshot file
    pub fn snapshot_file(&self) -> PathBuf {
        self.data_dir().join(SNAPSHOT_FILE)
    }

    /// Path to the persisted acting-user file
    pub fn user_file(&self) -> PathBuf {
        self.data_dir().join("user")
    }

    /// Initialize the data directory
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(self.data_dir())?;
        Ok(())
    }

    /// Check if a snapshot exists
    pub fn is_initialized(&self) -> bool {
        self.snapshot_file().exists()
    }

    // =========================================================================
    // File I/O helpers (atomic writes for safety)
    // =========================================================================

    /// Write JSON data atomically under the file's sibling lock
    pub fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        let lock_path = lock_path_for(path);
        let _lock = FileLock::acquire(&lock_path, DEFAULT_LOCK_TIMEOUT_MS)?;
        crate::lock::write_atomic(path, json.as_bytes())
    }

    /// Read JSON data from a file
    pub fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        let data: T = serde_json::from_str(&content)?;
        Ok(data)
    }

    // =========================================================================
    // Snapshot persistence
    // =========================================================================

    /// Read the entity snapshot
    ///
    /// The snapshot is trusted as-is: no schema validation beyond what serde
    /// enforces, and no migration logic.
    pub fn read_snapshot(&self) -> Result<Snapshot> {
        let path = self.snapshot_file();
        if !path.exists() {
            return Err(Error::StoreNotFound(self.root.clone()));
        }
        self.read_json(&path)
    }

    /// Write the entity snapshot (full overwrite, locked + atomic)
    pub fn write_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        self.init()?;
        self.write_json(&self.snapshot_file(), snapshot)
    }

    // =========================================================================
    // Acting-user persistence
    // =========================================================================

    /// Read the persisted acting-user id for this store
    pub fn read_user(&self) -> Option<String> {
        let path = self.user_file();
        fs::read_to_string(&path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Write the acting-user id for this store
    pub fn write_user(&self, user_id: &str) -> Result<()> {
        self.init()?;
        crate::lock::write_atomic(&self.user_file(), user_id.as_bytes())
    }
}

fn lock_path_for(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.lock", path.display()))
}

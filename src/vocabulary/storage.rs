/*!
 * Durable-storage port for the vocabulary store.
 *
 * The store never touches the filesystem directly; it talks to a
 * [`StoragePort`] injected at construction. [`FileStorage`] is the
 * production implementation (one fixed file, replaced atomically on every
 * write); [`MemoryStorage`] backs tests.
 */

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tempfile::NamedTempFile;

use crate::errors::StoreError;

/// Key-value style persistence boundary: one opaque blob under one fixed key.
pub trait StoragePort: Send + Sync {
    /// Read the persisted blob; `Ok(None)` when nothing was saved yet
    fn read(&self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the persisted blob with the given bytes
    fn write(&self, bytes: &[u8]) -> Result<(), StoreError>;
}

/// File-backed storage.
///
/// Writes go to a temporary file in the target directory which is then
/// persisted over the destination, so a crash mid-write never leaves a
/// truncated snapshot behind.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoragePort for FileStorage {
    fn read(&self) -> Result<Option<Vec<u8>>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        fs::read(&self.path)
            .map(Some)
            .map_err(|e| StoreError::Read(format!("{:?}: {}", self.path, e)))
    }

    fn write(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        fs::create_dir_all(parent)
            .map_err(|e| StoreError::Write(format!("{:?}: {}", parent, e)))?;

        let mut temp = NamedTempFile::new_in(parent)
            .map_err(|e| StoreError::Write(format!("{:?}: {}", self.path, e)))?;
        temp.write_all(bytes)
            .map_err(|e| StoreError::Write(format!("{:?}: {}", self.path, e)))?;
        temp.persist(&self.path)
            .map_err(|e| StoreError::Write(format!("{:?}: {}", self.path, e)))?;

        Ok(())
    }
}

/// In-memory storage for tests; counts writes so write-through behavior is
/// observable.
#[derive(Default)]
pub struct MemoryStorage {
    data: Mutex<Option<Vec<u8>>>,
    writes: Mutex<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a blob, as if a previous session had saved it
    pub fn seeded(bytes: Vec<u8>) -> Self {
        Self {
            data: Mutex::new(Some(bytes)),
            writes: Mutex::new(0),
        }
    }

    /// Number of write-throughs performed so far
    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }

    /// Current persisted blob, if any
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.data.lock().clone()
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.data.lock().clone())
    }

    fn write(&self, bytes: &[u8]) -> Result<(), StoreError> {
        *self.data.lock() = Some(bytes.to_vec());
        *self.writes.lock() += 1;
        Ok(())
    }
}

//! Persistent slots.
//!
//! Each slot holds one JSON document under a fixed name, the way the browser
//! client keeps `cart` and `bookingInfo` in local storage.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use mockall::automock;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Slot holding the cart lines.
pub const CART_SLOT: &str = "cart";

/// Slot holding the booking record.
pub const BOOKING_SLOT: &str = "bookingInfo";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A slot could not be read.
    #[error("failed to read slot {slot}")]
    Read {
        /// Slot name
        slot: String,

        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// A slot could not be written.
    #[error("failed to write slot {slot}")]
    Write {
        /// Slot name
        slot: String,

        /// Underlying error
        #[source]
        source: io::Error,
    },
}

/// Named JSON slots backing the cart and booking stores.
#[automock]
pub trait CartStorage: Send + Sync {
    /// Read a slot; `None` when it has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the backend fails.
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Replace a slot's contents.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the backend fails.
    fn write(&self, slot: &str, contents: &str) -> Result<(), StorageError>;

    /// Delete a slot. Deleting a missing slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the backend fails.
    fn remove(&self, slot: &str) -> Result<(), StorageError>;
}

/// In-process storage for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<FxHashMap<String, String>>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage with one slot pre-filled.
    pub fn with_slot(slot: &str, contents: impl Into<String>) -> Self {
        let storage = Self::new();

        storage
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(slot.to_string(), contents.into());

        storage
    }
}

impl CartStorage for MemoryStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);

        Ok(slots.get(slot).cloned())
    }

    fn write(&self, slot: &str, contents: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);

        slots.insert(slot.to_string(), contents.to_string());

        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);

        slots.remove(slot);

        Ok(())
    }
}

/// One `<slot>.json` file per slot inside a directory.
///
/// Writes go to a temporary sibling file that is then renamed over the slot,
/// so a reader never sees a half-written document.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` for slot files. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the slot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

impl CartStorage for FileStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                slot: slot.to_string(),
                source,
            }),
        }
    }

    fn write(&self, slot: &str, contents: &str) -> Result<(), StorageError> {
        let write_error = |source: io::Error| StorageError::Write {
            slot: slot.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_error)?;

        let target = self.slot_path(slot);
        let staging = self.dir.join(format!(".{slot}.json.tmp"));

        fs::write(&staging, contents).map_err(write_error)?;
        fs::rename(&staging, &target).map_err(write_error)?;

        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write {
                slot: slot.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn memory_storage_round_trips_slots() -> TestResult {
        let storage = MemoryStorage::new();

        assert_eq!(storage.read(CART_SLOT)?, None);

        storage.write(CART_SLOT, "[]")?;

        assert_eq!(storage.read(CART_SLOT)?.as_deref(), Some("[]"));

        storage.remove(CART_SLOT)?;

        assert_eq!(storage.read(CART_SLOT)?, None);

        Ok(())
    }

    #[test]
    fn file_storage_missing_slot_reads_none() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.read(CART_SLOT)?, None);
        storage.remove(CART_SLOT)?;

        Ok(())
    }

    #[test]
    fn file_storage_writes_one_file_per_slot() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().join("nested"));

        storage.write(CART_SLOT, r#"[{"id":1}]"#)?;
        storage.write(BOOKING_SLOT, r#"{"tableIds":[3]}"#)?;
        storage.write(CART_SLOT, "[]")?;

        assert_eq!(storage.read(CART_SLOT)?.as_deref(), Some("[]"));
        assert_eq!(
            storage.read(BOOKING_SLOT)?.as_deref(),
            Some(r#"{"tableIds":[3]}"#)
        );
        assert!(
            storage.dir().join("cart.json").exists(),
            "expected cart.json in {}",
            storage.dir().display()
        );
        assert!(
            !storage.dir().join(".cart.json.tmp").exists(),
            "staging file should be renamed away"
        );

        Ok(())
    }
}

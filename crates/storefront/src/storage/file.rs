//! JSON-file storage backend.
//!
//! The local-device-storage analog: one JSON document at a fixed path,
//! replaced wholesale on every save. The file is shared across processes
//! of the same user, so saves go through the revision check in the
//! envelope (see the module docs in [`super`]).

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use moemen_core::Cart;

use super::{CartStorage, PersistedCart, StorageError, decode_state, encode_state, stored_revision};

/// Cart storage backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create a storage handle for the given path.
    ///
    /// Nothing is read or created until the first [`CartStorage::load`] or
    /// [`CartStorage::save`].
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw file, treating a missing file as no state.
    fn read_raw(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StorageError::Io(error)),
        }
    }
}

impl CartStorage for FileStorage {
    fn load(&self) -> Result<Option<PersistedCart>, StorageError> {
        Ok(self.read_raw()?.as_deref().and_then(decode_state))
    }

    fn save(&mut self, cart: &Cart, expected_revision: u64) -> Result<u64, StorageError> {
        let stored = self.read_raw()?.as_deref().map_or(0, stored_revision);
        // A cleared or pre-migration store reads as revision 0 and accepts
        // any write; otherwise the writer must hold the current revision.
        if stored != expected_revision && stored != 0 {
            return Err(StorageError::RevisionConflict {
                stored,
                expected: expected_revision,
            });
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let revision = expected_revision + 1;
        fs::write(&self.path, encode_state(cart, revision))?;
        Ok(revision)
    }
}

//! File-based storage backend.
//!
//! Each key is one file under the base directory. Writes go through a
//! uniquely named temp file and an atomic rename so a crash never leaves a
//! half-written cart. Temp files start with `.`, which no key may.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::StorageError;
use super::traits::Storage;

/// File-based storage backend with atomic writes.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Create a new file backend rooted at `base_dir`.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Directory holding the key files.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path for a key, rejecting anything that could escape the
    /// base directory.
    fn item_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_dir.join(key))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.item_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.item_path(key)?;
        let mut temp = NamedTempFile::new_in(&self.base_dir)?;

        temp.write_all(value.as_bytes())?;
        temp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.item_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.is_file() {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (FileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("store")).unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn creates_base_directory() {
        let (storage, _temp) = create_test_storage();
        assert!(storage.base_dir().is_dir());
    }

    #[test]
    fn get_missing_key() {
        let (storage, _temp) = create_test_storage();
        assert!(storage.get_item("urithi_cart").unwrap().is_none());
    }

    #[test]
    fn set_and_get() {
        let (storage, _temp) = create_test_storage();
        storage.set_item("urithi_cart", "[]").unwrap();
        assert_eq!(
            storage.get_item("urithi_cart").unwrap().as_deref(),
            Some("[]")
        );
        let leftovers = fs::read_dir(storage.base_dir()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn writes_leave_neighbouring_keys_alone() {
        let (storage, _temp) = create_test_storage();
        storage.set_item("urithi_cart.tmp", "kept").unwrap();

        storage.set_item("urithi_cart", "[]").unwrap();
        storage.set_item("urithi_cart", "[1]").unwrap();

        assert_eq!(
            storage.get_item("urithi_cart.tmp").unwrap().as_deref(),
            Some("kept")
        );
        assert_eq!(
            storage.get_item("urithi_cart").unwrap().as_deref(),
            Some("[1]")
        );
    }

    #[test]
    fn survives_reopen() {
        let (storage, temp) = create_test_storage();
        storage.set_item("urithi_session_id", "sess_1_abc").unwrap();

        let reopened = FileStorage::new(temp.path().join("store")).unwrap();
        assert_eq!(
            reopened.get_item("urithi_session_id").unwrap().as_deref(),
            Some("sess_1_abc")
        );
    }

    #[test]
    fn rejects_path_traversal() {
        let (storage, _temp) = create_test_storage();
        for key in ["", "../escape", "a/b", ".hidden", "a\\b"] {
            assert!(matches!(
                storage.set_item(key, "x"),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn remove_and_clear() {
        let (storage, _temp) = create_test_storage();
        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();

        storage.remove_item("a").unwrap();
        storage.remove_item("a").unwrap();
        assert!(storage.get_item("a").unwrap().is_none());

        storage.clear().unwrap();
        assert!(storage.get_item("b").unwrap().is_none());
    }
}

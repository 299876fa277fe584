//! # Filesystem-backed storage
//!
//! [`FileStorage`] is the durable [`Storage`] used on native builds, where no
//! browser `localStorage` exists. Each key is one file under the base
//! directory, and the file holds the raw value:
//!
//! ```text
//! <base_dir>/
//! └── fitness_app_auth_token     # "\"<token>\""
//! ```
//!
//! Keys are used verbatim as file names. Any character other than ASCII
//! alphanumerics, `-`, `_` and `.` is replaced with `_`, so a key can never
//! escape the base directory.

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::storage::{Storage, StoreError};

/// Filesystem-backed Storage for desktop persistence.
#[derive(Clone, Debug)]
pub struct FileStorage {
    base: PathBuf,
}

impl FileStorage {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn item_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        // "." and ".." would resolve to directories
        if name.chars().all(|c| c == '.') {
            return self.base.join(name.replace('.', "_"));
        }
        self.base.join(name)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.item_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base)?;
        std::fs::write(self.item_path(key), value)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.item_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();

        let storage = FileStorage::new(dir.path().join("nested"));
        assert!(storage.get_item("fitness_app_auth_token").unwrap().is_none());

        storage
            .set_item("fitness_app_auth_token", "\"tok-1\"")
            .unwrap();

        // Re-open from same directory
        let reopened = FileStorage::new(dir.path().join("nested"));
        assert_eq!(
            reopened.get_item("fitness_app_auth_token").unwrap().as_deref(),
            Some("\"tok-1\"")
        );

        reopened.remove_item("fitness_app_auth_token").unwrap();
        assert!(storage.get_item("fitness_app_auth_token").unwrap().is_none());

        // Removing again is fine
        reopened.remove_item("fitness_app_auth_token").unwrap();
    }

    #[test]
    fn test_key_cannot_escape_base() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf());

        storage.set_item("../outside", "x").unwrap();

        assert!(dir.path().join(".._outside").exists());
        assert_eq!(storage.get_item("../outside").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_dot_keys_map_to_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("base"));

        storage.set_item("..", "up").unwrap();

        assert!(dir.path().join("base").join("__").is_file());
        assert_eq!(storage.get_item("..").unwrap().as_deref(), Some("up"));
    }
}

//! File-based storage backend.

use crate::error::Result;
use crate::storage::traits::SlotStore;
use std::fs;
use std::path::PathBuf;

/// File-based slot storage with atomic writes.
///
/// Each slot is one JSON file under `<base>/slots/`.
#[derive(Debug)]
pub struct FileBackend {
    base_dir: PathBuf,
}

impl FileBackend {
    /// Create a new file backend.
    ///
    /// Creates the slots directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the slots directory cannot be created.
    pub fn new(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(base_dir.join("slots"))?;
        Ok(Self { base_dir })
    }

    /// Get the path to a slot file.
    fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join("slots").join(format!("{slot}.json"))
    }
}

impl SlotStore for FileBackend {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        Ok(Some(contents))
    }

    fn write(&self, slot: &str, contents: &str) -> Result<()> {
        let path = self.slot_path(slot);
        let temp = path.with_extension("tmp");

        // Write to temp file first
        fs::write(&temp, contents)?;

        // Atomic rename - prevents corruption if process crashes mid-write
        fs::rename(&temp, &path)?;

        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// Get the default furnish home directory.
///
/// Uses `FURNISH_HOME` environment variable if set, otherwise `~/.furnish`.
#[must_use]
pub fn get_furnish_home() -> PathBuf {
    if let Ok(home) = std::env::var("FURNISH_HOME") {
        PathBuf::from(home)
    } else if let Some(home) = dirs::home_dir() {
        home.join(".furnish")
    } else {
        PathBuf::from(".furnish")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_backend() -> (FileBackend, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().to_path_buf()).unwrap();
        (backend, temp_dir)
    }

    #[test]
    fn creates_slots_directory() {
        let temp_dir = TempDir::new().unwrap();
        let _backend = FileBackend::new(temp_dir.path().to_path_buf()).unwrap();
        assert!(temp_dir.path().join("slots").exists());
    }

    #[test]
    fn read_missing_slot() {
        let (store, _temp) = create_test_backend();
        let result = store.read("shopping_cart").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn write_and_read_slot() {
        let (store, _temp) = create_test_backend();

        store.write("shopping_cart", "[]").unwrap();

        let contents = store.read("shopping_cart").unwrap().unwrap();
        assert_eq!(contents, "[]");
    }

    #[test]
    fn write_replaces_previous_contents() {
        let (store, _temp) = create_test_backend();

        store.write("recentlyViewed", "[1]").unwrap();
        store.write("recentlyViewed", "[1,2]").unwrap();

        let contents = store.read("recentlyViewed").unwrap().unwrap();
        assert_eq!(contents, "[1,2]");
    }

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let (store, temp_dir) = create_test_backend();

        store.write("shopping_cart", "[]").unwrap();

        // Temp file should not exist after successful write
        let temp_path = temp_dir.path().join("slots").join("shopping_cart.tmp");
        assert!(!temp_path.exists());

        // Main file should exist
        let main_path = temp_dir.path().join("slots").join("shopping_cart.json");
        assert!(main_path.exists());
    }

    #[test]
    fn remove_slot_removes_file() {
        let (store, temp_dir) = create_test_backend();

        store.write("shopping_cart", "[]").unwrap();

        let path = temp_dir.path().join("slots").join("shopping_cart.json");
        assert!(path.exists());

        store.remove("shopping_cart").unwrap();
        assert!(!path.exists());
        assert!(store.read("shopping_cart").unwrap().is_none());
    }

    #[test]
    fn remove_nonexistent_slot_succeeds() {
        let (store, _temp) = create_test_backend();
        // Should not error when removing a non-existent slot
        store.remove("nonexistent").unwrap();
    }

    #[test]
    fn slots_are_independent() {
        let (store, _temp) = create_test_backend();

        store.write("shopping_cart", "[\"a\"]").unwrap();
        store.write("recentlyViewed", "[\"b\"]").unwrap();

        store.remove("shopping_cart").unwrap();

        assert!(store.read("shopping_cart").unwrap().is_none());
        assert_eq!(store.read("recentlyViewed").unwrap().unwrap(), "[\"b\"]");
    }
}

//! In-memory storage backend for testing.

use crate::error::Result;
use crate::storage::traits::SlotStore;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory slot storage.
///
/// Used by tests, and as the degraded mode when durable storage is
/// unavailable: everything works, nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create a new in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStore for MemoryBackend {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        let slots = self.slots.read().unwrap();
        Ok(slots.get(slot).cloned())
    }

    fn write(&self, slot: &str, contents: &str) -> Result<()> {
        let mut slots = self.slots.write().unwrap();
        slots.insert(slot.to_string(), contents.to_string());
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<()> {
        let mut slots = self.slots.write().unwrap();
        slots.remove(slot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_missing_slot() {
        let store = MemoryBackend::new();
        let result = store.read("nonexistent").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn write_and_read_slot() {
        let store = MemoryBackend::new();

        store.write("shopping_cart", "[]").unwrap();

        let contents = store.read("shopping_cart").unwrap().unwrap();
        assert_eq!(contents, "[]");
    }

    #[test]
    fn remove_slot() {
        let store = MemoryBackend::new();

        store.write("shopping_cart", "[]").unwrap();
        assert!(store.read("shopping_cart").unwrap().is_some());

        store.remove("shopping_cart").unwrap();
        assert!(store.read("shopping_cart").unwrap().is_none());
    }

    #[test]
    fn remove_nonexistent_slot_succeeds() {
        let store = MemoryBackend::new();
        // Should not error when removing a non-existent slot
        store.remove("nonexistent").unwrap();
    }

    #[test]
    fn concurrent_reads_and_writes() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(MemoryBackend::new());
        store.write("shared", "[]").unwrap();

        let mut handles = vec![];
        for i in 0..5 {
            let store_clone = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for j in 0..50 {
                    store_clone
                        .write(&format!("slot-{i}"), &format!("[{j}]"))
                        .unwrap();
                    let _ = store_clone.read("shared").unwrap();
                }
            }));
        }

        for handle in handles {
            handle.join().expect("Thread panicked");
        }

        for i in 0..5 {
            assert_eq!(store.read(&format!("slot-{i}")).unwrap().unwrap(), "[49]");
        }
    }
}

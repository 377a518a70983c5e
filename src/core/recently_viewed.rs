//! Recently-viewed product tracker.
//!
//! A bounded, most-recent-first collection of product snapshots mirrored
//! to the `recentlyViewed` durable slot. Viewing an already-present
//! product moves it to the front with a fresh timestamp; inserting beyond
//! capacity evicts the least recently viewed entry from the tail.

use crate::core::cart::{lenient_f64, lenient_i64};
use crate::storage::SlotStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Durable slot name for the recently-viewed list.
pub const RECENTLY_VIEWED_SLOT: &str = "recentlyViewed";

/// Default capacity of the recently-viewed list.
pub const DEFAULT_CAPACITY: usize = 20;

/// Snapshot of a product at the time it was viewed.
///
/// Attributes are copied from the catalog, not live-synced to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentlyViewedEntry {
    /// Product identifier.
    pub id: String,

    pub name: String,

    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,

    pub image: String,

    pub category: String,

    /// When the product was viewed, epoch milliseconds.
    #[serde(deserialize_with = "lenient_i64")]
    pub viewed_at: i64,
}

/// Product attributes supplied by the caller; the store stamps the
/// viewing timestamp itself.
#[derive(Debug, Clone)]
pub struct ViewedProduct {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub category: String,
}

/// Recently-viewed store: bounded in-memory list mirrored to a durable slot.
#[derive(Debug)]
pub struct RecentlyViewedStore<S: SlotStore> {
    storage: S,
    entries: Vec<RecentlyViewedEntry>,
    capacity: usize,
}

impl<S: SlotStore> RecentlyViewedStore<S> {
    /// Load the list from its durable slot.
    ///
    /// Entries are re-sorted most recent first after loading, so the
    /// in-memory order is canonical even if the slot was written out of
    /// order. Malformed contents reset the list to empty with a stderr
    /// diagnostic; this never fails outward.
    pub fn hydrate(storage: S, capacity: usize) -> Self {
        let mut entries: Vec<RecentlyViewedEntry> = match storage.read(RECENTLY_VIEWED_SLOT) {
            Ok(Some(contents)) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    eprintln!("furnish: warning: resetting malformed recently-viewed slot: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                eprintln!("furnish: warning: recently-viewed slot unavailable, starting empty: {e}");
                Vec::new()
            }
        };

        entries.sort_by(|a, b| b.viewed_at.cmp(&a.viewed_at));

        Self {
            storage,
            entries,
            capacity,
        }
    }

    /// Record a product view, stamped with the current time.
    pub fn add(&mut self, product: ViewedProduct) {
        self.add_at(product, Utc::now().timestamp_millis());
    }

    /// Record a product view at an explicit timestamp.
    ///
    /// An existing entry with the same id is removed before the new one
    /// is inserted at the front; the tail is truncated to capacity.
    pub fn add_at(&mut self, product: ViewedProduct, viewed_at: i64) {
        self.entries.retain(|entry| entry.id != product.id);
        self.entries.insert(
            0,
            RecentlyViewedEntry {
                id: product.id,
                name: product.name,
                price: product.price,
                image: product.image,
                category: product.category,
                viewed_at,
            },
        );
        self.entries.truncate(self.capacity);
        self.persist();
    }

    /// Remove an entry. No-op (not an error) if the id is absent.
    pub fn remove(&mut self, id: &str) {
        self.entries.retain(|entry| entry.id != id);
        self.persist();
    }

    /// Empty the list and remove the durable slot entirely.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.storage.remove(RECENTLY_VIEWED_SLOT) {
            eprintln!("furnish: warning: failed to remove recently-viewed slot: {e}");
        }
    }

    /// Entries, most recently viewed first.
    #[must_use]
    pub fn items(&self) -> &[RecentlyViewedEntry] {
        &self.entries
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    fn persist(&self) {
        let contents = match serde_json::to_string(&self.entries) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("furnish: warning: failed to serialize recently-viewed list: {e}");
                return;
            }
        };

        if let Err(e) = self.storage.write(RECENTLY_VIEWED_SLOT, &contents) {
            eprintln!(
                "furnish: warning: recently-viewed list not persisted, continuing in memory: {e}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryBackend, SlotStore};

    fn product(id: &str) -> ViewedProduct {
        ViewedProduct {
            id: id.to_string(),
            name: format!("Product {id}"),
            price: 1000.0,
            image: "/Images/Table.jpg".to_string(),
            category: "tables".to_string(),
        }
    }

    #[test]
    fn add_inserts_at_front() {
        let mut viewed = RecentlyViewedStore::hydrate(MemoryBackend::new(), DEFAULT_CAPACITY);
        viewed.add_at(product("a"), 1);
        viewed.add_at(product("b"), 2);

        let ids: Vec<&str> = viewed.items().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn viewing_again_dedups_and_moves_to_front() {
        let mut viewed = RecentlyViewedStore::hydrate(MemoryBackend::new(), DEFAULT_CAPACITY);
        viewed.add_at(product("a"), 1);
        viewed.add_at(product("b"), 2);
        viewed.add_at(product("a"), 3);

        let ids: Vec<&str> = viewed.items().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        // Timestamp refreshed to the second view
        assert_eq!(viewed.items()[0].viewed_at, 3);
        assert_eq!(viewed.count(), 2);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut viewed = RecentlyViewedStore::hydrate(MemoryBackend::new(), DEFAULT_CAPACITY);
        for i in 0..21 {
            viewed.add_at(product(&format!("p{i}")), i);
        }

        assert_eq!(viewed.count(), 20);
        // The very first product viewed has been evicted
        assert!(!viewed.contains("p0"));
        assert!(viewed.contains("p1"));
        assert_eq!(viewed.items()[0].id, "p20");
        assert_eq!(viewed.items()[19].id, "p1");
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let mut viewed = RecentlyViewedStore::hydrate(MemoryBackend::new(), DEFAULT_CAPACITY);
        viewed.add_at(product("a"), 1);

        viewed.remove("absent");
        assert_eq!(viewed.count(), 1);
    }

    #[test]
    fn clear_removes_slot_entirely() {
        let mut viewed = RecentlyViewedStore::hydrate(MemoryBackend::new(), DEFAULT_CAPACITY);
        viewed.add_at(product("a"), 1);
        viewed.clear();

        assert_eq!(viewed.count(), 0);
        assert!(viewed.storage.read(RECENTLY_VIEWED_SLOT).unwrap().is_none());
    }

    #[test]
    fn hydrate_sorts_most_recent_first() {
        let storage = MemoryBackend::new();
        storage
            .write(
                RECENTLY_VIEWED_SLOT,
                r#"[
                    {"id":"a","name":"A","price":1,"image":"/a","category":"c","viewedAt":5},
                    {"id":"b","name":"B","price":1,"image":"/b","category":"c","viewedAt":9},
                    {"id":"c","name":"C","price":1,"image":"/c","category":"c","viewedAt":7}
                ]"#,
            )
            .unwrap();

        let viewed = RecentlyViewedStore::hydrate(storage, DEFAULT_CAPACITY);
        let ids: Vec<&str> = viewed.items().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn hydrate_coerces_stringified_numbers() {
        let storage = MemoryBackend::new();
        storage
            .write(
                RECENTLY_VIEWED_SLOT,
                r#"[{"id":"a","name":"A","price":"1500","image":"/a","category":"c","viewedAt":"42"}]"#,
            )
            .unwrap();

        let viewed = RecentlyViewedStore::hydrate(storage, DEFAULT_CAPACITY);
        assert!((viewed.items()[0].price - 1500.0).abs() < f64::EPSILON);
        assert_eq!(viewed.items()[0].viewed_at, 42);
    }

    #[test]
    fn hydrate_corrupt_slot_starts_empty() {
        let storage = MemoryBackend::new();
        storage.write(RECENTLY_VIEWED_SLOT, "not json").unwrap();

        let viewed = RecentlyViewedStore::hydrate(storage, DEFAULT_CAPACITY);
        assert_eq!(viewed.count(), 0);
    }

    #[test]
    fn add_stamps_current_time() {
        let before = Utc::now().timestamp_millis();
        let mut viewed = RecentlyViewedStore::hydrate(MemoryBackend::new(), DEFAULT_CAPACITY);
        viewed.add(product("a"));
        let after = Utc::now().timestamp_millis();

        let stamped = viewed.items()[0].viewed_at;
        assert!(stamped >= before && stamped <= after);
    }
}

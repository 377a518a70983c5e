//! Shopping cart state and persistence.
//!
//! The cart is an ordered collection of line items keyed by product id,
//! mirrored to the `shopping_cart` durable slot. Mutations go through a
//! pure reducer; the store wraps it with a best-effort persistence effect.

use crate::storage::SlotStore;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Durable slot name for the cart.
pub const CART_SLOT: &str = "shopping_cart";

/// One row in the cart: a purchasable id and its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Stable identifier of the purchasable item.
    pub id: String,

    /// Display label.
    pub name: String,

    /// Unit price in the store's currency.
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,

    /// Path to a representative image.
    pub image_url: String,

    /// Selected variant descriptor, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Always positive; a quantity of zero means the line does not exist.
    #[serde(deserialize_with = "lenient_u32")]
    pub quantity: u32,
}

/// Input for adding a line to the cart: everything except the quantity,
/// which the reducer manages.
#[derive(Debug, Clone)]
pub struct NewCartItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image_url: String,
    pub color: Option<String>,
}

impl NewCartItem {
    /// The line item id, falling back to a generated id when the caller
    /// supplied an empty one.
    fn line_id(&self) -> String {
        if self.id.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            self.id.clone()
        }
    }
}

/// Cart state transitions.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Add one unit of an item; increments the quantity if the id exists.
    Add(NewCartItem),

    /// Remove a line entirely. No-op if the id is absent.
    Remove { id: String },

    /// Replace a line's quantity; zero removes the line.
    SetQuantity { id: String, quantity: u32 },

    /// Empty the cart.
    Clear,
}

/// Apply a cart action to the collection.
///
/// Pure state transition: no I/O, no timestamps. Invariants maintained:
/// at most one line per id, and no line with quantity zero.
pub fn apply(items: &mut Vec<CartLineItem>, action: CartAction) {
    match action {
        CartAction::Add(item) => {
            if let Some(existing) = items.iter_mut().find(|line| line.id == item.id) {
                existing.quantity += 1;
            } else {
                items.push(CartLineItem {
                    id: item.line_id(),
                    name: item.name,
                    price: item.price,
                    image_url: item.image_url,
                    color: item.color,
                    quantity: 1,
                });
            }
        }
        CartAction::Remove { id } => {
            items.retain(|line| line.id != id);
        }
        CartAction::SetQuantity { id, quantity } => {
            if quantity == 0 {
                items.retain(|line| line.id != id);
            } else if let Some(line) = items.iter_mut().find(|line| line.id == id) {
                line.quantity = quantity;
            }
        }
        CartAction::Clear => {
            items.clear();
        }
    }
}

/// Cart store: in-memory line items mirrored to a durable slot.
#[derive(Debug)]
pub struct CartStore<S: SlotStore> {
    storage: S,
    items: Vec<CartLineItem>,
}

impl<S: SlotStore> CartStore<S> {
    /// Load the cart from its durable slot.
    ///
    /// Unparseable or malformed slot contents reset the cart to empty;
    /// the failure is reported on stderr only. Mutations can only be
    /// issued on a constructed store, so a persistence write can never
    /// precede this initial load.
    pub fn hydrate(storage: S) -> Self {
        let items = match storage.read(CART_SLOT) {
            Ok(Some(contents)) => match serde_json::from_str(&contents) {
                Ok(items) => items,
                Err(e) => {
                    eprintln!("furnish: warning: resetting malformed cart slot: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                eprintln!("furnish: warning: cart slot unavailable, starting empty: {e}");
                Vec::new()
            }
        };

        Self { storage, items }
    }

    /// Add one unit of an item; an existing id has its quantity
    /// incremented rather than gaining a duplicate row.
    pub fn add(&mut self, item: NewCartItem) {
        apply(&mut self.items, CartAction::Add(item));
        self.persist();
    }

    /// Remove a line. No-op (not an error) if the id is absent.
    pub fn remove(&mut self, id: &str) {
        apply(&mut self.items, CartAction::Remove { id: id.to_string() });
        self.persist();
    }

    /// Set a line's quantity; zero removes the line.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) {
        apply(
            &mut self.items,
            CartAction::SetQuantity {
                id: id.to_string(),
                quantity,
            },
        );
        self.persist();
    }

    /// Empty the cart and remove the durable slot entirely.
    pub fn clear(&mut self) {
        apply(&mut self.items, CartAction::Clear);
        if let Err(e) = self.storage.remove(CART_SLOT) {
            eprintln!("furnish: warning: failed to remove cart slot: {e}");
        }
    }

    /// Current line items, most recently added last.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Sum of price x quantity across all lines.
    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.items
            .iter()
            .map(|line| line.price * f64::from(line.quantity))
            .sum()
    }

    /// Price x quantity for one line, if present.
    #[must_use]
    pub fn line_subtotal(&self, id: &str) -> Option<f64> {
        self.items
            .iter()
            .find(|line| line.id == id)
            .map(|line| line.price * f64::from(line.quantity))
    }

    /// Re-serialize the full collection into the durable slot.
    ///
    /// Failures degrade to an in-memory-only session: the triggering
    /// mutation has already succeeded, the state just won't survive a
    /// restart.
    fn persist(&self) {
        let contents = match serde_json::to_string(&self.items) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("furnish: warning: failed to serialize cart: {e}");
                return;
            }
        };

        if let Err(e) = self.storage.write(CART_SLOT, &contents) {
            eprintln!("furnish: warning: cart not persisted, continuing in memory: {e}");
        }
    }
}

/// Accept a JSON number or a numeric string.
///
/// Slot contents are textual and values may have been serialized at
/// different stages of evolution with inconsistent types.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numberish {
        Number(f64),
        Text(String),
    }

    match Numberish::deserialize(deserializer)? {
        Numberish::Number(n) => Ok(n),
        Numberish::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Accept a JSON integer or a numeric string.
pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numberish {
        Number(u32),
        Text(String),
    }

    match Numberish::deserialize(deserializer)? {
        Numberish::Number(n) => Ok(n),
        Numberish::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Accept a JSON integer or a numeric string (millisecond timestamps).
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numberish {
        Number(i64),
        Text(String),
    }

    match Numberish::deserialize(deserializer)? {
        Numberish::Number(n) => Ok(n),
        Numberish::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryBackend, SlotStore};

    fn sofa() -> NewCartItem {
        NewCartItem {
            id: "p1".to_string(),
            name: "L-Shape Sofa".to_string(),
            price: 4500.0,
            image_url: "/Images/DotsSofa.jpeg".to_string(),
            color: Some("Charcoal".to_string()),
        }
    }

    fn table() -> NewCartItem {
        NewCartItem {
            id: "p2".to_string(),
            name: "Center Table".to_string(),
            price: 1200.0,
            image_url: "/Images/Table.jpg".to_string(),
            color: None,
        }
    }

    #[test]
    fn add_new_item_has_quantity_one() {
        let mut items = Vec::new();
        apply(&mut items, CartAction::Add(sofa()));

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "p1");
        assert_eq!(items[0].quantity, 1);
    }

    #[test]
    fn add_existing_item_increments_quantity() {
        let mut items = Vec::new();
        for _ in 0..3 {
            apply(&mut items, CartAction::Add(sofa()));
        }

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);
    }

    #[test]
    fn add_preserves_other_fields() {
        let mut items = Vec::new();
        apply(&mut items, CartAction::Add(sofa()));

        let mut changed = sofa();
        changed.name = "Renamed".to_string();
        changed.price = 9999.0;
        apply(&mut items, CartAction::Add(changed));

        assert_eq!(items[0].name, "L-Shape Sofa");
        assert!((items[0].price - 4500.0).abs() < f64::EPSILON);
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn add_generates_fallback_id_when_empty() {
        let mut items = Vec::new();
        let mut item = sofa();
        item.id = String::new();
        apply(&mut items, CartAction::Add(item));

        assert_eq!(items.len(), 1);
        assert!(!items[0].id.is_empty());
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let mut items = Vec::new();
        apply(&mut items, CartAction::Add(sofa()));

        apply(
            &mut items,
            CartAction::Remove {
                id: "absent".to_string(),
            },
        );

        assert_eq!(items.len(), 1);
    }

    #[test]
    fn set_quantity_replaces() {
        let mut items = Vec::new();
        apply(&mut items, CartAction::Add(sofa()));
        apply(
            &mut items,
            CartAction::SetQuantity {
                id: "p1".to_string(),
                quantity: 7,
            },
        );

        assert_eq!(items[0].quantity, 7);
    }

    #[test]
    fn set_quantity_zero_removes() {
        let mut items = Vec::new();
        apply(&mut items, CartAction::Add(sofa()));
        apply(
            &mut items,
            CartAction::SetQuantity {
                id: "p1".to_string(),
                quantity: 0,
            },
        );

        assert!(items.is_empty());
    }

    #[test]
    fn set_quantity_unknown_id_is_noop() {
        let mut items = Vec::new();
        apply(&mut items, CartAction::Add(sofa()));
        apply(
            &mut items,
            CartAction::SetQuantity {
                id: "absent".to_string(),
                quantity: 4,
            },
        );

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 1);
    }

    #[test]
    fn store_persists_after_add() {
        let mut cart = CartStore::hydrate(MemoryBackend::new());
        cart.add(sofa());

        let blob = cart.storage.read(CART_SLOT).unwrap().unwrap();
        let stored: Vec<CartLineItem> = serde_json::from_str(&blob).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, "p1");
    }

    #[test]
    fn clear_removes_slot_entirely() {
        let mut cart = CartStore::hydrate(MemoryBackend::new());
        cart.add(sofa());
        cart.clear();

        assert!(cart.is_empty());
        // Full reset: the slot is gone, not mirrored as "[]"
        assert!(cart.storage.read(CART_SLOT).unwrap().is_none());
    }

    #[test]
    fn hydrate_corrupt_slot_starts_empty() {
        let storage = MemoryBackend::new();
        storage.write(CART_SLOT, "not json").unwrap();

        let cart = CartStore::hydrate(storage);
        assert!(cart.is_empty());
    }

    #[test]
    fn hydrate_coerces_stringified_numbers() {
        let storage = MemoryBackend::new();
        storage
            .write(
                CART_SLOT,
                r#"[{"id":"p1","name":"Sofa","price":"4500.5","imageUrl":"/i.jpg","quantity":"2"}]"#,
            )
            .unwrap();

        let cart = CartStore::hydrate(storage);
        assert_eq!(cart.items().len(), 1);
        assert!((cart.items()[0].price - 4500.5).abs() < f64::EPSILON);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn derived_totals() {
        let mut cart = CartStore::hydrate(MemoryBackend::new());
        cart.add(sofa());
        cart.add(sofa());
        cart.add(table());

        assert_eq!(cart.item_count(), 3);
        assert!((cart.total_price() - (2.0 * 4500.0 + 1200.0)).abs() < f64::EPSILON);
        assert_eq!(cart.line_subtotal("p1"), Some(9000.0));
        assert_eq!(cart.line_subtotal("absent"), None);
    }

    #[test]
    fn round_trip_through_slot() {
        let storage = MemoryBackend::new();
        {
            let mut cart = CartStore::hydrate(&storage);
            cart.add(sofa());
            cart.add(table());
            cart.set_quantity("p2", 3);
        }

        let cart = CartStore::hydrate(&storage);
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[1].quantity, 3);
        assert_eq!(cart.items()[0].color.as_deref(), Some("Charcoal"));
    }
}

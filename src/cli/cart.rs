//! `furnish cart` command implementations.

use crate::catalog;
use crate::config::load_config;
use crate::core::cart::CartStore;
use crate::error::{Error, Result};
use crate::storage::FileBackend;

fn open_cart() -> Result<CartStore<FileBackend>> {
    let config = load_config()?;
    let storage = FileBackend::new(config.storage.path)?;
    Ok(CartStore::hydrate(storage))
}

/// Add one unit of a catalog product to the cart.
///
/// # Errors
///
/// Returns an error if the product id is unknown or storage setup fails.
pub fn add(product_id: &str, color: Option<&str>) -> Result<()> {
    let product = catalog::find(product_id)
        .ok_or_else(|| Error::UnknownProduct(product_id.to_string()))?;

    let mut cart = open_cart()?;
    cart.add(product.cart_item(color.map(str::to_string)));

    println!("Added {} to cart.", product.title);
    print_summary_line(&cart);
    Ok(())
}

/// Remove a line from the cart. Removing an absent id is a quiet no-op.
///
/// # Errors
///
/// Returns an error if storage setup fails.
pub fn remove(id: &str) -> Result<()> {
    let mut cart = open_cart()?;
    cart.remove(id);

    println!("Removed {id} from cart.");
    print_summary_line(&cart);
    Ok(())
}

/// Set a line's quantity. Zero or negative input removes the line.
///
/// # Errors
///
/// Returns an error if storage setup fails.
pub fn set_quantity(id: &str, quantity: i64) -> Result<()> {
    let mut cart = open_cart()?;

    // Negative input means removal, same as zero
    let clamped = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
    cart.set_quantity(id, clamped);

    if clamped == 0 {
        println!("Removed {id} from cart.");
    } else {
        println!("Set quantity of {id} to {clamped}.");
    }
    print_summary_line(&cart);
    Ok(())
}

/// Show the cart contents and totals.
///
/// # Errors
///
/// Returns an error if storage setup fails.
pub fn show() -> Result<()> {
    let cart = open_cart()?;

    if cart.is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }

    println!("{:<6} {:<36} {:>10} {:>5} {:>12}", "Id", "Item", "Price", "Qty", "Subtotal");
    println!("{}", "─".repeat(74));

    for line in cart.items() {
        let label = match &line.color {
            Some(color) => format!("{} ({color})", line.name),
            None => line.name.clone(),
        };
        println!(
            "{:<6} {:<36} {:>10.2} {:>5} {:>12.2}",
            line.id,
            label,
            line.price,
            line.quantity,
            line.price * f64::from(line.quantity)
        );
    }

    println!("{}", "─".repeat(74));
    println!(
        "{} item(s), total \u{9f3}{:.2}",
        cart.item_count(),
        cart.total_price()
    );
    Ok(())
}

/// Empty the cart and drop its durable slot.
///
/// # Errors
///
/// Returns an error if storage setup fails.
pub fn clear() -> Result<()> {
    let mut cart = open_cart()?;
    cart.clear();
    println!("Cart cleared.");
    Ok(())
}

fn print_summary_line<S: crate::storage::SlotStore>(cart: &CartStore<S>) {
    println!(
        "Cart: {} item(s), total \u{9f3}{:.2}",
        cart.item_count(),
        cart.total_price()
    );
}

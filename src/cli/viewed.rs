//! `furnish viewed` command implementations.

use crate::catalog;
use crate::config::load_config;
use crate::core::recently_viewed::RecentlyViewedStore;
use crate::error::{Error, Result};
use crate::storage::FileBackend;
use chrono::{DateTime, Local};

fn open_store() -> Result<RecentlyViewedStore<FileBackend>> {
    let config = load_config()?;
    let storage = FileBackend::new(config.storage.path)?;
    Ok(RecentlyViewedStore::hydrate(
        storage,
        config.recently_viewed.capacity,
    ))
}

/// Record a catalog product as viewed.
///
/// # Errors
///
/// Returns an error if the product id is unknown or storage setup fails.
pub fn add(product_id: &str) -> Result<()> {
    let product = catalog::find(product_id)
        .ok_or_else(|| Error::UnknownProduct(product_id.to_string()))?;

    let mut viewed = open_store()?;
    viewed.add(product.viewed_snapshot());

    println!("Recorded view of {}.", product.title);
    println!("Recently viewed: {} product(s)", viewed.count());
    Ok(())
}

/// Remove an entry from the recently-viewed list.
///
/// # Errors
///
/// Returns an error if storage setup fails.
pub fn remove(id: &str) -> Result<()> {
    let mut viewed = open_store()?;
    viewed.remove(id);

    println!("Removed {id} from recently viewed.");
    Ok(())
}

/// Show the recently-viewed list, most recent first.
///
/// # Errors
///
/// Returns an error if storage setup fails.
pub fn show() -> Result<()> {
    let viewed = open_store()?;

    if viewed.count() == 0 {
        println!("No recently viewed products.");
        return Ok(());
    }

    println!("{:<6} {:<36} {:<12} {:<18}", "Id", "Product", "Category", "Viewed");
    println!("{}", "─".repeat(74));

    for entry in viewed.items() {
        println!(
            "{:<6} {:<36} {:<12} {:<18}",
            entry.id,
            entry.name,
            entry.category,
            format_viewed_at(entry.viewed_at)
        );
    }

    println!("{}", "─".repeat(74));
    println!("Showing {} product(s)", viewed.count());
    Ok(())
}

/// Clear the recently-viewed list and drop its durable slot.
///
/// # Errors
///
/// Returns an error if storage setup fails.
pub fn clear() -> Result<()> {
    let mut viewed = open_store()?;
    viewed.clear();
    println!("Recently viewed cleared.");
    Ok(())
}

/// Format an epoch-millisecond timestamp as local time for display.
fn format_viewed_at(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis).map_or_else(
        || "(unknown)".to_string(),
        |utc| {
            let local: DateTime<Local> = utc.into();
            local.format("%Y-%m-%d %H:%M").to_string()
        },
    )
}

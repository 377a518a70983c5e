//! `furnish products` command implementation.

use crate::catalog;
use crate::error::Result;

/// List catalog products, optionally filtered by category.
///
/// # Errors
///
/// Infallible today; `Result` keeps the command signature uniform.
pub fn run(category: Option<&str>) -> Result<()> {
    let products: Vec<&catalog::Product> = match category {
        Some(cat) => catalog::by_category(cat),
        None => catalog::PRODUCTS.iter().collect(),
    };

    if products.is_empty() {
        println!("No products found.");
        return Ok(());
    }

    print_products(&products);
    Ok(())
}

pub(crate) fn print_products(products: &[&catalog::Product]) {
    println!(
        "{:<6} {:<32} {:<12} {:>10} {:>8}",
        "Id", "Product", "Category", "Price", "Reviews"
    );
    println!("{}", "─".repeat(72));

    for product in products {
        println!(
            "{:<6} {:<32} {:<12} {:>10} {:>8}",
            product.id, product.title, product.category, product.price, product.reviews
        );
    }

    println!("{}", "─".repeat(72));
    println!("{} product(s)", products.len());
}

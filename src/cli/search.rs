//! `furnish search` command implementation.

use crate::catalog;
use crate::cli::products::print_products;
use crate::error::Result;

/// Search the catalog by title, description, or category.
///
/// # Errors
///
/// Infallible today; `Result` keeps the command signature uniform.
pub fn run(query: &str) -> Result<()> {
    let results = catalog::search(query);

    if results.is_empty() {
        println!("No products matched \"{query}\".");
        return Ok(());
    }

    print_products(&results);
    Ok(())
}

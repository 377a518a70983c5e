//! furnish CLI - Furniture storefront session engine.

use clap::{Parser, Subcommand};
use furnish::cli;
use std::process::ExitCode;

/// Get the version string.
///
/// - Release builds (on a git tag): "0.1.0"
/// - Development builds: "0.1.0-dev (abc1234)"
/// - Dirty working directory: "0.1.0-dev (abc1234-dirty)"
fn version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("FURNISH_GIT_HASH");
    const IS_RELEASE: &str = env!("FURNISH_IS_RELEASE");

    // Use a static to avoid repeated allocations
    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" {
            VERSION.to_string()
        } else {
            format!("{VERSION}-dev ({GIT_HASH})")
        }
    })
}

#[derive(Parser)]
#[command(name = "furnish")]
#[command(author, version = version(), about = "Furniture storefront session engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart.
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },

    /// Manage the recently-viewed product list.
    Viewed {
        #[command(subcommand)]
        command: ViewedCommands,
    },

    /// List catalog products.
    Products {
        /// Only show products in this category.
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Search the catalog by title, description, or category.
    Search {
        /// Search query.
        query: String,
    },

    /// Walk the checkout wizard and place the order.
    Checkout {
        /// Saved address id.
        #[arg(short, long)]
        address: String,

        /// Payment method id (bkash, nagad, rocket, card, bank, cod).
        #[arg(short, long)]
        payment: String,

        /// Delivery method (standard, express, premium). Defaults to standard.
        #[arg(short, long, default_value = "standard")]
        delivery: String,

        /// Coupon code to apply.
        #[arg(long)]
        coupon: Option<String>,

        /// Special delivery instructions.
        #[arg(long)]
        instructions: Option<String>,
    },
}

#[derive(Subcommand)]
enum CartCommands {
    /// Add one unit of a catalog product.
    Add {
        /// Catalog product id.
        product_id: String,

        /// Variant color.
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Remove a line from the cart.
    Remove {
        /// Line item id.
        id: String,
    },

    /// Set a line's quantity. Zero or negative removes the line.
    Qty {
        /// Line item id.
        id: String,

        /// New quantity.
        quantity: i64,
    },

    /// Show the cart contents and totals.
    Show,

    /// Empty the cart.
    Clear,
}

#[derive(Subcommand)]
enum ViewedCommands {
    /// Record a catalog product as viewed.
    Add {
        /// Catalog product id.
        product_id: String,
    },

    /// Remove an entry.
    Remove {
        /// Product id.
        id: String,
    },

    /// Show the list, most recent first.
    Show,

    /// Clear the list.
    Clear,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Cart { command } => match command {
            CartCommands::Add { product_id, color } => {
                cli::cart::add(&product_id, color.as_deref())
            }
            CartCommands::Remove { id } => cli::cart::remove(&id),
            CartCommands::Qty { id, quantity } => cli::cart::set_quantity(&id, quantity),
            CartCommands::Show => cli::cart::show(),
            CartCommands::Clear => cli::cart::clear(),
        },
        Commands::Viewed { command } => match command {
            ViewedCommands::Add { product_id } => cli::viewed::add(&product_id),
            ViewedCommands::Remove { id } => cli::viewed::remove(&id),
            ViewedCommands::Show => cli::viewed::show(),
            ViewedCommands::Clear => cli::viewed::clear(),
        },
        Commands::Products { category } => cli::products::run(category.as_deref()),
        Commands::Search { query } => cli::search::run(&query),
        Commands::Checkout {
            address,
            payment,
            delivery,
            coupon,
            instructions,
        } => cli::checkout::run(
            &address,
            &payment,
            &delivery,
            coupon.as_deref(),
            instructions.as_deref(),
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("furnish: error: {e}");
            ExitCode::FAILURE
        }
    }
}

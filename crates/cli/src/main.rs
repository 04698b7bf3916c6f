//! Moemen Store CLI - cart management and catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! moemen cart show
//!
//! # Add a product variant to the cart
//! moemen cart add -p 1 -s Medium -c white -q 2
//!
//! # Replace the quantity of a line
//! moemen cart update -p 1 -s Medium -c white -q 3
//!
//! # Remove a line
//! moemen cart remove -p 1 -s Medium -c white
//!
//! # Show the order summary, optionally with a promo code
//! moemen cart summary --promo MOEMEN
//!
//! # List the catalog
//! moemen catalog list --category t-shirts
//! ```
//!
//! # Commands
//!
//! - `cart show` - Print cart contents
//! - `cart add` - Add a product variant (merges with an existing line)
//! - `cart update` - Replace a line's quantity
//! - `cart remove` - Delete a line
//! - `cart summary` - Print the order summary
//! - `catalog list` - List catalog products

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "moemen")]
#[command(author, version, about = "Moemen Store CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Browse the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print cart contents
    Show,
    /// Add a product variant to the cart
    Add {
        /// Catalog product id
        #[arg(short, long)]
        product: String,

        /// Variant size (e.g., Medium)
        #[arg(short, long)]
        size: String,

        /// Variant color (e.g., white)
        #[arg(short, long)]
        color: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Replace the quantity of a cart line
    Update {
        /// Catalog product id
        #[arg(short, long)]
        product: String,

        /// Variant size
        #[arg(short, long)]
        size: String,

        /// Variant color
        #[arg(short, long)]
        color: String,

        /// New quantity (must be at least 1)
        #[arg(short, long)]
        quantity: u32,
    },
    /// Delete a cart line
    Remove {
        /// Catalog product id
        #[arg(short, long)]
        product: String,

        /// Variant size
        #[arg(short, long)]
        size: String,

        /// Variant color
        #[arg(short, long)]
        color: String,
    },
    /// Print the order summary
    Summary {
        /// Promo code to apply (e.g., MOEMEN)
        #[arg(long)]
        promo: Option<String>,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List catalog products
    List {
        /// Only show products in this category
        #[arg(long)]
        category: Option<String>,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show()?,
            CartAction::Add {
                product,
                size,
                color,
                quantity,
            } => commands::cart::add(&product, &size, &color, quantity)?,
            CartAction::Update {
                product,
                size,
                color,
                quantity,
            } => commands::cart::update(&product, &size, &color, quantity)?,
            CartAction::Remove {
                product,
                size,
                color,
            } => commands::cart::remove(&product, &size, &color)?,
            CartAction::Summary { promo } => commands::cart::summary(promo.as_deref())?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List { category } => commands::catalog::list(category.as_deref()),
        },
    }
    Ok(())
}

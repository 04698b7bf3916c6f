//! Catalog browsing commands.

#![allow(clippy::print_stdout)]

use moemen_storefront::catalog::Catalog;

/// List catalog products, optionally filtered by category.
pub fn list(category: Option<&str>) {
    let catalog = Catalog::builtin();

    let mut shown = 0usize;
    for product in catalog.all() {
        if let Some(category) = category
            && product.category != category
        {
            continue;
        }
        let sale = product
            .original_price
            .map(|was| format!(" (was {was})"))
            .unwrap_or_default();
        println!(
            "{:>4}  {:<32} {}{}  [{}]",
            product.id, product.name, product.price, sale, product.category
        );
        shown += 1;
    }

    if shown == 0 {
        match category {
            Some(category) => println!("No products in category \"{category}\"."),
            None => println!("The catalog is empty."),
        }
    }
}

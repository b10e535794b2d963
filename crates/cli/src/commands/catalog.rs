//! Catalog inspection commands.

use kinetic_storefront::catalog::{self, CatalogSource};
use kinetic_storefront::search::{self, SearchTerm};

use super::CommandError;

/// Load the catalog and print a per-category summary.
///
/// Fails with the load error when the document is unreadable, malformed or
/// breaks a product invariant (duplicate id, price out of range, bad sale
/// price).
#[allow(clippy::print_stdout)]
pub async fn validate(source: &CatalogSource) -> Result<(), CommandError> {
    tracing::info!(%source, "Validating catalog");
    let catalog = catalog::fetch(source).await?;

    let on_sale = catalog
        .visible()
        .filter(|product| product.price_tag().is_on_sale())
        .count();

    println!("{} products ({} on sale)", catalog.len(), on_sale);
    for category in catalog.categories() {
        let (visible, hidden) = catalog
            .products()
            .iter()
            .filter(|product| product.category == category)
            .fold((0, 0), |(visible, hidden), product| {
                if product.is_visible() {
                    (visible + 1, hidden)
                } else {
                    (visible, hidden + 1)
                }
            });
        println!("  {category}: {visible} visible, {hidden} hidden");
    }
    Ok(())
}

/// Print the products a storefront search for `query` would show.
#[allow(clippy::print_stdout)]
pub async fn search(source: &CatalogSource, query: &str) -> Result<(), CommandError> {
    let catalog = catalog::fetch(source).await?;

    let Some(term) = SearchTerm::parse(query) else {
        println!("Blank query: the storefront shows the category view");
        return Ok(());
    };

    let matches = search::filter(&catalog, &term);
    if matches.is_empty() {
        println!("No products found.");
        return Ok(());
    }

    for product in matches {
        let tag = product.price_tag();
        let badge = tag.badge().map(|badge| format!(" {badge}")).unwrap_or_default();
        println!(
            "{:>4}  {:<32} {:<24} {}{}",
            product.id,
            product.name,
            product.category,
            tag.effective(),
            badge
        );
    }
    Ok(())
}

//! Fragment preview commands.

use kinetic_core::ProductId;
use kinetic_storefront::catalog::{self, CatalogSource};
use kinetic_storefront::render::{self, CardStyle, GridRegion, Placeholder};

use super::CommandError;

/// Print the grid markup for `category` in the given card style.
#[allow(clippy::print_stdout)]
pub async fn grid(source: &CatalogSource, category: &str, style: &str) -> Result<(), CommandError> {
    let style: CardStyle = style.parse()?;
    let catalog = catalog::fetch(source).await?;

    let region = render::CATEGORY_SECTIONS
        .iter()
        .find(|section| section.category == category)
        .map_or(GridRegion::Exchange, |section| section.region);
    let items = catalog.visible_in_category(category);
    let fragment = render::render_grid(region, &items, style, Placeholder::ComingSoon)?;

    tracing::info!(%region, cards = fragment.card_count, "Rendered grid");
    println!("{}", fragment.html);
    Ok(())
}

/// Print the quick-view modal body for product `id`.
#[allow(clippy::print_stdout)]
pub async fn modal(source: &CatalogSource, id: i32) -> Result<(), CommandError> {
    let catalog = catalog::fetch(source).await?;
    let product = catalog
        .find(ProductId::new(id))
        .ok_or(CommandError::UnknownProduct(id))?;

    println!("{}", render::render_modal(product)?);
    Ok(())
}

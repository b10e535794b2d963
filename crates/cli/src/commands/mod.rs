//! CLI command implementations.

pub mod catalog;
pub mod render;

use kinetic_storefront::catalog::CatalogSource;
use thiserror::Error;

/// Catalog used when neither `--source` nor `CATALOG_SOURCE` is set.
const DEFAULT_SOURCE: &str = "data/products.json";

/// Errors shared by the commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid catalog source: {0}")]
    InvalidSource(#[from] url::ParseError),

    #[error(transparent)]
    Load(#[from] kinetic_storefront::catalog::LoadError),

    #[error(transparent)]
    Render(#[from] kinetic_storefront::render::RenderError),

    #[error("unknown product id {0}")]
    UnknownProduct(i32),

    #[error(transparent)]
    CardStyle(#[from] kinetic_storefront::render::UnknownCardStyle),
}

/// Resolve the catalog location: the flag, then `CATALOG_SOURCE`, then the
/// default file.
pub fn resolve_source(source: Option<&str>) -> Result<CatalogSource, CommandError> {
    let location = source.map_or_else(
        || std::env::var("CATALOG_SOURCE").unwrap_or_else(|_| DEFAULT_SOURCE.to_string()),
        str::to_string,
    );
    Ok(CatalogSource::parse(&location)?)
}

//! Display data handed to templates.

use kinetic_core::{CartItem, PriceTag, Product};

/// Description shown in the modal when a product has none.
const FALLBACK_DESCRIPTION: &str = "Premium quality fabric, designed for the driven.";

/// Formatted pricing for any render context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceView {
    /// List price, e.g. `₦5,000`.
    pub original: String,
    /// Sale price when on sale.
    pub sale: Option<String>,
    /// Discount badge such as `-20%` when on sale.
    pub badge: Option<String>,
    /// What the shopper pays.
    pub effective: String,
}

impl From<PriceTag> for PriceView {
    fn from(tag: PriceTag) -> Self {
        Self {
            original: tag.original().display(),
            sale: tag.sale().map(|sale| sale.display()),
            badge: tag.badge(),
            effective: tag.effective().display(),
        }
    }
}

/// Product card display data (grid and search-result markup).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: i32,
    pub name: String,
    pub img: String,
    pub price: PriceView,
}

impl From<&Product> for CardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.get(),
            name: product.name.clone(),
            img: product.img.clone(),
            price: product.price_tag().into(),
        }
    }
}

/// Quick-view modal display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub name: String,
    pub img: String,
    pub description: String,
    pub price: PriceView,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
}

impl From<&Product> for ModalView {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            img: product.img.clone(),
            description: product
                .description
                .clone()
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string()),
            price: product.price_tag().into(),
            sizes: product.size_options().into_iter().map(String::from).collect(),
            colors: product.color_options().into_iter().map(String::from).collect(),
        }
    }
}

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub cart_id: u64,
    pub name: String,
    pub selection: String,
    pub price: String,
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            cart_id: item.cart_id.get(),
            name: item.name.clone(),
            selection: item.selection(),
            price: item.final_price().display(),
        }
    }
}

//! Catalog products.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::{CurrencyCode, PriceTag};

/// Size offered when a product lists no sizes.
pub const DEFAULT_SIZE: &str = "One Size";

/// Color offered when a product lists no colors.
pub const DEFAULT_COLOR: &str = "Standard";

/// A color variant as it appears in the catalog document (`{"color": "Black"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    pub color: String,
}

/// A product from the catalog document.
///
/// Products are immutable once loaded. Fields the storefront does not know
/// about are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    #[serde(default)]
    pub sale_price: Option<Decimal>,
    pub img: String,
    #[serde(default)]
    pub sizes: Option<Vec<String>>,
    #[serde(default)]
    pub colors: Option<Vec<ColorOption>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

impl Product {
    /// Pricing for this product in the store currency.
    #[must_use]
    pub fn price_tag(&self) -> PriceTag {
        PriceTag::new(self.price, self.sale_price, CurrencyCode::NGN)
    }

    /// The amount charged when this product is added to the cart.
    #[must_use]
    pub fn final_price(&self) -> Decimal {
        self.price_tag().effective().amount
    }

    /// Whether the product may appear in any grid or search result.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        !self.hidden
    }

    /// Sizes to offer in the quick-view modal.
    ///
    /// Falls back to a single [`DEFAULT_SIZE`] when the product lists none.
    #[must_use]
    pub fn size_options(&self) -> Vec<&str> {
        match self.sizes.as_deref() {
            Some(sizes) if !sizes.is_empty() => sizes.iter().map(String::as_str).collect(),
            _ => vec![DEFAULT_SIZE],
        }
    }

    /// Colors to offer in the quick-view modal.
    ///
    /// Falls back to a single [`DEFAULT_COLOR`] when the product lists none.
    #[must_use]
    pub fn color_options(&self) -> Vec<&str> {
        match self.colors.as_deref() {
            Some(colors) if !colors.is_empty() => {
                colors.iter().map(|option| option.color.as_str()).collect()
            }
            _ => vec![DEFAULT_COLOR],
        }
    }

    /// Whether `size` is one of the sizes offered for this product.
    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.size_options().contains(&size)
    }

    /// Whether `color` is one of the colors offered for this product.
    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.color_options().contains(&color)
    }

    /// Case-insensitive substring match on name or category.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tee() -> Product {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Tee",
            "category": "Street Wear",
            "price": 5000,
            "sale_price": 4000,
            "img": "img/tee.jpg",
            "hidden": false
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_minimal_product() {
        let product = tee();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Decimal::from(5000));
        assert_eq!(product.sale_price, Some(Decimal::from(4000)));
        assert!(product.sizes.is_none());
        assert!(product.description.is_none());
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 2,
            "name": "Cap",
            "category": "Brand Casuals",
            "price": 2500.5,
            "img": "img/cap.jpg",
            "stock": 12,
            "colors": [{"color": "Black", "hex": "#000"}]
        }))
        .unwrap();
        assert!(!product.hidden);
        assert_eq!(product.price, "2500.5".parse::<Decimal>().unwrap());
        assert_eq!(product.color_options(), vec!["Black"]);
    }

    #[test]
    fn test_final_price_prefers_sale() {
        assert_eq!(tee().final_price(), Decimal::from(4000));

        let mut full_price = tee();
        full_price.sale_price = None;
        assert_eq!(full_price.final_price(), Decimal::from(5000));
    }

    #[test]
    fn test_default_options() {
        let product = tee();
        assert_eq!(product.size_options(), vec![DEFAULT_SIZE]);
        assert_eq!(product.color_options(), vec![DEFAULT_COLOR]);
        assert!(product.offers_size("One Size"));
        assert!(!product.offers_size("M"));
    }

    #[test]
    fn test_listed_options_keep_order() {
        let mut product = tee();
        product.sizes = Some(vec!["S".into(), "M".into(), "L".into()]);
        product.colors = Some(vec![
            ColorOption {
                color: "Black".into(),
            },
            ColorOption {
                color: "Sand".into(),
            },
        ]);
        assert_eq!(product.size_options(), vec!["S", "M", "L"]);
        assert_eq!(product.color_options(), vec!["Black", "Sand"]);
        assert!(product.offers_color("Sand"));
        assert!(!product.offers_color(DEFAULT_COLOR));
    }

    #[test]
    fn test_empty_option_lists_fall_back_to_defaults() {
        let mut product = tee();
        product.sizes = Some(Vec::new());
        product.colors = Some(Vec::new());
        assert_eq!(product.size_options(), vec![DEFAULT_SIZE]);
        assert_eq!(product.color_options(), vec![DEFAULT_COLOR]);
    }

    #[test]
    fn test_matches_name_or_category() {
        let product = tee();
        assert!(product.matches_lowercase("tee"));
        assert!(product.matches_lowercase("street"));
        assert!(!product.matches_lowercase("gym"));
    }
}

//! The validated, read-only product catalog.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ProductId;
use super::product::Product;

/// Highest accepted product price, in naira.
///
/// Keeps cart totals far from `Decimal` overflow.
pub const MAX_PRICE: i64 = 1_000_000_000;

/// Errors raised when a catalog document breaks a product invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two products share an id.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    /// A product's price is zero or negative.
    #[error("product {id} has a non-positive price {price}")]
    InvalidPrice { id: ProductId, price: Decimal },
    /// A product's price is above [`MAX_PRICE`].
    #[error("product {id} has price {price} above the maximum of {max}", max = MAX_PRICE)]
    PriceTooHigh { id: ProductId, price: Decimal },
    /// A product's sale price is not strictly between zero and its price.
    #[error("product {id} has sale price {sale_price} not below price {price}")]
    InvalidSalePrice {
        id: ProductId,
        price: Decimal,
        sale_price: Decimal,
    },
}

/// The catalog document as served: `{"products": [...]}`.
///
/// A document without a `products` field is an empty catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// A validated list of products in document order.
///
/// Built once at startup and never mutated afterwards; a new load replaces
/// the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// An empty catalog, used when loading fails.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Validate products and build a catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if ids repeat, a price is not positive or is
    /// above [`MAX_PRICE`], or a sale price is not strictly below its price.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.price <= Decimal::ZERO {
                return Err(CatalogError::InvalidPrice {
                    id: product.id,
                    price: product.price,
                });
            }
            if product.price > Decimal::from(MAX_PRICE) {
                return Err(CatalogError::PriceTooHigh {
                    id: product.id,
                    price: product.price,
                });
            }
            if let Some(sale_price) = product.sale_price
                && (sale_price <= Decimal::ZERO || sale_price >= product.price)
            {
                return Err(CatalogError::InvalidSalePrice {
                    id: product.id,
                    price: product.price,
                    sale_price,
                });
            }
        }
        Ok(Self { products })
    }

    /// Validate a parsed catalog document.
    ///
    /// # Errors
    ///
    /// See [`Catalog::from_products`].
    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        Self::from_products(document.products)
    }

    /// All products, hidden ones included, in document order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products that may be shown anywhere.
    pub fn visible(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|product| product.is_visible())
    }

    /// Visible products whose category is exactly `category`.
    #[must_use]
    pub fn visible_in_category(&self, category: &str) -> Vec<&Product> {
        self.visible()
            .filter(|product| product.category == category)
            .collect()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Distinct categories in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }

    /// Number of products, hidden ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i32, category: &str, price: i64, sale: Option<i64>, hidden: bool) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Item {id}"),
            category: category.to_string(),
            price: Decimal::from(price),
            sale_price: sale.map(Decimal::from),
            img: format!("img/{id}.jpg"),
            sizes: None,
            colors: None,
            description: None,
            hidden,
        }
    }

    #[test]
    fn test_document_without_products_is_empty() {
        let document: CatalogDocument = serde_json::from_str("{}").unwrap();
        let catalog = Catalog::from_document(document).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Catalog::from_products(vec![
            product(1, "Street Wear", 100, None, false),
            product(1, "Brand Casuals", 200, None, false),
        ]);
        assert_eq!(result, Err(CatalogError::DuplicateId(ProductId::new(1))));
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let result = Catalog::from_products(vec![product(3, "Street Wear", 0, None, false)]);
        assert!(matches!(result, Err(CatalogError::InvalidPrice { .. })));
    }

    #[test]
    fn test_rejects_price_above_maximum() {
        let mut huge = product(6, "Street Wear", 100, None, false);
        huge.price = Decimal::MAX;
        assert!(matches!(
            Catalog::from_products(vec![huge]),
            Err(CatalogError::PriceTooHigh { .. })
        ));

        let result = Catalog::from_products(vec![product(7, "Street Wear", MAX_PRICE + 1, None, false)]);
        assert!(matches!(result, Err(CatalogError::PriceTooHigh { .. })));

        let catalog = Catalog::from_products(vec![product(8, "Street Wear", MAX_PRICE, None, false)]);
        assert_eq!(catalog.unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_sale_price_not_below_price() {
        let result = Catalog::from_products(vec![product(4, "Street Wear", 100, Some(100), false)]);
        assert!(matches!(result, Err(CatalogError::InvalidSalePrice { .. })));

        let result = Catalog::from_products(vec![product(5, "Street Wear", 100, Some(0), false)]);
        assert!(matches!(result, Err(CatalogError::InvalidSalePrice { .. })));
    }

    #[test]
    fn test_visible_in_category_skips_hidden() {
        let catalog = Catalog::from_products(vec![
            product(1, "Street Wear", 100, None, false),
            product(2, "Street Wear", 100, None, true),
            product(3, "Brand Casuals", 100, None, false),
        ])
        .unwrap();

        let street: Vec<_> = catalog
            .visible_in_category("Street Wear")
            .iter()
            .map(|p| p.id.get())
            .collect();
        assert_eq!(street, vec![1]);
        assert_eq!(catalog.visible().count(), 2);
    }

    #[test]
    fn test_find_and_categories() {
        let catalog = Catalog::from_products(vec![
            product(7, "Street Wear", 100, None, false),
            product(8, "Gym Wear for Traders", 100, None, false),
            product(9, "Street Wear", 100, None, true),
        ])
        .unwrap();

        assert_eq!(catalog.find(ProductId::new(8)).unwrap().id.get(), 8);
        assert!(catalog.find(ProductId::new(99)).is_none());
        assert_eq!(
            catalog.categories(),
            vec!["Street Wear", "Gym Wear for Traders"]
        );
        assert_eq!(catalog.len(), 3);
    }
}

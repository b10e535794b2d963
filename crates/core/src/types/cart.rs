//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CartId, ProductId};
use super::price::Price;
use super::product::Product;

/// One entry in the cart.
///
/// Carries a copy of the product's display fields taken at add time, the
/// customer's size and color selection, and the price that was charged. The
/// same product may appear in several entries; `cart_id` tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub name: String,
    pub category: String,
    pub img: String,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub selected_size: String,
    pub selected_color: String,
    /// Sale price if present, else price. Fixed when the item is added.
    pub final_price: Decimal,
}

impl CartItem {
    /// Snapshot `product` into a new cart entry.
    #[must_use]
    pub fn from_product(
        cart_id: CartId,
        product: &Product,
        selected_size: impl Into<String>,
        selected_color: impl Into<String>,
    ) -> Self {
        Self {
            cart_id,
            product_id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            img: product.img.clone(),
            price: product.price,
            sale_price: product.sale_price,
            selected_size: selected_size.into(),
            selected_color: selected_color.into(),
            final_price: product.final_price(),
        }
    }

    /// The charged price in the store currency.
    #[must_use]
    pub const fn final_price(&self) -> Price {
        Price::naira(self.final_price)
    }

    /// `M | Black` style selection summary.
    #[must_use]
    pub fn selection(&self) -> String {
        format!("{} | {}", self.selected_size, self.selected_color)
    }
}

//! Cart store: the ordered list of line items for one page.
//!
//! The store is pure state. Callers re-render the cart view after each
//! mutation; nothing here knows about markup.

use kinetic_core::{CartId, CartItem, Price, Product};
use rust_decimal::Decimal;

/// Line items in insertion order plus the id counter.
#[derive(Debug, Clone)]
pub struct CartStore {
    items: Vec<CartItem>,
    last_id: CartId,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            last_id: CartId::new(0),
        }
    }

    /// Append `product` with the given selection and return the new entry.
    ///
    /// The final price is fixed now; the entry gets a fresh id that is never
    /// reused during this cart's lifetime.
    pub fn add_item(
        &mut self,
        product: &Product,
        selected_size: impl Into<String>,
        selected_color: impl Into<String>,
    ) -> CartItem {
        self.last_id = self.last_id.next();
        let item = CartItem::from_product(self.last_id, product, selected_size, selected_color);
        self.items.push(item.clone());
        item
    }

    /// Remove the entry with `cart_id`.
    ///
    /// Unknown ids are ignored; returns whether an entry was removed.
    pub fn remove_item(&mut self, cart_id: CartId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.cart_id != cart_id);
        before != self.items.len()
    }

    /// Sum of final prices; zero when empty.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|item| item.final_price).sum()
    }

    /// The total in the store currency.
    #[must_use]
    pub fn total_price(&self) -> Price {
        Price::naira(self.total())
    }

    /// Number of line items (not distinct products).
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }
}

//! Core types for the Kinetic storefront.
//!
//! This module provides type-safe wrappers for the catalog and cart domain.

pub mod cart;
pub mod catalog;
pub mod email;
pub mod id;
pub mod price;
pub mod product;

pub use cart::CartItem;
pub use catalog::{Catalog, CatalogDocument, CatalogError, MAX_PRICE};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price, PriceTag, discount_percent};
pub use product::{ColorOption, DEFAULT_COLOR, DEFAULT_SIZE, Product};

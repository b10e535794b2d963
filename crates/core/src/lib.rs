//! Kinetic Core - Shared domain types.
//!
//! This crate provides the types used across all Kinetic components:
//! - `storefront` - The storefront server and its view renderer
//! - `cli` - Command-line tools for validating and previewing catalogs
//!
//! # Architecture
//!
//! The core crate contains only types and pure computations - no I/O, no
//! HTTP clients, no rendering. This keeps it lightweight and allows the
//! catalog and cart rules to be tested anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, products, the validated catalog,
//!   cart items and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

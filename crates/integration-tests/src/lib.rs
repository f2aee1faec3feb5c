//! Integration tests for the Urithi cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p urithi-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - End-to-end cart flows against in-memory storage
//! - `file_persistence` - Reloading stores from file-backed storage
//! - `cart_properties` - Property tests for merge and totals invariants
//!
//! This library holds the fixtures shared by those tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use rust_decimal::Decimal;
use urithi_cart::{CartLineInput, CartStore, MemoryStorage, StorageKeys};
use urithi_core::Quantity;

/// A candidate line priced in whole units.
///
/// # Panics
///
/// Panics if `quantity` is below 1.
#[must_use]
pub fn line(product: &str, price: i64, quantity: i64) -> CartLineInput {
    #[allow(clippy::expect_used)]
    let quantity = Quantity::new(quantity).expect("fixture quantity must be positive");
    CartLineInput::new(product, format!("Product {product}"), Decimal::from(price), quantity)
}

/// A fresh store over new in-memory storage, plus a handle to that storage.
#[must_use]
pub fn memory_store() -> (CartStore, MemoryStorage) {
    let storage = MemoryStorage::new();
    let store = CartStore::open(Arc::new(storage.clone()), StorageKeys::default());
    (store, storage)
}

/// Open another store over the same storage, like a second tab.
#[must_use]
pub fn reopen(storage: &MemoryStorage) -> CartStore {
    CartStore::open(Arc::new(storage.clone()), StorageKeys::default())
}

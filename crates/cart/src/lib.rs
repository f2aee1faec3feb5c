//! Urithi cart store library.
//!
//! The single source of truth for a shopper's cart: line items keyed by
//! product and variant, a persisted per-profile session identifier, derived
//! totals, and synchronous change notifications for whatever UI sits on top.
//!
//! # Modules
//!
//! - [`line`] - Cart line records and the merge key
//! - [`store`] - [`CartStore`], the mutation and query surface
//! - [`event`] - Structured change results handed to subscribers
//! - [`storage`] - localStorage-shaped key/value backends
//! - [`session`] - Lazily created, persisted session identifiers
//! - [`summary`] - Shipping and order totals for cart and checkout pages
//! - [`config`] - Environment-driven configuration
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use rust_decimal::Decimal;
//! use urithi_cart::{CartLineInput, CartStore, MemoryStorage, StorageKeys};
//! use urithi_core::Quantity;
//!
//! let mut cart = CartStore::open(Arc::new(MemoryStorage::new()), StorageKeys::default());
//! cart.add_item(CartLineInput::new("P1", "Beaded necklace", Decimal::from(100), Quantity::ONE));
//! cart.add_item(CartLineInput::new("P1", "Beaded necklace", Decimal::from(100), Quantity::new(2).unwrap()));
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.item_count(), 3);
//! assert_eq!(cart.subtotal(), Decimal::from(300));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod event;
pub mod line;
pub mod session;
pub mod storage;
pub mod store;
pub mod summary;

pub use config::{CartConfig, ConfigError};
pub use error::{Error, Result};
pub use event::{CartChange, ChangeKind};
pub use line::{CartLine, CartLineInput, LineKey};
pub use session::SessionIds;
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, StorageKeys};
pub use store::{CartStore, SubscriptionId};
pub use summary::{OrderSummary, Priced, ShippingPolicy, SummaryItem};

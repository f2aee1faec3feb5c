//! CLI subcommand implementations.

pub mod cart;
pub mod session;

use std::sync::Arc;

use urithi_cart::{CartConfig, CartStore, FileStorage};

/// Open the file-backed store described by `config`.
///
/// Cart changes are reported through `tracing` as they happen, the way the
/// storefront shows a toast.
///
/// # Errors
///
/// Returns an error if the storage directory cannot be created.
pub fn open_store(config: &CartConfig) -> Result<CartStore, urithi_cart::Error> {
    let storage = FileStorage::new(config.storage_dir.clone())?;
    let mut store = CartStore::open(Arc::new(storage), config.keys.clone());
    store.subscribe(|change, _| {
        tracing::info!(kind = %change.kind(), "{}: {}", change.title(), change.message());
    });
    Ok(store)
}

//! Cart commands.
//!
//! Each command opens the store, applies at most one mutation, and reports
//! the result. Unknown line ids are reported as errors here even though the
//! store treats them as silent no-ops.

use thiserror::Error;
use tracing::info;

use urithi_cart::{CartConfig, CartLineInput};
use urithi_core::{ArtisanId, LineId, Price, Quantity, QuantityError};

use super::open_store;
use crate::AddArgs;

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Quantity argument out of range.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(#[from] QuantityError),

    /// The store rejected the line (empty product id or negative price).
    #[error("Rejected cart line for product {0}")]
    Rejected(String),

    /// No line with that id.
    #[error("No cart line with id {0}")]
    UnknownLine(String),

    #[error(transparent)]
    Cart(#[from] urithi_cart::Error),
}

/// List lines and totals.
///
/// # Errors
///
/// Returns an error if the storage directory cannot be opened.
pub fn show(config: &CartConfig) -> Result<(), CartCommandError> {
    let store = open_store(config)?;
    let price = |amount| Price::new(amount, config.currency).display();

    if store.is_empty() {
        info!("Your cart is empty");
        return Ok(());
    }

    for line in store.lines() {
        let variant = line
            .variant
            .as_deref()
            .map(|v| format!(" ({v})"))
            .unwrap_or_default();
        let artisan = if line.artisan_name.is_empty() {
            String::new()
        } else {
            format!(" by {}", line.artisan_name)
        };
        info!(
            "{}  {}{}{}  {} x {} = {}",
            line.id,
            line.name,
            variant,
            artisan,
            line.quantity,
            price(line.unit_price),
            price(line.line_total()),
        );
    }

    let summary = store.summary(&config.shipping);
    let noun = if summary.item_count == 1 { "item" } else { "items" };
    info!("{} {noun} in your cart", summary.item_count);
    info!("Subtotal: {}", price(summary.subtotal));
    if summary.ships_free() {
        info!("Shipping: Free");
    } else {
        info!("Shipping: {}", price(summary.shipping));
    }
    if let Some(remaining) = summary.remaining_for_free_shipping {
        info!("Add {} more for free shipping", price(remaining));
    }
    info!("Total: {}", price(summary.total));
    Ok(())
}

/// Add an item.
///
/// # Errors
///
/// Returns an error if the quantity is out of range, the store rejects the
/// line, or the storage directory cannot be opened.
pub fn add(config: &CartConfig, args: AddArgs) -> Result<(), CartCommandError> {
    let quantity = Quantity::new(args.quantity)?;
    let mut input = CartLineInput::new(args.product, args.name, args.price, quantity)
        .with_artisan(args.artisan_id.map(ArtisanId::new), args.artisan_name)
        .with_image(args.image);
    if let Some(variant) = args.variant {
        input = input.with_variant(variant);
    }

    let product = input.product_id.to_string();
    let mut store = open_store(config)?;
    let change = store
        .add_item(input)
        .ok_or(CartCommandError::Rejected(product))?;

    if let Some(line) = change.line() {
        info!(line_id = %line.id, quantity = line.quantity.get(), "Line saved");
    }
    Ok(())
}

/// Set a line's quantity; values below 1 remove it.
///
/// # Errors
///
/// Returns an error if no line has that id or the storage directory cannot
/// be opened.
pub fn update(config: &CartConfig, line_id: &str, quantity: i64) -> Result<(), CartCommandError> {
    let mut store = open_store(config)?;
    store
        .update_quantity(&LineId::new(line_id), quantity)
        .map(|_| ())
        .ok_or_else(|| CartCommandError::UnknownLine(line_id.to_string()))
}

/// Remove a line.
///
/// # Errors
///
/// Returns an error if no line has that id or the storage directory cannot
/// be opened.
pub fn remove(config: &CartConfig, line_id: &str) -> Result<(), CartCommandError> {
    let mut store = open_store(config)?;
    store
        .remove_item(&LineId::new(line_id))
        .map(|_| ())
        .ok_or_else(|| CartCommandError::UnknownLine(line_id.to_string()))
}

/// Remove every line.
///
/// # Errors
///
/// Returns an error if the storage directory cannot be opened.
pub fn clear(config: &CartConfig) -> Result<(), CartCommandError> {
    let mut store = open_store(config)?;
    store.clear();
    Ok(())
}

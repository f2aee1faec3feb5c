//! The cart store.
//!
//! [`CartStore`] owns the ordered list of cart lines for one browser profile.
//! It is constructed once at startup, loads whatever was persisted, and
//! writes the full collection back after every mutation. Subscribers are
//! called synchronously after each write, in subscription order.
//!
//! Nothing here returns an error to the caller: unreadable storage starts an
//! empty cart, failed writes are logged, and invalid input is ignored.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, error, warn};
use uuid::Uuid;

use urithi_core::{LineId, ProductId, Quantity, SessionId};

use crate::event::CartChange;
use crate::line::{CartLine, CartLineInput};
use crate::session::SessionIds;
use crate::storage::{Storage, StorageKeys};
use crate::summary::{OrderSummary, ShippingPolicy};

/// Callback invoked after every change with the change and the current lines.
pub type Subscriber = Box<dyn FnMut(&CartChange, &[CartLine]) + Send>;

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Single source of truth for the shopping cart.
pub struct CartStore {
    storage: Arc<dyn Storage>,
    keys: StorageKeys,
    lines: Vec<CartLine>,
    sessions: SessionIds,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl CartStore {
    /// Open the store, loading any persisted lines.
    ///
    /// Missing, unreadable or corrupt state yields an empty cart.
    pub fn open(storage: Arc<dyn Storage>, keys: StorageKeys) -> Self {
        let lines = load_lines(storage.as_ref(), &keys.cart);
        let sessions = SessionIds::new(Arc::clone(&storage), keys.session.clone());
        debug!(lines = lines.len(), key = %keys.cart, "Opened cart store");

        Self {
            storage,
            keys,
            lines,
            sessions,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a candidate line.
    ///
    /// A line with the same (`product_id`, `variant`) absorbs the candidate's
    /// quantity; otherwise the candidate is appended with a fresh id.
    /// Returns `None` (and changes nothing) for a negative unit price or an
    /// empty product id.
    pub fn add_item(&mut self, input: CartLineInput) -> Option<CartChange> {
        if let Err(reason) = validate(&input.product_id, input.unit_price) {
            warn!(product_id = %input.product_id, reason, "Ignoring invalid cart line");
            return None;
        }

        let key = input.key();
        let change = if let Some(existing) = self.lines.iter_mut().find(|l| l.key() == key) {
            existing.quantity = existing.quantity.saturating_add(input.quantity);
            debug!(
                line_id = %existing.id,
                quantity = existing.quantity.get(),
                "Merged into existing cart line"
            );
            CartChange::QuantityIncreased {
                line: existing.clone(),
                added: input.quantity.get(),
            }
        } else {
            let line = CartLine::from_input(new_line_id(), input);
            debug!(line_id = %line.id, product_id = %line.product_id, "Added cart line");
            self.lines.push(line.clone());
            CartChange::Added { line }
        };

        self.commit(Some(change))
    }

    /// Remove a line. Unknown ids are a silent no-op returning `None`.
    pub fn remove_item(&mut self, id: &LineId) -> Option<CartChange> {
        let index = self.lines.iter().position(|l| &l.id == id);
        let removed = index.map(|index| self.lines.remove(index));

        if let Some(line) = &removed {
            debug!(line_id = %line.id, "Removed cart line");
        }
        self.commit(removed.map(|line| CartChange::Removed { line }))
    }

    /// Replace a line's quantity. Anything below 1 removes the line.
    ///
    /// Quantities above `u32::MAX` are clamped. Unknown ids return `None`.
    pub fn update_quantity(&mut self, id: &LineId, quantity: i64) -> Option<CartChange> {
        let Some(quantity) = Quantity::clamped(quantity) else {
            return self.remove_item(id);
        };

        let change = self.lines.iter_mut().find(|l| &l.id == id).map(|line| {
            line.quantity = quantity;
            debug!(line_id = %line.id, quantity = quantity.get(), "Set cart line quantity");
            CartChange::QuantitySet { line: line.clone() }
        });
        self.commit(change)
    }

    /// Remove every line. The session id is left alone.
    pub fn clear(&mut self) -> CartChange {
        self.lines.clear();
        debug!("Cleared cart");
        self.persist();
        let change = CartChange::Cleared;
        self.notify(&change);
        change
    }

    /// Re-read the persisted collection, replacing the in-memory one.
    ///
    /// Lets a host reconcile after another tab of the same profile wrote to
    /// the shared storage.
    pub fn reload(&mut self) -> CartChange {
        self.lines = load_lines(self.storage.as_ref(), &self.keys.cart);
        let change = CartChange::Synced {
            lines: self.lines.len(),
        };
        self.notify(&change);
        change
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn get(&self, id: &LineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity.get())).sum()
    }

    /// Sum of `unit_price * quantity` over all lines. Not rounded.
    ///
    /// Saturates at `Decimal::MAX` instead of overflowing.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Order totals for the current lines.
    #[must_use]
    pub fn summary(&self, policy: &ShippingPolicy) -> OrderSummary {
        OrderSummary::for_items(self.lines.as_slice(), policy)
    }

    /// The profile's session id, created and persisted on first call.
    pub fn session_id(&self) -> SessionId {
        self.sessions.get_or_create()
    }

    /// Storage keys this store reads and writes.
    #[must_use]
    pub const fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register a callback run after every change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&CartChange, &[CartLine]) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Drop a callback. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Persist, then notify if something changed.
    fn commit(&mut self, change: Option<CartChange>) -> Option<CartChange> {
        self.persist();
        if let Some(change) = &change {
            self.notify(change);
        }
        change
    }

    /// Overwrite the persisted collection. Failures are logged only.
    fn persist(&self) {
        let json = match serde_json::to_string(&self.lines) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "Failed to serialize cart");
                return;
            }
        };
        if let Err(e) = self.storage.set_item(&self.keys.cart, &json) {
            warn!(key = %self.keys.cart, error = %e, "Failed to persist cart");
        }
    }

    fn notify(&mut self, change: &CartChange) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(change, &self.lines);
        }
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("keys", &self.keys)
            .field("lines", &self.lines)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

fn new_line_id() -> LineId {
    LineId::new(format!("cart_{}", Uuid::new_v4().simple()))
}

fn validate(product_id: &ProductId, unit_price: Decimal) -> Result<(), &'static str> {
    if product_id.as_str().is_empty() {
        return Err("empty product id");
    }
    if unit_price.is_sign_negative() && !unit_price.is_zero() {
        return Err("negative unit price");
    }
    Ok(())
}

/// Load persisted lines, falling back to an empty cart.
fn load_lines(storage: &dyn Storage, key: &str) -> Vec<CartLine> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            error!(key, error = %e, "Failed to read persisted cart, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<CartLine>>(&raw) {
        Ok(lines) => merge_duplicate_keys(drop_invalid(lines)),
        Err(e) => {
            error!(key, error = %e, "Failed to parse persisted cart, starting empty");
            Vec::new()
        }
    }
}

/// Drop persisted lines that `add_item` would have refused.
fn drop_invalid(lines: Vec<CartLine>) -> Vec<CartLine> {
    lines
        .into_iter()
        .filter(|line| match validate(&line.product_id, line.unit_price) {
            Ok(()) => true,
            Err(reason) => {
                warn!(line_id = %line.id, reason, "Dropping invalid persisted cart line");
                false
            }
        })
        .collect()
}

/// Fold lines sharing a (`product_id`, `variant`) key into the first one.
fn merge_duplicate_keys(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut merged: Vec<CartLine> = Vec::with_capacity(lines.len());
    for line in lines {
        if let Some(existing) = merged.iter_mut().find(|l| l.key() == line.key()) {
            warn!(
                line_id = %line.id,
                into = %existing.id,
                "Merging duplicate persisted cart line"
            );
            existing.quantity = existing.quantity.saturating_add(line.quantity);
        } else {
            merged.push(line);
        }
    }
    merged
}

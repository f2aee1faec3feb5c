//! Order totals for the cart and checkout pages.
//!
//! Checkout takes its items as a parameter: the live [`CartStore`] lines, or
//! a fixed list of [`SummaryItem`]s when a page wants to show something else.
//!
//! [`CartStore`]: crate::CartStore

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use urithi_core::Quantity;

use crate::line::CartLine;

/// Default subtotal at which shipping becomes free.
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: i64 = 10_000;

/// Default flat shipping fee below the threshold.
pub const DEFAULT_SHIPPING_FEE: i64 = 500;

/// Anything that contributes `unit_price * quantity` to a subtotal.
pub trait Priced {
    fn unit_price(&self) -> Decimal;
    fn quantity(&self) -> Quantity;
}

impl Priced for CartLine {
    fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    fn quantity(&self) -> Quantity {
        self.quantity
    }
}

/// A fixed order line not backed by the cart store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryItem {
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: Quantity,
}

impl Priced for SummaryItem {
    fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    fn quantity(&self) -> Quantity {
        self.quantity
    }
}

/// Flat-rate shipping with a free-shipping threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    /// Subtotals at or above this ship free.
    pub free_shipping_threshold: Decimal,
    /// Charged below the threshold.
    pub flat_rate: Decimal,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::from(DEFAULT_FREE_SHIPPING_THRESHOLD),
            flat_rate: Decimal::from(DEFAULT_SHIPPING_FEE),
        }
    }
}

impl ShippingPolicy {
    /// Shipping charged for `subtotal`.
    #[must_use]
    pub fn shipping_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal >= self.free_shipping_threshold {
            Decimal::ZERO
        } else {
            self.flat_rate
        }
    }
}

/// Derived order totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub item_count: u64,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    /// How much more would unlock free shipping, if shipping is charged.
    pub remaining_for_free_shipping: Option<Decimal>,
}

impl OrderSummary {
    /// Compute totals for `items` under `policy`.
    #[must_use]
    pub fn for_items<T: Priced>(items: &[T], policy: &ShippingPolicy) -> Self {
        let item_count = items.iter().map(|i| u64::from(i.quantity().get())).sum();
        let subtotal = items
            .iter()
            .map(|i| i.unit_price().saturating_mul(Decimal::from(i.quantity().get())))
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let shipping = policy.shipping_for(subtotal);
        let remaining_for_free_shipping = (!shipping.is_zero())
            .then(|| policy.free_shipping_threshold.saturating_sub(subtotal));

        Self {
            item_count,
            subtotal,
            shipping,
            total: subtotal.saturating_add(shipping),
            remaining_for_free_shipping,
        }
    }

    /// Whether shipping is free at this subtotal.
    #[must_use]
    pub fn ships_free(&self) -> bool {
        self.shipping.is_zero()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn summary_item(name: &str, price: i64, quantity: i64) -> SummaryItem {
        SummaryItem {
            name: name.to_string(),
            unit_price: Decimal::from(price),
            quantity: Quantity::new(quantity).unwrap(),
        }
    }

    #[test]
    fn test_free_shipping_at_threshold() {
        let items = vec![
            summary_item("Maasai Wedding Necklace", 12500, 1),
            summary_item("Traditional Kikuyu Beaded Bracelet Set", 3500, 2),
        ];
        let summary = OrderSummary::for_items(&items, &ShippingPolicy::default());

        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.subtotal, Decimal::from(19500));
        assert_eq!(summary.shipping, Decimal::ZERO);
        assert_eq!(summary.total, Decimal::from(19500));
        assert!(summary.ships_free());
        assert_eq!(summary.remaining_for_free_shipping, None);
    }

    #[test]
    fn test_exactly_threshold_ships_free() {
        let items = vec![summary_item("Kiondo basket", 10000, 1)];
        let summary = OrderSummary::for_items(&items, &ShippingPolicy::default());
        assert!(summary.ships_free());
    }

    #[test]
    fn test_flat_rate_below_threshold() {
        let items = vec![summary_item("Beaded keyring", 100, 3)];
        let summary = OrderSummary::for_items(&items, &ShippingPolicy::default());

        assert_eq!(summary.subtotal, Decimal::from(300));
        assert_eq!(summary.shipping, Decimal::from(500));
        assert_eq!(summary.total, Decimal::from(800));
        assert_eq!(summary.remaining_for_free_shipping, Some(Decimal::from(9700)));
    }

    #[test]
    fn test_empty_cart_pays_flat_rate() {
        let items: Vec<SummaryItem> = Vec::new();
        let summary = OrderSummary::for_items(&items, &ShippingPolicy::default());
        assert_eq!(summary.item_count, 0);
        assert_eq!(summary.total, Decimal::from(500));
    }

    #[test]
    fn test_overflowing_totals_saturate() {
        let items = vec![
            SummaryItem {
                name: "Heirloom".to_string(),
                unit_price: Decimal::MAX,
                quantity: Quantity::new(2).unwrap(),
            },
            summary_item("Beaded keyring", 100, 1),
        ];
        let summary = OrderSummary::for_items(&items, &ShippingPolicy::default());
        assert_eq!(summary.subtotal, Decimal::MAX);
        assert_eq!(summary.total, Decimal::MAX);
    }

    #[test]
    fn test_custom_policy() {
        let policy = ShippingPolicy {
            free_shipping_threshold: Decimal::from(50),
            flat_rate: Decimal::new(750, 2),
        };
        let items = vec![summary_item("Soapstone coaster", 20, 2)];
        let summary = OrderSummary::for_items(&items, &policy);
        assert_eq!(summary.total, Decimal::new(4750, 2));
    }
}

//! Property tests for merge and totals invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;
use urithi_cart::{OrderSummary, ShippingPolicy};
use urithi_core::{LineId, Quantity};
use urithi_integration_tests::{line, memory_store, reopen};

#[derive(Debug, Clone)]
enum Op {
    Add {
        product: u8,
        variant: Option<u8>,
        price: u16,
        quantity: u8,
    },
    Update {
        index: usize,
        quantity: i64,
    },
    Remove {
        index: usize,
    },
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0..4_u8, proptest::option::of(0..2_u8), 0..5_000_u16, 1..5_u8).prop_map(
            |(product, variant, price, quantity)| Op::Add {
                product,
                variant,
                price,
                quantity,
            }
        ),
        3 => (0..8_usize, -2..6_i64).prop_map(|(index, quantity)| Op::Update { index, quantity }),
        2 => (0..8_usize).prop_map(|index| Op::Remove { index }),
        1 => Just(Op::Clear),
    ]
}

fn line_at(cart: &urithi_cart::CartStore, index: usize) -> LineId {
    cart.lines()
        .get(index)
        .map_or_else(|| LineId::new("absent"), |l| l.id.clone())
}

proptest! {
    #[test]
    fn prop_keys_and_ids_stay_unique(ops in proptest::collection::vec(op(), 0..40)) {
        let (mut cart, _) = memory_store();

        for op in ops {
            match op {
                Op::Add { product, variant, price, quantity } => {
                    let mut input = line(&product.to_string(), i64::from(price), i64::from(quantity));
                    if let Some(v) = variant {
                        input = input.with_variant(v.to_string());
                    }
                    cart.add_item(input);
                }
                Op::Update { index, quantity } => {
                    let id = line_at(&cart, index);
                    cart.update_quantity(&id, quantity);
                }
                Op::Remove { index } => {
                    let id = line_at(&cart, index);
                    cart.remove_item(&id);
                }
                Op::Clear => {
                    cart.clear();
                }
            }

            let lines = cart.lines();
            for (i, a) in lines.iter().enumerate() {
                prop_assert!(a.quantity.get() >= 1);
                for b in lines.iter().skip(i + 1) {
                    prop_assert_ne!(&a.id, &b.id);
                    prop_assert_ne!(a.key(), b.key());
                }
            }
        }
    }

    #[test]
    fn prop_totals_match_lines(ops in proptest::collection::vec(op(), 0..30)) {
        let (mut cart, storage) = memory_store();

        for op in ops {
            if let Op::Add { product, variant, price, quantity } = op {
                let mut input = line(&product.to_string(), i64::from(price), i64::from(quantity));
                if let Some(v) = variant {
                    input = input.with_variant(v.to_string());
                }
                cart.add_item(input);
            }
        }

        let count: u64 = cart.lines().iter().map(|l| u64::from(l.quantity.get())).sum();
        let subtotal: Decimal = cart.lines().iter().map(|l| l.unit_price * Decimal::from(l.quantity.get())).sum();
        prop_assert_eq!(cart.item_count(), count);
        prop_assert_eq!(cart.subtotal(), subtotal);

        // A fresh store over the same storage sees the same lines.
        let reloaded = reopen(&storage);
        prop_assert_eq!(reloaded.lines(), cart.lines());
    }

    #[test]
    fn prop_repeated_adds_sum_quantities(quantities in proptest::collection::vec(1..20_i64, 1..10)) {
        let (mut cart, _) = memory_store();

        for &q in &quantities {
            cart.add_item(line("P1", 100, q));
        }

        let total: i64 = quantities.iter().sum();
        prop_assert_eq!(cart.len(), 1);
        prop_assert_eq!(cart.item_count(), u64::try_from(total).unwrap_or_default());
        prop_assert_eq!(cart.subtotal(), Decimal::from(total * 100));
    }

    #[test]
    fn prop_summary_total_is_subtotal_plus_shipping(
        prices in proptest::collection::vec((0..20_000_i64, 1..4_i64), 0..6),
    ) {
        let items: Vec<urithi_cart::SummaryItem> = prices
            .iter()
            .enumerate()
            .map(|(i, &(price, qty))| urithi_cart::SummaryItem {
                name: format!("item {i}"),
                unit_price: Decimal::from(price),
                quantity: Quantity::clamped(qty).unwrap_or(Quantity::ONE),
            })
            .collect();
        let policy = ShippingPolicy::default();

        let summary = OrderSummary::for_items(&items, &policy);

        prop_assert_eq!(summary.total, summary.subtotal + summary.shipping);
        prop_assert_eq!(summary.ships_free(), summary.subtotal >= policy.free_shipping_threshold);
        prop_assert_eq!(summary.remaining_for_free_shipping.is_none(), summary.ships_free());
    }
}

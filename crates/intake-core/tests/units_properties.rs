//! Property tests for the unit converter.
//!
//! These pin the aggregation identities that the rule evaluator and the cost
//! estimator both rely on.

use intake_core::units::{item_cbm, normalize_items, total_cbm, total_weight};
use intake_core::{Currency, OrderItem};
use proptest::prelude::*;

fn dimension() -> impl Strategy<Value = f64> {
    prop_oneof![
        1 => Just(0.0),
        1 => -100.0..0.0f64,
        6 => 0.1..400.0f64,
    ]
}

fn order_item() -> impl Strategy<Value = OrderItem> {
    (dimension(), dimension(), dimension(), 0.0..60.0f64, 0u32..25, 0.0..5000.0f64).prop_map(
        |(w, h, d, weight, quantity, price)| {
            OrderItem::new("generated")
                .with_dimensions(w, h, d)
                .with_weight(weight)
                .with_quantity(quantity)
                .with_price(price, Currency::Thb)
        },
    )
}

proptest! {
    #[test]
    fn total_cbm_is_sum_of_item_cbm_times_effective_quantity(
        items in prop::collection::vec(order_item(), 0..12)
    ) {
        let mut expected = 0.0;
        for item in &items {
            expected += item_cbm(item) * f64::from(item.quantity.max(1));
        }
        prop_assert_eq!(total_cbm(&items), expected);
    }

    #[test]
    fn item_cbm_is_zero_when_any_dimension_is_not_positive(item in order_item()) {
        if item.width <= 0.0 || item.height <= 0.0 || item.depth <= 0.0 {
            prop_assert_eq!(item_cbm(&item), 0.0);
        } else {
            prop_assert!(item_cbm(&item) > 0.0);
        }
    }

    #[test]
    fn normalize_is_idempotent(items in prop::collection::vec(order_item(), 0..12)) {
        let mut once = items.clone();
        normalize_items(&mut once);
        let mut twice = once.clone();
        normalize_items(&mut twice);

        prop_assert_eq!(&once, &twice);
        for item in &once {
            prop_assert_eq!(item.cbm, Some(item_cbm(item)));
        }
    }

    #[test]
    fn totals_are_never_negative(items in prop::collection::vec(order_item(), 0..12)) {
        prop_assert!(total_cbm(&items) >= 0.0);
        prop_assert!(total_weight(&items) >= 0.0);
    }
}

//! Property-based tests for cart invariants.

use std::num::NonZeroU32;

use bistro::{
    cart::{Cart, CartLine, NewCartLine},
    prices::Price,
    products::ProductId,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

fn new_line(id: u64, price: u64) -> NewCartLine {
    NewCartLine {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        image: None,
        price: Price::from_units(price),
    }
}

fn line_strategy() -> impl Strategy<Value = CartLine> {
    (1..50_u64, 0..5_000_000_u64, 1..1_000_u32).prop_filter_map(
        "quantity must be non-zero",
        |(id, price, quantity)| {
            NonZeroU32::new(quantity).map(|quantity| CartLine {
                id: ProductId::new(id),
                name: format!("Product {id}"),
                image: None,
                price: Price::from_units(price),
                quantity,
            })
        },
    )
}

proptest! {
    #[test]
    fn adds_keep_one_line_per_id(ids in prop::collection::vec(1..20_u64, 0..200)) {
        let mut cart = Cart::new();
        let mut expected: FxHashMap<u64, u32> = FxHashMap::default();

        for id in &ids {
            cart.add(new_line(*id, 10_000));
            *expected.entry(*id).or_default() += 1;
        }

        prop_assert_eq!(cart.len(), expected.len());

        for line in &cart {
            prop_assert_eq!(Some(&line.quantity.get()), expected.get(&line.id.get()));
        }
    }

    #[test]
    fn decrement_never_goes_below_one(adds in 1..10_usize, decrements in 0..30_usize) {
        let mut cart = Cart::new();

        for _ in 0..adds {
            cart.add(new_line(1, 10_000));
        }

        for _ in 0..decrements {
            let quantity = cart.decrement(ProductId::new(1));

            prop_assert!(quantity.is_ok_and(|quantity| quantity.get() >= 1));
        }

        let expected = u32::try_from(adds.saturating_sub(decrements).max(1)).unwrap_or(u32::MAX);

        prop_assert_eq!(cart.get(ProductId::new(1)).map(|line| line.quantity.get()), Some(expected));
    }

    #[test]
    fn increment_has_no_practical_ceiling(increments in 0..500_u32) {
        let mut cart = Cart::new();

        cart.add(new_line(1, 10_000));

        for _ in 0..increments {
            prop_assert!(cart.increment(ProductId::new(1)).is_ok());
        }

        prop_assert_eq!(cart.get(ProductId::new(1)).map(|line| line.quantity.get()), Some(increments + 1));
    }

    #[test]
    fn totals_match_line_sums(lines in prop::collection::vec(line_strategy(), 0..40)) {
        let cart = Cart::from_lines(lines);
        let totals = cart.totals();

        let amount = cart.iter().fold(Decimal::ZERO, |sum, line| {
            sum + line.price.amount() * Decimal::from(line.quantity.get())
        });
        let count: u64 = cart.iter().map(|line| u64::from(line.quantity.get())).sum();

        prop_assert_eq!(totals.amount, amount);
        prop_assert_eq!(totals.item_count, count);
        prop_assert_eq!(totals.deposit * Decimal::TWO, totals.amount);
    }
}

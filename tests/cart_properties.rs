use proptest::prelude::*;
use scoop_fund::{Cart, Money};
use std::collections::HashMap;

const NAMES: [&str; 5] = ["Vanilla Cone", "Chocolate Cone", "Sundae", "Float", "Banana Split"];

#[derive(Debug, Clone)]
enum Op {
    Add(usize, i64),
    Remove(usize),
    Update(usize, i64),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0..NAMES.len(), 0i64..2_000).prop_map(|(n, p)| Op::Add(n, p)),
        2 => (0..NAMES.len()).prop_map(Op::Remove),
        3 => (0..NAMES.len(), -5i64..10).prop_map(|(n, q)| Op::Update(n, q)),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn add_counts_every_call(picks in prop::collection::vec(0..NAMES.len(), 0..40)) {
        let mut cart = Cart::new();
        let mut expected: HashMap<&str, u32> = HashMap::new();
        for &pick in &picks {
            cart.add_item(NAMES[pick], Money::from_cents(350));
            *expected.entry(NAMES[pick]).or_default() += 1;
        }

        prop_assert_eq!(cart.item_count(), picks.len() as u64);
        prop_assert_eq!(cart.len(), expected.len());
        for (name, quantity) in expected {
            prop_assert_eq!(cart.get(name).map(|i| i.quantity), Some(quantity));
        }
    }

    #[test]
    fn totals_follow_line_items(ops in prop::collection::vec(op(), 0..60)) {
        let mut cart = Cart::new();
        for op in ops {
            match op {
                Op::Add(n, cents) => cart.add_item(NAMES[n], Money::from_cents(cents)),
                Op::Remove(n) => {
                    cart.remove_item(NAMES[n]);
                }
                Op::Update(n, q) => {
                    cart.update_quantity(NAMES[n], q);
                }
                Op::Clear => cart.clear(),
            }
        }

        let expected_cents: i64 = cart
            .items()
            .iter()
            .map(|i| i.unit_price.cents() * i64::from(i.quantity))
            .sum();
        prop_assert!(cart.items().iter().all(|i| i.quantity >= 1));
        prop_assert_eq!(cart.subtotal().cents(), expected_cents);
        prop_assert_eq!(cart.donation_amount(), cart.subtotal().percent(10));
        prop_assert_eq!(cart.total(), cart.subtotal() + cart.donation_amount());
        // donation stays within half a cent of the exact 10%
        prop_assert!((cart.donation_amount().cents() * 10 - expected_cents).abs() <= 5);
    }

    #[test]
    fn non_positive_update_equals_remove(n in 0..NAMES.len(), q in -50i64..=0) {
        let mut cart = Cart::new();
        for name in NAMES {
            cart.add_item(name, Money::from_cents(100));
        }
        let mut removed = cart.clone();
        removed.remove_item(NAMES[n]);

        cart.update_quantity(NAMES[n], q);
        prop_assert_eq!(cart, removed);
    }
}

#[test]
fn clear_then_read_is_empty() {
    let mut cart = Cart::new();
    cart.add_item("Sundae", Money::from_cents(500));
    cart.update_quantity("Sundae", 3);
    assert_eq!(cart.subtotal(), Money::from_cents(1500));

    cart.clear();
    assert!(cart.items().is_empty());
    assert_eq!(cart.item_count(), 0);
    assert_eq!(cart.subtotal(), Money::ZERO);
    assert_eq!(cart.donation_amount(), Money::ZERO);
    assert_eq!(cart.total(), Money::ZERO);
}

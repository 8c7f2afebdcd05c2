//! Property-based invariants over random command streams.

use std::collections::HashMap;

use proptest::prelude::*;
use venue_core::{Command, Event, MatchingEngine, NewOrder, Side};

fn arb_side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Buy), Just(Side::Sell)]
}

/// (price, quantity, side) triples drawn from a narrow band so streams
/// actually cross.
fn arb_orders() -> impl Strategy<Value = Vec<(u64, u64, Side)>> {
    prop::collection::vec((90u64..=110, 1u64..=50, arb_side()), 1..60)
}

proptest! {
    /// For every new order: executed quantity plus rested remainder
    /// equals the original quantity.
    #[test]
    fn submit_conserves_quantity(orders in arb_orders()) {
        let engine = MatchingEngine::new();

        for (i, (price, quantity, side)) in orders.iter().enumerate() {
            let order_id = i as u64 + 1;
            let events = engine
                .submit(Command::New(NewOrder {
                    order_id,
                    instrument: "PROP".to_string(),
                    price: *price,
                    quantity: *quantity,
                    side: *side,
                }))
                .unwrap();

            let mut executed = 0u64;
            let mut rested = 0u64;
            for event in &events {
                match event {
                    Event::Executed(e) => {
                        prop_assert_eq!(e.incoming_order_id, order_id);
                        executed += e.quantity;
                    }
                    Event::Added(a) => {
                        prop_assert_eq!(a.order_id, order_id);
                        rested = a.quantity;
                    }
                    Event::Deleted(_) => prop_assert!(false, "new order produced Deleted"),
                }
            }
            prop_assert_eq!(executed + rested, *quantity);
        }
    }

    /// The book is never observably crossed after a submit returns.
    #[test]
    fn no_crossing_survives_a_submit(orders in arb_orders()) {
        let engine = MatchingEngine::new();

        for (i, (price, quantity, side)) in orders.iter().enumerate() {
            engine
                .submit(Command::New(NewOrder {
                    order_id: i as u64 + 1,
                    instrument: "PROP".to_string(),
                    price: *price,
                    quantity: *quantity,
                    side: *side,
                }))
                .unwrap();

            if let Some((Some(bid), Some(ask))) = engine.best_prices("PROP") {
                prop_assert!(bid < ask, "crossed book: bid {} >= ask {}", bid, ask);
            }
        }
    }

    /// Resting orders never over-fill: total executed against any order,
    /// in either role, stays within its original quantity.
    #[test]
    fn no_order_is_overfilled(orders in arb_orders()) {
        let engine = MatchingEngine::new();
        let mut original: HashMap<u64, u64> = HashMap::new();
        let mut filled: HashMap<u64, u64> = HashMap::new();

        for (i, (price, quantity, side)) in orders.iter().enumerate() {
            let order_id = i as u64 + 1;
            original.insert(order_id, *quantity);

            let events = engine
                .submit(Command::New(NewOrder {
                    order_id,
                    instrument: "PROP".to_string(),
                    price: *price,
                    quantity: *quantity,
                    side: *side,
                }))
                .unwrap();

            for event in &events {
                if let Event::Executed(e) = event {
                    *filled.entry(e.resting_order_id).or_default() += e.quantity;
                    *filled.entry(e.incoming_order_id).or_default() += e.quantity;
                }
            }
        }

        for (order_id, total) in &filled {
            prop_assert!(total <= &original[order_id]);
        }
    }

    /// Among equal-priced resting orders, fills happen in arrival order.
    #[test]
    fn equal_price_fills_fifo(quantities in prop::collection::vec(1u64..=10, 2..10)) {
        let engine = MatchingEngine::new();
        let total: u64 = quantities.iter().sum();

        for (i, quantity) in quantities.iter().enumerate() {
            engine
                .submit(Command::New(NewOrder {
                    order_id: i as u64 + 1,
                    instrument: "PROP".to_string(),
                    price: 100,
                    quantity: *quantity,
                    side: Side::Sell,
                }))
                .unwrap();
        }

        let events = engine
            .submit(Command::New(NewOrder {
                order_id: 1000,
                instrument: "PROP".to_string(),
                price: 100,
                quantity: total,
                side: Side::Buy,
            }))
            .unwrap();

        let fill_order: Vec<u64> = events
            .iter()
            .filter_map(|e| match e {
                Event::Executed(x) => Some(x.resting_order_id),
                _ => None,
            })
            .collect();

        let expected: Vec<u64> = (1..=quantities.len() as u64).collect();
        prop_assert_eq!(fill_order, expected);
    }
}

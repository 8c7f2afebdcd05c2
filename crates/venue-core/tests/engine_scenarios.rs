//! Scripted lifecycle scenarios through the public engine API.

use venue_core::{CancelOrder, Command, Event, MatchingEngine, NewOrder, Side};

fn new_order(id: u64, instrument: &str, price: u64, qty: u64, side: Side) -> Command {
    Command::New(NewOrder {
        order_id: id,
        instrument: instrument.to_string(),
        price,
        quantity: qty,
        side,
    })
}

fn cancel(id: u64) -> Command {
    Command::Cancel(CancelOrder { order_id: id })
}

#[test]
fn partial_fill_then_remainder_rests() {
    let engine = MatchingEngine::new();

    // Sell 10 @ 100 rests.
    let events = engine
        .submit(new_order(1, "AAPL", 100, 10, Side::Sell))
        .unwrap();
    assert_eq!(events.len(), 1);
    match &events[0] {
        Event::Added(a) => {
            assert_eq!(a.order_id, 1);
            assert_eq!(a.instrument, "AAPL");
            assert_eq!(a.price, 100);
            assert_eq!(a.quantity, 10);
            assert!(a.is_sell);
        }
        other => panic!("expected Added, got {other:?}"),
    }

    // Buy 4 @ 100 fills completely against it; no Added for order 2.
    let events = engine
        .submit(new_order(2, "AAPL", 100, 4, Side::Buy))
        .unwrap();
    assert_eq!(events.len(), 1);
    match &events[0] {
        Event::Executed(e) => {
            assert_eq!(e.resting_order_id, 1);
            assert_eq!(e.incoming_order_id, 2);
            assert_eq!(e.fill_sequence, 1);
            assert_eq!(e.price, 100);
            assert_eq!(e.quantity, 4);
        }
        other => panic!("expected Executed, got {other:?}"),
    }

    // Buy 10 @ 100 takes the remaining 6, rests the unfilled 4.
    let events = engine
        .submit(new_order(3, "AAPL", 100, 10, Side::Buy))
        .unwrap();
    assert_eq!(events.len(), 2);
    match &events[0] {
        Event::Executed(e) => {
            assert_eq!(e.resting_order_id, 1);
            assert_eq!(e.incoming_order_id, 3);
            assert_eq!(e.fill_sequence, 2);
            assert_eq!(e.price, 100);
            assert_eq!(e.quantity, 6);
        }
        other => panic!("expected Executed, got {other:?}"),
    }
    match &events[1] {
        Event::Added(a) => {
            assert_eq!(a.order_id, 3);
            assert_eq!(a.quantity, 4);
            assert!(!a.is_sell);
        }
        other => panic!("expected Added, got {other:?}"),
    }
}

#[test]
fn cancel_is_idempotent_in_outcome() {
    let engine = MatchingEngine::new();
    engine
        .submit(new_order(1, "AAPL", 100, 10, Side::Sell))
        .unwrap();

    let first = engine.submit(cancel(1)).unwrap();
    let second = engine.submit(cancel(1)).unwrap();

    match (&first[0], &second[0]) {
        (Event::Deleted(a), Event::Deleted(b)) => {
            assert!(a.success);
            assert!(!b.success);
        }
        other => panic!("expected two Deleted, got {other:?}"),
    }
}

#[test]
fn cancel_of_unknown_id_reports_failure() {
    let engine = MatchingEngine::new();
    let events = engine.submit(cancel(999)).unwrap();
    assert_eq!(events.len(), 1);
    match &events[0] {
        Event::Deleted(d) => {
            assert_eq!(d.order_id, 999);
            assert!(!d.success);
        }
        other => panic!("expected Deleted, got {other:?}"),
    }
}

#[test]
fn same_price_fills_in_arrival_order() {
    let engine = MatchingEngine::new();
    engine
        .submit(new_order(1, "AAPL", 100, 5, Side::Sell))
        .unwrap();
    engine
        .submit(new_order(2, "AAPL", 100, 5, Side::Sell))
        .unwrap();
    engine
        .submit(new_order(3, "AAPL", 100, 5, Side::Sell))
        .unwrap();

    let events = engine
        .submit(new_order(4, "AAPL", 100, 12, Side::Buy))
        .unwrap();
    let fills: Vec<u64> = events
        .iter()
        .filter_map(|e| match e {
            Event::Executed(x) => Some(x.resting_order_id),
            _ => None,
        })
        .collect();
    assert_eq!(fills, vec![1, 2, 3]);
}

#[test]
fn maker_price_holds_for_aggressive_taker() {
    let engine = MatchingEngine::new();
    engine
        .submit(new_order(1, "AAPL", 100, 10, Side::Sell))
        .unwrap();

    let events = engine
        .submit(new_order(2, "AAPL", 140, 10, Side::Buy))
        .unwrap();
    match &events[0] {
        Event::Executed(e) => assert_eq!(e.price, 100),
        other => panic!("expected Executed, got {other:?}"),
    }
}

#[test]
fn instruments_do_not_match_each_other() {
    let engine = MatchingEngine::new();
    engine
        .submit(new_order(1, "AAPL", 100, 10, Side::Sell))
        .unwrap();

    // Crossing price, different instrument: rests, no execution.
    let events = engine
        .submit(new_order(2, "MSFT", 100, 10, Side::Buy))
        .unwrap();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Event::Added(_)));

    assert_eq!(engine.best_prices("AAPL"), Some((None, Some(100))));
    assert_eq!(engine.best_prices("MSFT"), Some((Some(100), None)));
}

#[test]
fn every_command_yields_at_least_one_event() {
    let engine = MatchingEngine::new();
    let commands = vec![
        new_order(1, "AAPL", 100, 10, Side::Sell),
        new_order(2, "AAPL", 100, 10, Side::Buy),
        new_order(3, "AAPL", 90, 1, Side::Buy),
        cancel(3),
        cancel(3),
        cancel(42),
    ];
    for command in commands {
        let events = engine.submit(command).unwrap();
        assert!(!events.is_empty());
    }
}

#[test]
fn timestamps_are_ordered() {
    let engine = MatchingEngine::new();
    engine
        .submit(new_order(1, "AAPL", 100, 10, Side::Sell))
        .unwrap();
    let events = engine
        .submit(new_order(2, "AAPL", 100, 25, Side::Buy))
        .unwrap();

    for event in &events {
        let (t_accept, t_complete) = match event {
            Event::Added(a) => (a.t_accept, a.t_complete),
            Event::Executed(e) => (e.t_accept, e.t_complete),
            Event::Deleted(d) => (d.t_accept, d.t_complete),
        };
        assert!(t_complete >= t_accept);
    }
}

#[test]
fn canceled_order_no_longer_matches() {
    let engine = MatchingEngine::new();
    engine
        .submit(new_order(1, "AAPL", 100, 10, Side::Sell))
        .unwrap();
    engine.submit(cancel(1)).unwrap();

    // Would have crossed order 1; now rests instead.
    let events = engine
        .submit(new_order(2, "AAPL", 100, 10, Side::Buy))
        .unwrap();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Event::Added(_)));
}

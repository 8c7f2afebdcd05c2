//! Bid and ask books for one instrument, plus the matching algorithm
//! between them.
//!
//! The core correctness invariant lives here: after `match_and_rest`
//! returns, no resting bid price is >= any resting ask price. Crossing
//! states exist only inside one call, never after it.

use crate::clock::Clock;
use crate::messages::Event;
use crate::order::Order;
use crate::price_time::PriceTimeBook;
use crate::side::Side;

/// Is an incoming order marketable against a resting price?
///
/// Buy crosses when `incoming >= resting`; Sell crosses when
/// `incoming <= resting`.
pub fn crosses(incoming_side: Side, incoming_price: u64, resting_price: u64) -> bool {
    match incoming_side {
        Side::Buy => incoming_price >= resting_price,
        Side::Sell => incoming_price <= resting_price,
    }
}

/// Result of one `match_and_rest` call.
///
/// Besides the event sequence the engine needs to know which resting
/// orders died (to drop them from its live-order index) and whether the
/// incoming order rested; both are maintained outside the instrument
/// lock.
#[derive(Debug)]
pub struct MatchOutcome {
    pub events: Vec<Event>,
    pub filled_resting: Vec<u64>,
    pub rested: bool,
}

/// One instrument's bid book, ask book, and arrival counter. Created
/// lazily on first use and owned by the engine for its lifetime.
#[derive(Debug)]
pub struct InstrumentBook {
    instrument: String,
    bids: PriceTimeBook,
    asks: PriceTimeBook,

    /// Monotonic arrival counter; breaks price ties FIFO.
    arrivals: u64,
}

impl InstrumentBook {
    pub fn new(instrument: impl Into<String>) -> Self {
        InstrumentBook {
            instrument: instrument.into(),
            bids: PriceTimeBook::new(Side::Buy),
            asks: PriceTimeBook::new(Side::Sell),
            arrivals: 0,
        }
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    pub fn best_bid(&self) -> Option<u64> {
        self.bids.best_price()
    }

    pub fn best_ask(&self) -> Option<u64> {
        self.asks.best_price()
    }

    /// Total resting orders across both sides.
    pub fn order_count(&self) -> usize {
        self.bids.order_count() + self.asks.order_count()
    }

    /// Match an incoming order against the opposite side, then rest any
    /// remainder on its own side.
    ///
    /// Walks the opposite book in priority order; each fill executes at
    /// the resting order's price and emits an `Executed` carrying that
    /// order's incremented fill sequence. Matching stops as soon as the
    /// incoming order is exhausted or the best opposite price no longer
    /// crosses. A positive remainder rests and emits `Added` for the
    /// resting quantity.
    ///
    /// The caller must hold this instrument's critical section for the
    /// whole call; releasing it between matching and resting would let
    /// two concurrently-submitted crossing orders both rest unmatched.
    pub fn match_and_rest(&mut self, mut order: Order, clock: &Clock) -> MatchOutcome {
        debug_assert_eq!(order.instrument, self.instrument);

        let mut events = Vec::new();
        let mut filled_resting = Vec::new();

        let opposite = match order.side {
            Side::Buy => &mut self.asks,
            Side::Sell => &mut self.bids,
        };

        while order.remaining_qty > 0 {
            let best = match opposite.best_price() {
                Some(p) => p,
                None => break,
            };
            if !crosses(order.side, order.price, best) {
                break;
            }

            let resting = match opposite.front_of_best_mut() {
                Some(r) => r,
                None => break,
            };

            let fill_qty = order.remaining_qty.min(resting.remaining_qty);
            let fill_sequence = resting.next_fill_sequence();
            let resting_id = resting.order_id;

            resting.fill(fill_qty);
            let resting_filled = resting.is_filled();

            events.push(Event::executed(
                resting_id,
                order.order_id,
                fill_sequence,
                best,
                fill_qty,
                order.t_accept,
                clock.now_micros(),
            ));

            order.fill(fill_qty);

            if resting_filled {
                opposite.remove_front_of_best();
                filled_resting.push(resting_id);
            }
        }

        let mut rested = false;
        if order.remaining_qty > 0 {
            self.arrivals += 1;
            order.arrival_sequence = self.arrivals;

            events.push(Event::added(
                order.order_id,
                order.instrument.clone(),
                order.price,
                order.remaining_qty,
                order.side,
                order.t_accept,
                clock.now_micros(),
            ));

            match order.side {
                Side::Buy => self.bids.insert(order),
                Side::Sell => self.asks.insert(order),
            }
            rested = true;
        }

        debug_assert!(self.not_crossed());

        MatchOutcome {
            events,
            filled_resting,
            rested,
        }
    }

    /// Cancel by id, scanning both sides (the side is not known from the
    /// id alone). Emits `Deleted` either way; cancel never partially
    /// succeeds.
    pub fn cancel(&mut self, order_id: u64, t_accept: u64, clock: &Clock) -> (Event, bool) {
        let removed = self
            .bids
            .cancel(order_id)
            .or_else(|| self.asks.cancel(order_id));
        let success = removed.is_some();
        (
            Event::deleted(order_id, success, t_accept, clock.now_micros()),
            success,
        )
    }

    fn not_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid < ask,
            _ => true,
        }
    }
}

//! Multi-instrument matching engine.
//!
//! Owns the instrument -> book map (books are created on first use and
//! never removed) and the cross-instrument order-id index used to route
//! cancels. `submit` may be called concurrently from any number of
//! workers: each instrument has its own critical section, so commands on
//! different instruments never block each other, while `match_and_rest`
//! and `cancel` on the same instrument are serialized.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::clock::Clock;
use crate::error::EngineError;
use crate::instrument_book::InstrumentBook;
use crate::messages::{CancelOrder, Command, Event, NewOrder};
use crate::order::Order;

/// Multi-instrument matching engine. Shareable across workers as-is
/// (`&self` API); wrap in an `Arc` to hand to connection tasks.
pub struct MatchingEngine {
    /// Instrument -> book. The entry API gives idempotent first-touch
    /// creation under concurrent submits.
    books: DashMap<String, Arc<Mutex<InstrumentBook>>>,

    /// Live order id -> owning instrument. A cancel carries only the id,
    /// so the engine needs this to find the right book. Entries leave
    /// when the order does (full fill or successful cancel).
    live_orders: DashMap<u64, String>,

    clock: Clock,
}

impl MatchingEngine {
    pub fn new() -> Self {
        MatchingEngine {
            books: DashMap::new(),
            live_orders: DashMap::new(),
            clock: Clock::new(),
        }
    }

    /// Process one command and return its full event sequence.
    ///
    /// The per-instrument lock is held only while the book is mutated;
    /// events are returned to the caller for emission afterwards, so
    /// slow sinks never extend the critical section.
    pub fn submit(&self, command: Command) -> Result<Vec<Event>, EngineError> {
        let t_accept = self.clock.now_micros();
        match command {
            Command::New(msg) => self.submit_new(msg, t_accept),
            Command::Cancel(msg) => Ok(self.submit_cancel(msg, t_accept)),
        }
    }

    fn submit_new(&self, msg: NewOrder, t_accept: u64) -> Result<Vec<Event>, EngineError> {
        if msg.quantity == 0 {
            return Err(EngineError::ZeroQuantity {
                order_id: msg.order_id,
            });
        }

        // Claim the id before touching any book; the entry API makes
        // this atomic under concurrent submits of the same id.
        match self.live_orders.entry(msg.order_id) {
            Entry::Occupied(_) => {
                return Err(EngineError::DuplicateOrderId {
                    order_id: msg.order_id,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(msg.instrument.clone());
            }
        }

        let book = self.book_for(&msg.instrument);
        let order = Order::from_new(&msg, t_accept);

        let outcome = {
            let mut guard = book.lock();
            guard.match_and_rest(order, &self.clock)
        };

        // Index maintenance happens after the lock is released; a cancel
        // racing in between finds nothing in the book and reports the
        // normal negative result.
        for resting_id in &outcome.filled_resting {
            self.live_orders.remove(resting_id);
        }
        if !outcome.rested {
            self.live_orders.remove(&msg.order_id);
        }

        Ok(outcome.events)
    }

    fn submit_cancel(&self, msg: CancelOrder, t_accept: u64) -> Vec<Event> {
        let instrument = match self.live_orders.get(&msg.order_id) {
            Some(entry) => entry.value().clone(),
            None => {
                return vec![Event::deleted(
                    msg.order_id,
                    false,
                    t_accept,
                    self.clock.now_micros(),
                )];
            }
        };

        // Books are never removed, so the lookup cannot miss once the
        // index pointed here; the lock-protected scan is authoritative.
        let book = self.book_for(&instrument);
        let (event, success) = {
            let mut guard = book.lock();
            guard.cancel(msg.order_id, t_accept, &self.clock)
        };

        if success {
            self.live_orders.remove(&msg.order_id);
        }

        vec![event]
    }

    fn book_for(&self, instrument: &str) -> Arc<Mutex<InstrumentBook>> {
        self.books
            .entry(instrument.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(InstrumentBook::new(instrument))))
            .clone()
    }

    // -------------------------------------------------------------------------
    // Inspection (tests, admin queries)
    // -------------------------------------------------------------------------

    /// Number of instruments with a book.
    pub fn num_instruments(&self) -> usize {
        self.books.len()
    }

    /// Currently-live resting orders across all instruments.
    pub fn live_order_count(&self) -> usize {
        self.live_orders.len()
    }

    /// `(best bid, best ask)` for an instrument, `None` if it has no
    /// book yet.
    pub fn best_prices(&self, instrument: &str) -> Option<(Option<u64>, Option<u64>)> {
        let book = self.books.get(instrument)?.value().clone();
        let guard = book.lock();
        Some((guard.best_bid(), guard.best_ask()))
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        MatchingEngine::new()
    }
}

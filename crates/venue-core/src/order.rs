//! Internal order representation used inside the books.
//!
//! Not exposed over the wire; the protocol layer only ever sees
//! [`Command`](crate::messages::Command) and [`Event`](crate::messages::Event).

use crate::messages::NewOrder;
use crate::side::Side;

/// A single order in a book: immutable identity plus mutable remaining
/// quantity. Logically dead once `remaining_qty` reaches 0.
#[derive(Debug, Clone)]
pub struct Order {
    pub order_id: u64,
    pub instrument: String,
    pub side: Side,

    /// Limit price in integer ticks.
    pub price: u64,

    /// Original quantity.
    pub quantity: u64,

    /// Remaining unfilled quantity; monotonically non-increasing.
    pub remaining_qty: u64,

    /// Breaks price ties, FIFO. Assigned by the instrument book at the
    /// moment the order is accepted into a side.
    pub arrival_sequence: u64,

    /// Fills taken against this order while resting; drives the
    /// `fill_sequence` field on `Executed` events.
    pub fill_count: u64,

    /// When the originating command was accepted by the engine.
    pub t_accept: u64,
}

impl Order {
    /// Construct an `Order` from a [`NewOrder`] command and its accept
    /// timestamp. `arrival_sequence` stays 0 until the order rests.
    pub fn from_new(msg: &NewOrder, t_accept: u64) -> Self {
        Order {
            order_id: msg.order_id,
            instrument: msg.instrument.clone(),
            side: msg.side,
            price: msg.price,
            quantity: msg.quantity,
            remaining_qty: msg.quantity,
            arrival_sequence: 0,
            fill_count: 0,
            t_accept,
        }
    }

    /// Returns `true` if the order is fully filled.
    pub fn is_filled(&self) -> bool {
        self.remaining_qty == 0
    }

    /// Fill the order by up to `qty` units. Returns the quantity that was
    /// actually filled (`<= qty` and `<= remaining_qty`).
    pub fn fill(&mut self, qty: u64) -> u64 {
        let filled = qty.min(self.remaining_qty);
        self.remaining_qty -= filled;
        filled
    }

    /// Bump and return the fill counter for the next execution against
    /// this resting order.
    pub fn next_fill_sequence(&mut self) -> u64 {
        self.fill_count += 1;
        self.fill_count
    }
}

//! Command and event types used by the matching core.
//!
//! These are **transport-agnostic** logical messages:
//! - [`Command`]: what the engine consumes.
//! - [`Event`]: what the engine produces.
//!
//! Line encoding lives in the `venue-protocol` crate; this module is
//! purely logical.

use crate::side::Side;

/// A request into the matching engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// New limit order.
    New(NewOrder),

    /// Cancel a live order by id.
    Cancel(CancelOrder),
}

/// A lifecycle event emitted by the matching engine.
///
/// Events are never mutated once emitted; a command produces one or more
/// of them (an `Added`, one or more `Executed` possibly followed by an
/// `Added` for the remainder, or a `Deleted`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An order (or the unmatched remainder of one) rested in a book.
    Added(Added),

    /// A fill between a resting order and an incoming order.
    Executed(Executed),

    /// Outcome of a cancel request, successful or not.
    Deleted(Deleted),
}

/// New order command (input).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Externally-assigned identifier, unique among currently-live orders.
    pub order_id: u64,

    /// Instrument symbol, e.g. `"IBM"` or `"BTC-USD"`.
    pub instrument: String,

    /// Limit price in integer ticks.
    pub price: u64,

    /// Original quantity; must be positive.
    pub quantity: u64,

    /// Buy or Sell.
    pub side: Side,
}

/// Cancel command (input). Only the id is known; the engine routes it to
/// the owning instrument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOrder {
    pub order_id: u64,
}

/// Order rested in a book (output).
///
/// `quantity` is the amount actually resting, i.e. what remained after
/// any fills on the way in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Added {
    pub order_id: u64,
    pub instrument: String,
    pub price: u64,
    pub quantity: u64,
    pub is_sell: bool,
    pub t_accept: u64,
    pub t_complete: u64,
}

/// Fill event (output).
///
/// `price` is always the resting (maker) order's price. `fill_sequence`
/// counts fills against the resting order, starting at 1, so downstream
/// consumers can reconstruct one order's execution history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executed {
    pub resting_order_id: u64,
    pub incoming_order_id: u64,
    pub fill_sequence: u64,
    pub price: u64,
    pub quantity: u64,
    pub t_accept: u64,
    pub t_complete: u64,
}

/// Cancel outcome (output). `success = false` covers already filled,
/// already canceled, and unknown ids alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deleted {
    pub order_id: u64,
    pub success: bool,
    pub t_accept: u64,
    pub t_complete: u64,
}

// -----------------------------------------------------------------------------
// Convenience constructors
// -----------------------------------------------------------------------------

impl Event {
    pub fn added(
        order_id: u64,
        instrument: impl Into<String>,
        price: u64,
        quantity: u64,
        side: Side,
        t_accept: u64,
        t_complete: u64,
    ) -> Self {
        Event::Added(Added {
            order_id,
            instrument: instrument.into(),
            price,
            quantity,
            is_sell: side.is_sell(),
            t_accept,
            t_complete,
        })
    }

    pub fn executed(
        resting_order_id: u64,
        incoming_order_id: u64,
        fill_sequence: u64,
        price: u64,
        quantity: u64,
        t_accept: u64,
        t_complete: u64,
    ) -> Self {
        Event::Executed(Executed {
            resting_order_id,
            incoming_order_id,
            fill_sequence,
            price,
            quantity,
            t_accept,
            t_complete,
        })
    }

    pub fn deleted(order_id: u64, success: bool, t_accept: u64, t_complete: u64) -> Self {
        Event::Deleted(Deleted {
            order_id,
            success,
            t_accept,
            t_complete,
        })
    }
}

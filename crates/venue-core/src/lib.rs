//! venue-core
//!
//! Pure matching core for a limit-order venue:
//! - commands (input) and lifecycle events (output)
//! - price-time book for one side of one instrument
//! - instrument book owning the matching algorithm
//! - multi-instrument engine with per-instrument critical sections
//!
//! Invariants the engine guarantees regardless of how many workers call
//! [`MatchingEngine::submit`] concurrently:
//! - resting orders rank by price first, arrival second (FIFO within a price)
//! - no bid/ask crossing is observable after `submit` returns
//! - executions always happen at the resting order's price
//! - every well-formed command produces at least one event

pub mod side;
pub mod clock;
pub mod messages;
pub mod order;
pub mod price_time;
pub mod instrument_book;
pub mod engine;
pub mod error;

pub use side::Side;
pub use clock::Clock;

pub use messages::{
    Added,
    CancelOrder,
    Command,
    Deleted,
    Event,
    Executed,
    NewOrder,
};

pub use order::Order;
pub use price_time::PriceTimeBook;
pub use instrument_book::{InstrumentBook, MatchOutcome};
pub use engine::MatchingEngine;
pub use error::EngineError;

//! venue-server
//!
//! Multi-client async TCP server for the venue matching engine.
//!
//! One task per connection; every connection task shares the same
//! [`MatchingEngine`](venue_core::MatchingEngine) and submits commands
//! directly. Cross-connection safety is the engine's per-instrument
//! critical section, so connections working different instruments never
//! wait on each other.

pub mod config;
pub mod types;
pub mod server;

// internal module, not re-exported
mod client;

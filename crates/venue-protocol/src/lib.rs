//! venue-protocol
//!
//! Wire-level encoding/decoding for the venue.
//!
//! This crate turns raw input lines into logical
//! [`Command`](venue_core::Command) values and
//! [`Event`](venue_core::Event) values into output lines. Malformed
//! input is dropped here; the core only ever sees well-formed commands.

pub mod csv_codec;

pub use csv_codec::{format_event, parse_input_line};

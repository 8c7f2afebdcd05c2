//! CSV codec for commands and lifecycle events.
//!
//! Input format (lines -> `Command`):
//!
//! - New order:
//!   `N, orderId(int), instrument(string), price(int), qty(int), side(char B or S)`
//!
//! - Cancel:
//!   `C, orderId(int)`
//!
//! Output format (`Event` -> line):
//!
//! - Added:
//!   `A, orderId, instrument, price, quantity, side(B/S), tAccept, tComplete`
//!
//! - Executed:
//!   `E, restingOrderId, incomingOrderId, fillSequence, price, quantity, tAccept, tComplete`
//!
//! - Deleted:
//!   `D, orderId, outcome(A accepted / R rejected), tAccept, tComplete`

use std::num::ParseIntError;

use venue_core::{CancelOrder, Command, Event, NewOrder, Side};

/// Parse a single CSV line into a `Command`.
///
/// Returns `None` for blank lines, comments (starting with `#`), and
/// anything malformed; such lines never reach the engine.
pub fn parse_input_line(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let tokens = split_and_trim(trimmed, ',');
    if tokens.is_empty() {
        return None;
    }

    let msg_type = tokens[0].chars().next().unwrap_or('\0');

    match msg_type {
        'N' => parse_new_order(&tokens),
        'C' => parse_cancel(&tokens),
        _ => None,
    }
}

fn parse_new_order(tokens: &[String]) -> Option<Command> {
    // N, orderId, instrument, price, qty, side
    if tokens.len() != 6 {
        return None;
    }

    let order_id = parse_u64(&tokens[1]).ok()?;
    let instrument = tokens[2].clone();
    if instrument.is_empty() {
        return None;
    }

    let price = parse_u64(&tokens[3]).ok()?;
    let quantity = parse_u64(&tokens[4]).ok()?;
    if quantity == 0 {
        return None;
    }

    let side = Side::from_char(tokens[5].chars().next()?)?;

    Some(Command::New(NewOrder {
        order_id,
        instrument,
        price,
        quantity,
        side,
    }))
}

fn parse_cancel(tokens: &[String]) -> Option<Command> {
    // C, orderId
    if tokens.len() != 2 {
        return None;
    }

    let order_id = parse_u64(&tokens[1]).ok()?;
    Some(Command::Cancel(CancelOrder { order_id }))
}

/// Format an `Event` as a CSV line.
pub fn format_event(event: &Event) -> String {
    match event {
        Event::Added(a) => format!(
            "A, {}, {}, {}, {}, {}, {}, {}",
            a.order_id,
            a.instrument,
            a.price,
            a.quantity,
            if a.is_sell { 'S' } else { 'B' },
            a.t_accept,
            a.t_complete
        ),
        Event::Executed(e) => format!(
            "E, {}, {}, {}, {}, {}, {}, {}",
            e.resting_order_id,
            e.incoming_order_id,
            e.fill_sequence,
            e.price,
            e.quantity,
            e.t_accept,
            e.t_complete
        ),
        Event::Deleted(d) => format!(
            "D, {}, {}, {}, {}",
            d.order_id,
            if d.success { 'A' } else { 'R' },
            d.t_accept,
            d.t_complete
        ),
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn split_and_trim(s: &str, delimiter: char) -> Vec<String> {
    s.split(delimiter)
        .map(|tok| tok.trim().to_string())
        .collect()
}

fn parse_u64(s: &str) -> Result<u64, ParseIntError> {
    s.parse::<u64>()
}

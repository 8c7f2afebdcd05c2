//! Per-connection I/O: a reader loop that feeds commands to the engine
//! and a writer task that drains this client's outbound event channel.
//!
//! The reader processes its connection's commands strictly in arrival
//! order; concurrency exists only across connections. Events come back
//! from `submit` after the book mutation is committed, so transmission
//! never happens inside the engine's critical section.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{tcp::OwnedWriteHalf, TcpStream};
use tracing::{error, warn};
use venue_core::{Event, MatchingEngine};
use venue_protocol::csv_codec;

use crate::types::{ClientId, ClientRegistry, OutboundRx};

/// Run the I/O loop for a single connection.
pub async fn run_client(
    client_id: ClientId,
    stream: TcpStream,
    engine: Arc<MatchingEngine>,
    mut out_rx: OutboundRx,
    clients: ClientRegistry,
) -> Result<()> {
    let (mut read_stream, write_stream) = stream.into_split();

    // Writer task: drain outbound events for this client.
    let _writer_handle = tokio::spawn(async move {
        let mut write_stream = write_stream;

        while let Some(event) = out_rx.recv().await {
            if let Err(e) = write_event(&mut write_stream, &event).await {
                warn!(client = client_id.0, error = %e, "write failed");
                break;
            }
        }
    });

    let mut buffer = Vec::new();
    let mut temp_buf = [0u8; 1024];

    loop {
        match read_stream.read(&mut temp_buf).await {
            Ok(0) => break,
            Ok(n) => {
                buffer.extend_from_slice(&temp_buf[..n]);

                // Process complete lines.
                while let Some(newline_pos) = buffer.iter().position(|&b| b == b'\n') {
                    let line: Vec<u8> = buffer.drain(..=newline_pos).collect();
                    let line_str = String::from_utf8_lossy(&line);
                    let line_str = line_str.trim();

                    if line_str.is_empty() {
                        continue;
                    }

                    let command = match csv_codec::parse_input_line(line_str) {
                        Some(command) => command,
                        None => {
                            warn!(client = client_id.0, line = line_str, "dropping malformed line");
                            continue;
                        }
                    };

                    let events = match engine.submit(command) {
                        Ok(events) => events,
                        Err(e) => {
                            // The command source broke the engine contract
                            // (e.g. a live order id reused). State may no
                            // longer be trusted; stop the process.
                            error!(client = client_id.0, error = %e, "engine contract violation");
                            std::process::exit(1);
                        }
                    };

                    route_events(client_id, events, &clients).await;
                }
            }
            Err(e) => {
                warn!(client = client_id.0, error = %e, "read error");
                break;
            }
        }
    }

    // Remove client from registry.
    {
        let mut guard = clients.write().await;
        guard.remove(&client_id);
    }

    Ok(())
}

/// Routing policy:
/// - `Added`, `Deleted`   => unicast to the submitting client.
/// - `Executed`           => broadcast, so both counterparties and any
///                           tape listeners see the fill.
async fn route_events(origin: ClientId, events: Vec<Event>, clients: &ClientRegistry) {
    if events.is_empty() {
        return;
    }

    // Snapshot of current clients to minimize lock hold time.
    let current_clients = {
        let guard = clients.read().await;
        guard.clone()
    };

    for event in events {
        if matches!(event, Event::Executed(_)) {
            for tx in current_clients.values() {
                let _ = tx.send(event.clone());
            }
        } else if let Some(tx) = current_clients.get(&origin) {
            let _ = tx.send(event);
        }
    }
}

async fn write_event(stream: &mut OwnedWriteHalf, event: &Event) -> Result<()> {
    let line = csv_codec::format_event(event);
    stream.write_all(line.as_bytes()).await?;
    stream.write_all(b"\n").await?;
    stream.flush().await?;
    Ok(())
}

//! TCP listener and top-level server wiring.
//!
//! This module:
//! - Listens on the configured address/port.
//! - Accepts new TCP connections.
//! - Assigns each connection a `ClientId`.
//! - Spawns one task per connection.
//!
//! Every connection task gets a handle to the same `MatchingEngine` and
//! submits commands directly; there is no central serializing task. The
//! engine's per-instrument critical sections provide all cross-task
//! coordination.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{info, warn};
use venue_core::MatchingEngine;

use crate::client;
use crate::config::Config;
use crate::types::{ClientId, ClientRegistry, OutboundRx, OutboundTx};

/// Counter for assigning unique `ClientId`s.
static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

fn next_client_id() -> ClientId {
    let id = NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed);
    ClientId(id)
}

/// Run the TCP server with the given configuration.
pub async fn run(config: Config) -> Result<()> {
    let addr = config.socket_addr_string();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "listening");

    let engine = Arc::new(MatchingEngine::new());

    // Shared registry of clients -> outbound channels.
    let clients: ClientRegistry = Arc::new(tokio::sync::RwLock::new(Default::default()));

    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let current_clients = {
            let guard = clients.read().await;
            guard.len()
        };

        if current_clients >= config.max_clients {
            warn!(
                %peer_addr,
                max_clients = config.max_clients,
                "rejecting connection, client limit reached"
            );
            // Just drop the stream; the client sees the connection close.
            continue;
        }

        let client_id = next_client_id();
        info!(client = client_id.0, %peer_addr, "accepted connection");

        // Create outbound channel for this client and register it.
        let (out_tx, out_rx): (OutboundTx, OutboundRx) = mpsc::unbounded_channel();
        {
            let mut guard = clients.write().await;
            guard.insert(client_id, out_tx);
        }

        let engine_clone = engine.clone();
        let clients_clone = clients.clone();

        tokio::spawn(async move {
            if let Err(e) =
                client::run_client(client_id, stream, engine_clone, out_rx, clients_clone).await
            {
                warn!(client = client_id.0, error = %e, "client task ended with error");
            } else {
                info!(client = client_id.0, "client disconnected");
            }
        });
    }
}

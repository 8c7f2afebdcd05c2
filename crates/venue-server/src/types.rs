//! Shared types for the venue TCP server.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::RwLock;
use venue_core::Event;

/// Identifier for a connected client. Opaque; unique over the lifetime
/// of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub u64);

/// Outbound events from the engine to a given client.
pub type OutboundTx = mpsc::UnboundedSender<Event>;
pub type OutboundRx = mpsc::UnboundedReceiver<Event>;

/// Registry of connected clients and their outbound channels.
pub type ClientRegistry = Arc<RwLock<HashMap<ClientId, OutboundTx>>>;

//! Error types for the matching core.
//!
//! Business outcomes (fills, empty matches, failed cancels) are always
//! expressed as events, never as errors. `EngineError` is reserved for
//! contract violations by the command source; callers should treat them
//! as fatal rather than retry.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A new order reused an id that is still live in some book. Ids
    /// must be unique among live orders; two simultaneously-live orders
    /// sharing one id would make cancel routing ambiguous.
    #[error("order id {order_id} is already live")]
    DuplicateOrderId { order_id: u64 },

    /// A new order arrived with zero quantity. The protocol layer
    /// filters these; one reaching the engine means the decoder contract
    /// was broken.
    #[error("new order {order_id} has zero quantity")]
    ZeroQuantity { order_id: u64 },
}

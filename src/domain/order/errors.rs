use super::value_objects::{OrderId, OrderStatus};
use crate::event_sourcing::store::EventLogError;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum OrderError {
    #[error("Sign in to place an order")]
    NotAuthenticated,

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("Only the customer who placed the order can do this")]
    NotOwner,

    #[error("Cannot move order from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order not initialized")]
    NotInitialized,

    #[error(transparent)]
    EventLog(#[from] EventLogError),
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::value_objects::{OrderId, OrderStatus, PaymentMethod, ShippingAddress};
use crate::domain::cart::CartItem;
use crate::domain::identity::IdentityId;
use crate::event_sourcing::core::DomainEvent;

// ============================================================================
// Order Events - Domain Events for Order Aggregate
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    Placed(OrderPlaced),
    StatusChanged(OrderStatusChanged),
    ReturnRequested(OrderReturnRequested),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::Placed(_) => "OrderPlaced",
            OrderEvent::StatusChanged(_) => "OrderStatusChanged",
            OrderEvent::ReturnRequested(_) => "OrderReturnRequested",
        }
    }
}

// ============================================================================
// Individual Event Types
// ============================================================================

/// Checkout committed. Always the first event of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub order_id: OrderId,
    pub user_id: IdentityId,
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub shipping_address: ShippingAddress,
    pub placed_at: DateTime<Utc>,
}

/// Status overwritten from the admin side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusChanged {
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub changed_at: DateTime<Utc>,
}

/// Customer asked to send a delivered order back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReturnRequested {
    pub requested_by: IdentityId,
    pub requested_at: DateTime<Utc>,
}

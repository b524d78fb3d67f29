use chrono::{DateTime, Utc};

use super::value_objects::{OrderId, OrderStatus, PaymentMethod, ShippingAddress};
use crate::domain::cart::CartItem;
use crate::domain::identity::IdentityId;

// ============================================================================
// Order Commands - Represent user intent
// ============================================================================

/// Creates an order. Handled by `OrderAggregate::place` since there is no
/// aggregate to dispatch to yet.
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub order_id: OrderId,
    pub user_id: IdentityId,
    pub items: Vec<CartItem>,
    pub payment_method: PaymentMethod,
    pub shipping_address: ShippingAddress,
    pub placed_at: DateTime<Utc>,
}

/// Commands against an existing order.
#[derive(Debug, Clone)]
pub enum OrderCommand {
    /// Admin overwrite. Any status is accepted.
    UpdateStatus {
        status: OrderStatus,
        at: DateTime<Utc>,
    },
    RequestReturn {
        requester: IdentityId,
        at: DateTime<Utc>,
    },
}

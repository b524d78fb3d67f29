use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::identity::Identity;
use crate::utils::ids;

// ============================================================================
// Order Value Objects
// ============================================================================

/// Human-readable order number, e.g. `ORD-4821-K7`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(ids::order_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    #[serde(rename = "Return Requested")]
    ReturnRequested,
    Returned,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::ReturnRequested,
        OrderStatus::Returned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::ReturnRequested => "Return Requested",
            OrderStatus::Returned => "Returned",
        }
    }

    /// Statuses reachable in one step along the fulfilment graph.
    pub fn legal_transitions(&self) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match self {
            Pending => &[Processing, Cancelled],
            Processing => &[Shipped, Cancelled],
            Shipped => &[Delivered, Cancelled],
            Delivered => &[ReturnRequested],
            ReturnRequested => &[Returned],
            Cancelled | Returned => &[],
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.legal_transitions().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.legal_transitions().is_empty()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Upi,
    Cod,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit / Debit Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Cod => "Cash on Delivery",
        }
    }
}

pub const DEFAULT_ADDRESS: &str = "123 Industrial Area";
pub const DEFAULT_CITY: &str = "Mumbai";
pub const DEFAULT_ZIP: &str = "400001";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: String,
    pub address: String,
    pub city: String,
    pub zip: String,
}

impl ShippingAddress {
    /// The identity's own details, with a fixed fallback for each missing field.
    pub fn for_identity(identity: &Identity) -> Self {
        Self {
            name: identity.name.clone(),
            address: identity.address.clone().unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            city: identity.city.clone().unwrap_or_else(|| DEFAULT_CITY.to_string()),
            zip: identity.zip.clone().unwrap_or_else(|| DEFAULT_ZIP.to_string()),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::commands::{OrderCommand, PlaceOrder};
use super::errors::OrderError;
use super::events::*;
use super::value_objects::{OrderId, OrderStatus, PaymentMethod, ShippingAddress};
use crate::domain::cart::CartItem;
use crate::domain::identity::IdentityId;
use crate::event_sourcing::core::Aggregate;

// ============================================================================
// Order Aggregate - Domain Logic
// ============================================================================

/// An order placed at checkout. After placement only `status` changes.
pub type Order = OrderAggregate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAggregate {
    // Identity
    pub id: OrderId,
    pub version: i64,

    // Fixed at placement
    pub user_id: IdentityId,
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub shipping_address: ShippingAddress,
    pub placed_at: DateTime<Utc>,

    // Current State (derived from events)
    pub status: OrderStatus,
    pub updated_at: DateTime<Utc>,
}

impl OrderAggregate {
    /// Emit the opening event. An empty item list is accepted and yields a
    /// zero total.
    ///
    /// The total is the cart total at this instant; it is never recomputed.
    pub fn place(command: &PlaceOrder) -> Result<Vec<OrderEvent>, OrderError> {
        let total = command.items.iter().map(CartItem::line_total).sum();

        Ok(vec![OrderEvent::Placed(OrderPlaced {
            order_id: command.order_id.clone(),
            user_id: command.user_id.clone(),
            items: command.items.clone(),
            total,
            payment_method: command.payment_method,
            shipping_address: command.shipping_address.clone(),
            placed_at: command.placed_at,
        })])
    }

    pub fn is_owned_by(&self, user_id: &IdentityId) -> bool {
        &self.user_id == user_id
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl Aggregate for OrderAggregate {
    type Event = OrderEvent;
    type Command = OrderCommand;
    type Error = OrderError;

    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error> {
        match event {
            OrderEvent::Placed(e) => Ok(Self {
                id: e.order_id.clone(),
                version: 1,
                user_id: e.user_id.clone(),
                items: e.items.clone(),
                total: e.total,
                payment_method: e.payment_method,
                shipping_address: e.shipping_address.clone(),
                placed_at: e.placed_at,
                status: OrderStatus::Pending,
                updated_at: e.placed_at,
            }),
            _ => Err(OrderError::NotInitialized),
        }
    }

    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error> {
        match event {
            // Only valid as the first event
            OrderEvent::Placed(_) => return Err(OrderError::NotInitialized),
            OrderEvent::StatusChanged(e) => {
                self.status = e.to;
                self.updated_at = e.changed_at;
            }
            OrderEvent::ReturnRequested(e) => {
                self.status = OrderStatus::ReturnRequested;
                self.updated_at = e.requested_at;
            }
        }

        self.version += 1;
        Ok(())
    }

    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            OrderCommand::UpdateStatus { status, at } => {
                Ok(vec![OrderEvent::StatusChanged(OrderStatusChanged {
                    from: self.status,
                    to: *status,
                    changed_at: *at,
                })])
            }

            OrderCommand::RequestReturn { requester, at } => {
                if !self.is_owned_by(requester) {
                    return Err(OrderError::NotOwner);
                }

                if self.status != OrderStatus::Delivered {
                    return Err(OrderError::InvalidStatusTransition {
                        from: self.status,
                        to: OrderStatus::ReturnRequested,
                    });
                }

                Ok(vec![OrderEvent::ReturnRequested(OrderReturnRequested {
                    requested_by: requester.clone(),
                    requested_at: *at,
                })])
            }
        }
    }

    fn aggregate_id(&self) -> &str {
        self.id.as_str()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Catalog;
    use crate::event_sourcing::core::EventEnvelope;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn placed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 14, 11, 30, 0).unwrap()
    }

    fn place_command(items: Vec<CartItem>) -> PlaceOrder {
        PlaceOrder {
            order_id: OrderId::new("ORD-1234-AB"),
            user_id: IdentityId::new("u1"),
            items,
            payment_method: PaymentMethod::Upi,
            shipping_address: ShippingAddress {
                name: "Rahul Sharma".to_string(),
                address: "123 Main St".to_string(),
                city: "Erode".to_string(),
                zip: "638001".to_string(),
            },
            placed_at: placed_at(),
        }
    }

    fn two_drills_and_a_bulb() -> Vec<CartItem> {
        let catalog = Catalog::seeded();
        let mut drill = CartItem::new(catalog.products()[0].clone());
        drill.quantity = 2;
        let bulb = CartItem::new(catalog.products()[2].clone());
        vec![drill, bulb]
    }

    fn placed_order() -> OrderAggregate {
        let events = OrderAggregate::place(&place_command(two_drills_and_a_bulb())).unwrap();
        OrderAggregate::apply_first_event(&events[0]).unwrap()
    }

    fn apply(order: &mut OrderAggregate, command: OrderCommand) -> Result<(), OrderError> {
        for event in order.handle_command(&command)? {
            order.apply_event(&event)?;
        }
        Ok(())
    }

    #[test]
    fn test_place_order_fixes_total_and_starts_pending() {
        let order = placed_order();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, Decimal::new(4599 * 2 + 129, 0));
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.version(), 1);
        assert_eq!(order.aggregate_id(), "ORD-1234-AB");
    }

    #[test]
    fn test_place_order_with_no_items_has_zero_total() {
        let events = OrderAggregate::place(&place_command(vec![])).unwrap();
        let order = OrderAggregate::apply_first_event(&events[0]).unwrap();

        assert_eq!(order.total, Decimal::ZERO);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.items.is_empty());
    }

    #[test]
    fn test_update_status_is_permissive() {
        let mut order = placed_order();

        apply(&mut order, OrderCommand::UpdateStatus { status: OrderStatus::Returned, at: placed_at() }).unwrap();
        assert_eq!(order.status, OrderStatus::Returned);

        apply(&mut order, OrderCommand::UpdateStatus { status: OrderStatus::Pending, at: placed_at() }).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.version(), 3);
    }

    #[test]
    fn test_status_change_leaves_placement_fields_alone() {
        let mut order = placed_order();
        let before = order.clone();

        apply(&mut order, OrderCommand::UpdateStatus { status: OrderStatus::Shipped, at: placed_at() }).unwrap();

        assert_eq!(order.items, before.items);
        assert_eq!(order.total, before.total);
        assert_eq!(order.shipping_address, before.shipping_address);
        assert_eq!(order.placed_at, before.placed_at);
    }

    #[test]
    fn test_return_requires_delivery() {
        let mut order = placed_order();
        let result = apply(
            &mut order,
            OrderCommand::RequestReturn { requester: IdentityId::new("u1"), at: placed_at() },
        );

        assert_eq!(
            result,
            Err(OrderError::InvalidStatusTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::ReturnRequested,
            })
        );
    }

    #[test]
    fn test_return_requires_owner() {
        let mut order = placed_order();
        apply(&mut order, OrderCommand::UpdateStatus { status: OrderStatus::Delivered, at: placed_at() }).unwrap();

        let result = apply(
            &mut order,
            OrderCommand::RequestReturn { requester: IdentityId::new("u2"), at: placed_at() },
        );
        assert_eq!(result, Err(OrderError::NotOwner));
        assert_eq!(order.status, OrderStatus::Delivered);
    }

    #[test]
    fn test_return_after_delivery() {
        let mut order = placed_order();
        apply(&mut order, OrderCommand::UpdateStatus { status: OrderStatus::Delivered, at: placed_at() }).unwrap();
        apply(&mut order, OrderCommand::RequestReturn { requester: IdentityId::new("u1"), at: placed_at() }).unwrap();

        assert_eq!(order.status, OrderStatus::ReturnRequested);
    }

    #[test]
    fn test_load_from_events_rebuilds_state() {
        let mut events = OrderAggregate::place(&place_command(two_drills_and_a_bulb())).unwrap();
        events.push(OrderEvent::StatusChanged(OrderStatusChanged {
            from: OrderStatus::Pending,
            to: OrderStatus::Processing,
            changed_at: placed_at(),
        }));

        let envelopes: Vec<_> = events
            .into_iter()
            .enumerate()
            .map(|(i, e)| EventEnvelope::new("ORD-1234-AB", i as i64 + 1, e, Uuid::new_v4(), placed_at()))
            .collect();

        let order = OrderAggregate::load_from_events(&envelopes).unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.version(), 2);
    }

    #[test]
    fn test_first_event_must_be_placement() {
        let event = OrderEvent::StatusChanged(OrderStatusChanged {
            from: OrderStatus::Pending,
            to: OrderStatus::Shipped,
            changed_at: placed_at(),
        });
        assert_eq!(OrderAggregate::apply_first_event(&event), Err(OrderError::NotInitialized));
    }
}

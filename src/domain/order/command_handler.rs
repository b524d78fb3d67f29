use uuid::Uuid;

use super::aggregate::OrderAggregate;
use super::commands::{OrderCommand, PlaceOrder};
use super::errors::OrderError;
use super::events::OrderEvent;
use super::value_objects::OrderId;
use crate::domain::identity::IdentityId;
use crate::event_sourcing::core::{Aggregate, EventEnvelope};
use crate::event_sourcing::store::EventLog;

// ============================================================================
// Order Command Handler
// ============================================================================
//
// Orchestrates: Command → Aggregate → Events → Event Log → Projection
//
// The event log is the history of record. `orders` is the read projection,
// most recent first, updated in step with every append.
//
// ============================================================================

pub struct OrderCommandHandler {
    event_log: EventLog<OrderEvent>,
    orders: Vec<OrderAggregate>,
}

impl Default for OrderCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderCommandHandler {
    pub fn new() -> Self {
        Self {
            event_log: EventLog::new("Order"),
            orders: Vec::new(),
        }
    }

    /// Run a checkout and record the new order at the front of the list.
    pub fn place(
        &mut self,
        command: PlaceOrder,
        correlation_id: Uuid,
    ) -> Result<OrderAggregate, OrderError> {
        let events = OrderAggregate::place(&command)?;
        let first = events.first().ok_or(OrderError::NotInitialized)?;
        let mut order = OrderAggregate::apply_first_event(first)?;
        for event in &events[1..] {
            order.apply_event(event)?;
        }

        let envelopes = wrap(
            command.order_id.as_str(),
            0,
            events,
            correlation_id,
            command.placed_at,
            Some(&command.user_id),
        );
        self.event_log.append_events(command.order_id.as_str(), 0, envelopes)?;

        self.orders.insert(0, order.clone());
        Ok(order)
    }

    /// Handle a command against an existing order and return the new version.
    pub fn handle(
        &mut self,
        order_id: &OrderId,
        command: OrderCommand,
        correlation_id: Uuid,
    ) -> Result<i64, OrderError> {
        let index = self
            .orders
            .iter()
            .position(|o| &o.id == order_id)
            .ok_or_else(|| OrderError::OrderNotFound(order_id.clone()))?;

        let current = &self.orders[index];
        let expected_version = current.version();
        let events = current.handle_command(&command)?;

        let mut next = current.clone();
        for event in &events {
            next.apply_event(event)?;
        }

        let (at, user) = match &command {
            OrderCommand::UpdateStatus { at, .. } => (*at, None),
            OrderCommand::RequestReturn { requester, at } => (*at, Some(requester)),
        };
        let envelopes = wrap(order_id.as_str(), expected_version, events, correlation_id, at, user);
        let new_version = self
            .event_log
            .append_events(order_id.as_str(), expected_version, envelopes)?;

        self.orders[index] = next;
        Ok(new_version)
    }

    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.event_log.aggregate_exists(order_id.as_str())
    }

    /// All orders, most recent first.
    pub fn orders(&self) -> &[OrderAggregate] {
        &self.orders
    }

    pub fn order(&self, order_id: &OrderId) -> Option<&OrderAggregate> {
        self.orders.iter().find(|o| &o.id == order_id)
    }

    /// The order's events, oldest first.
    pub fn history(&self, order_id: &OrderId) -> &[EventEnvelope<OrderEvent>] {
        self.event_log.load_events(order_id.as_str())
    }

    /// Rebuild an order from its history alone, bypassing the projection.
    pub fn replay(&self, order_id: &OrderId) -> anyhow::Result<OrderAggregate> {
        self.event_log.load_aggregate(order_id.as_str())
    }
}

fn wrap(
    aggregate_id: &str,
    version: i64,
    events: Vec<OrderEvent>,
    correlation_id: Uuid,
    timestamp: chrono::DateTime<chrono::Utc>,
    user: Option<&IdentityId>,
) -> Vec<EventEnvelope<OrderEvent>> {
    events
        .into_iter()
        .zip(version + 1..)
        .map(|(event, seq)| {
            let envelope = EventEnvelope::new(aggregate_id, seq, event, correlation_id, timestamp);
            match user {
                Some(user) => envelope.with_user(user.as_str()),
                None => envelope,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::CartItem;
    use crate::domain::catalog::Catalog;
    use crate::domain::order::{OrderStatus, PaymentMethod, ShippingAddress};
    use chrono::{TimeZone, Utc};

    fn place(handler: &mut OrderCommandHandler, id: &str, user: &str) -> OrderAggregate {
        let product = Catalog::seeded().products()[3].clone();
        handler
            .place(
                PlaceOrder {
                    order_id: OrderId::new(id),
                    user_id: IdentityId::new(user),
                    items: vec![CartItem::new(product)],
                    payment_method: PaymentMethod::Cod,
                    shipping_address: ShippingAddress {
                        name: "Priya Patel".to_string(),
                        address: "1 Lake View".to_string(),
                        city: "Pune".to_string(),
                        zip: "411001".to_string(),
                    },
                    placed_at: Utc.with_ymd_and_hms(2025, 4, 1, 8, 0, 0).unwrap(),
                },
                Uuid::new_v4(),
            )
            .unwrap()
    }

    fn set_status(handler: &mut OrderCommandHandler, id: &str, status: OrderStatus) -> i64 {
        handler
            .handle(
                &OrderId::new(id),
                OrderCommand::UpdateStatus { status, at: Utc::now() },
                Uuid::new_v4(),
            )
            .unwrap()
    }

    #[test]
    fn test_orders_listed_most_recent_first() {
        let mut handler = OrderCommandHandler::new();
        place(&mut handler, "ORD-1000-AA", "u2");
        place(&mut handler, "ORD-2000-BB", "u2");

        let ids: Vec<&str> = handler.orders().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["ORD-2000-BB", "ORD-1000-AA"]);
    }

    #[test]
    fn test_handle_appends_history_and_updates_projection() {
        let mut handler = OrderCommandHandler::new();
        place(&mut handler, "ORD-1000-AA", "u2");

        assert_eq!(set_status(&mut handler, "ORD-1000-AA", OrderStatus::Processing), 2);
        assert_eq!(set_status(&mut handler, "ORD-1000-AA", OrderStatus::Shipped), 3);

        let id = OrderId::new("ORD-1000-AA");
        let history = handler.history(&id);
        let types: Vec<&str> = history.iter().map(|e| e.event_type.as_str()).collect();
        assert_eq!(types, vec!["OrderPlaced", "OrderStatusChanged", "OrderStatusChanged"]);
        assert_eq!(history[0].user_id.as_deref(), Some("u2"));
        assert!(history[1].user_id.is_none());

        assert_eq!(handler.order(&id).unwrap().status, OrderStatus::Shipped);
    }

    #[test]
    fn test_replay_matches_projection() {
        let mut handler = OrderCommandHandler::new();
        place(&mut handler, "ORD-1000-AA", "u2");
        set_status(&mut handler, "ORD-1000-AA", OrderStatus::Delivered);
        handler
            .handle(
                &OrderId::new("ORD-1000-AA"),
                OrderCommand::RequestReturn { requester: IdentityId::new("u2"), at: Utc::now() },
                Uuid::new_v4(),
            )
            .unwrap();

        let id = OrderId::new("ORD-1000-AA");
        let replayed = handler.replay(&id).unwrap();
        assert_eq!(&replayed, handler.order(&id).unwrap());
        assert_eq!(replayed.status, OrderStatus::ReturnRequested);
    }

    #[test]
    fn test_handle_unknown_order() {
        let mut handler = OrderCommandHandler::new();
        let result = handler.handle(
            &OrderId::new("ORD-9999-ZZ"),
            OrderCommand::UpdateStatus { status: OrderStatus::Shipped, at: Utc::now() },
            Uuid::new_v4(),
        );
        assert_eq!(result, Err(OrderError::OrderNotFound(OrderId::new("ORD-9999-ZZ"))));
    }

    #[test]
    fn test_rejected_command_leaves_order_untouched() {
        let mut handler = OrderCommandHandler::new();
        place(&mut handler, "ORD-1000-AA", "u2");
        let id = OrderId::new("ORD-1000-AA");

        let result = handler.handle(
            &id,
            OrderCommand::RequestReturn { requester: IdentityId::new("u2"), at: Utc::now() },
            Uuid::new_v4(),
        );

        assert!(matches!(result, Err(OrderError::InvalidStatusTransition { .. })));
        assert_eq!(handler.history(&id).len(), 1);
        assert_eq!(handler.order(&id).unwrap().status, OrderStatus::Pending);
    }

    #[test]
    fn test_duplicate_order_id_is_a_conflict() {
        let mut handler = OrderCommandHandler::new();
        place(&mut handler, "ORD-1000-AA", "u2");
        assert!(handler.contains(&OrderId::new("ORD-1000-AA")));

        let product = Catalog::seeded().products()[0].clone();
        let result = handler.place(
            PlaceOrder {
                order_id: OrderId::new("ORD-1000-AA"),
                user_id: IdentityId::new("u3"),
                items: vec![CartItem::new(product)],
                payment_method: PaymentMethod::Card,
                shipping_address: ShippingAddress {
                    name: "Amit Singh".to_string(),
                    address: "x".to_string(),
                    city: "y".to_string(),
                    zip: "z".to_string(),
                },
                placed_at: Utc::now(),
            },
            Uuid::new_v4(),
        );

        assert!(matches!(result, Err(OrderError::EventLog(_))));
        assert_eq!(handler.orders().len(), 1);
    }
}

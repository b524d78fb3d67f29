use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::notifications::NotificationCenter;
use crate::clock::Clock;
use crate::domain::cart::Cart;
use crate::domain::catalog::{Product, ProductId};
use crate::domain::identity::{Identity, IdentityId};
use crate::domain::order::{
    Order, OrderCommand, OrderCommandHandler, OrderError, OrderEvent, OrderId, OrderStatus,
    PaymentMethod, PlaceOrder, ShippingAddress,
};
use crate::event_sourcing::core::EventEnvelope;
use crate::metrics::StoreMetrics;

// ============================================================================
// Commerce Engine - cart, checkout, orders and running counters
// ============================================================================
//
// Flow for checkout:
// 1. Caller supplies the signed-in identity (or None)
// 2. Cart lines become a PlaceOrder command
// 3. Order aggregate validates and emits OrderPlaced
// 4. Event is appended to the order log and the order list
// 5. Stats move, cart clears
//
// ============================================================================

/// Running counters since the engine was created. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartStats {
    pub add_to_cart_count: u64,
    pub orders_placed_count: u64,
    pub total_revenue: Decimal,
}

pub struct CommerceEngine {
    cart: Cart,
    orders: OrderCommandHandler,
    stats: CartStats,
    notifications: NotificationCenter,
    clock: Arc<dyn Clock>,
    metrics: Arc<StoreMetrics>,
}

impl CommerceEngine {
    pub fn new(clock: Arc<dyn Clock>, metrics: Arc<StoreMetrics>, notification_ttl: Duration) -> Self {
        Self {
            cart: Cart::new(),
            orders: OrderCommandHandler::new(),
            stats: CartStats::default(),
            notifications: NotificationCenter::new(clock.clone(), notification_ttl),
            clock,
            metrics,
        }
    }

    // ========================================================================
    // Cart
    // ========================================================================

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Counts every call, including repeat adds of the same product.
    pub fn add_to_cart(&mut self, product: &Product) {
        let quantity = self.cart.add(product);
        self.stats.add_to_cart_count += 1;
        self.metrics.record_cart_addition();
        self.notifications.post(format!("Added {} to cart", product.name));

        tracing::debug!(product_id = %product.id, quantity, "Added to cart");
    }

    pub fn remove_from_cart(&mut self, id: &ProductId) {
        if self.cart.remove(id) {
            tracing::debug!(product_id = %id, "Removed from cart");
        }
    }

    /// Ignored when `quantity < 1` or the product is not in the cart.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) {
        if self.cart.update_quantity(id, quantity) {
            tracing::debug!(product_id = %id, quantity, "Cart quantity updated");
        } else {
            tracing::warn!(product_id = %id, quantity, "Cart quantity update ignored");
        }
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn cart_total(&self) -> Decimal {
        self.cart.total()
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Commit the cart as a new order for `identity`.
    ///
    /// Only a missing identity is refused, and then nothing changes. An
    /// empty cart commits a zero-total order. `shipping` defaults to the
    /// identity's own address details.
    pub fn place_order(
        &mut self,
        identity: Option<&Identity>,
        payment_method: PaymentMethod,
        shipping: Option<ShippingAddress>,
    ) -> Result<Order, OrderError> {
        let identity = identity.ok_or(OrderError::NotAuthenticated)?;

        let command = PlaceOrder {
            order_id: self.fresh_order_id(),
            user_id: identity.id.clone(),
            items: self.cart.lines().to_vec(),
            payment_method,
            shipping_address: shipping.unwrap_or_else(|| ShippingAddress::for_identity(identity)),
            placed_at: self.clock.now(),
        };

        let order = self.orders.place(command, Uuid::new_v4())?;

        self.stats.orders_placed_count += 1;
        self.stats.total_revenue += order.total;
        self.metrics.record_order_placed(order.total.to_f64().unwrap_or_default());
        self.cart.clear();

        tracing::info!(
            order_id = %order.id,
            identity_id = %order.user_id,
            total = %order.total,
            items = order.items.len(),
            "Order placed"
        );

        Ok(order)
    }

    /// Overwrite an order's status. Any status is accepted; see
    /// `OrderStatus::can_transition_to` for the fulfilment graph.
    /// Unknown ids are ignored.
    pub fn update_order_status(&mut self, order_id: &OrderId, status: OrderStatus) -> Result<(), OrderError> {
        let command = OrderCommand::UpdateStatus {
            status,
            at: self.clock.now(),
        };

        match self.orders.handle(order_id, command, Uuid::new_v4()) {
            Ok(version) => {
                self.metrics.record_status_change(status.as_str());
                self.notifications
                    .post(format!("Order #{} updated to {}", order_id, status));
                tracing::info!(order_id = %order_id, status = %status, version, "Order status updated");
                Ok(())
            }
            Err(OrderError::OrderNotFound(_)) => {
                tracing::warn!(order_id = %order_id, "Status update ignored, order not found");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Customer-side return. Only the owner may ask, and only once delivered.
    pub fn request_return(&mut self, order_id: &OrderId, requester: &Identity) -> Result<(), OrderError> {
        let command = OrderCommand::RequestReturn {
            requester: requester.id.clone(),
            at: self.clock.now(),
        };

        self.orders.handle(order_id, command, Uuid::new_v4())?;

        let status = OrderStatus::ReturnRequested;
        self.metrics.record_status_change(status.as_str());
        self.notifications.post(format!("Order #{} updated to {}", order_id, status));
        tracing::info!(order_id = %order_id, identity_id = %requester.id, "Return requested");
        Ok(())
    }

    /// Most recent first.
    pub fn orders(&self) -> &[Order] {
        self.orders.orders()
    }

    pub fn orders_for(&self, user_id: &IdentityId) -> Vec<&Order> {
        self.orders().iter().filter(|o| o.is_owned_by(user_id)).collect()
    }

    pub fn order(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.order(order_id)
    }

    pub fn history(&self, order_id: &OrderId) -> &[EventEnvelope<OrderEvent>] {
        self.orders.history(order_id)
    }

    pub fn return_request_count(&self) -> usize {
        self.orders()
            .iter()
            .filter(|o| o.status == OrderStatus::ReturnRequested)
            .count()
    }

    pub fn stats(&self) -> &CartStats {
        &self.stats
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn hide_notification(&mut self) {
        self.notifications.hide();
    }

    fn fresh_order_id(&self) -> OrderId {
        loop {
            let id = OrderId::generate();
            if !self.orders.contains(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::domain::catalog::Catalog;
    use crate::domain::identity::seed_identities;
    use crate::domain::order::{DEFAULT_ADDRESS, DEFAULT_CITY, DEFAULT_ZIP};

    fn engine() -> (Arc<ManualClock>, CommerceEngine) {
        let clock = Arc::new(ManualClock::default());
        let engine = CommerceEngine::new(
            clock.clone(),
            Arc::new(StoreMetrics::new().unwrap()),
            Duration::from_secs(3),
        );
        (clock, engine)
    }

    fn product(index: usize) -> Product {
        Catalog::seeded().products()[index].clone()
    }

    fn customer(index: usize) -> Identity {
        seed_identities().remove(index)
    }

    #[test]
    fn test_add_to_cart_counts_every_call() {
        let (_clock, mut engine) = engine();
        let drill = product(0);

        for _ in 0..3 {
            engine.add_to_cart(&drill);
        }

        assert_eq!(engine.cart().len(), 1);
        assert_eq!(engine.cart().quantity_of(&drill.id), Some(3));
        assert_eq!(engine.stats().add_to_cart_count, 3);
    }

    #[test]
    fn test_add_to_cart_posts_notification() {
        let (clock, mut engine) = engine();
        engine.add_to_cart(&product(3));

        assert_eq!(
            engine.notifications().current().unwrap().message,
            "Added Stanley Claw Hammer to cart"
        );

        clock.advance(Duration::from_secs(3));
        assert!(engine.notifications().current().is_none());
    }

    #[test]
    fn test_place_order_without_identity_changes_nothing() {
        let (_clock, mut engine) = engine();
        engine.add_to_cart(&product(0));

        let result = engine.place_order(None, PaymentMethod::Card, None);

        assert_eq!(result, Err(OrderError::NotAuthenticated));
        assert_eq!(engine.cart().len(), 1);
        assert!(engine.orders().is_empty());
        assert_eq!(engine.stats().orders_placed_count, 0);
    }

    #[test]
    fn test_place_order_with_empty_cart_commits_zero_total() {
        let (_clock, mut engine) = engine();
        let rahul = customer(0);

        let order = engine.place_order(Some(&rahul), PaymentMethod::Cod, None).unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, Decimal::ZERO);
        assert!(order.items.is_empty());
        assert_eq!(engine.orders().len(), 1);
        assert_eq!(engine.stats().orders_placed_count, 1);
        assert_eq!(engine.stats().total_revenue, Decimal::ZERO);
    }

    #[test]
    fn test_place_order_commits_cart() {
        let (clock, mut engine) = engine();
        let rahul = customer(0);
        let drill = product(0);
        let bulb = product(2);

        engine.add_to_cart(&drill);
        engine.add_to_cart(&drill);
        engine.add_to_cart(&bulb);
        let cart_total = engine.cart_total();
        let lines = engine.cart().lines().to_vec();

        let order = engine.place_order(Some(&rahul), PaymentMethod::Upi, None).unwrap();

        assert_eq!(order.total, cart_total);
        assert_eq!(order.items, lines);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.user_id, rahul.id);
        assert_eq!(order.placed_at, clock.now());
        assert_eq!(order.shipping_address, ShippingAddress::for_identity(&rahul));

        assert!(engine.cart().is_empty());
        assert_eq!(engine.stats().orders_placed_count, 1);
        assert_eq!(engine.stats().total_revenue, cart_total);
        assert_eq!(engine.orders()[0], order);
    }

    #[test]
    fn test_default_shipping_falls_back_to_fixed_address() {
        let (_clock, mut engine) = engine();
        let amit = customer(2);
        engine.add_to_cart(&product(1));

        let order = engine.place_order(Some(&amit), PaymentMethod::Cod, None).unwrap();

        assert_eq!(order.shipping_address.name, "Amit Singh");
        assert_eq!(order.shipping_address.address, DEFAULT_ADDRESS);
        assert_eq!(order.shipping_address.city, DEFAULT_CITY);
        assert_eq!(order.shipping_address.zip, DEFAULT_ZIP);
    }

    #[test]
    fn test_explicit_shipping_is_kept() {
        let (_clock, mut engine) = engine();
        let priya = customer(1);
        engine.add_to_cart(&product(1));
        let shipping = ShippingAddress {
            name: "Priya P".to_string(),
            address: "7 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            zip: "560001".to_string(),
        };

        let order = engine
            .place_order(Some(&priya), PaymentMethod::Card, Some(shipping.clone()))
            .unwrap();
        assert_eq!(order.shipping_address, shipping);
    }

    #[test]
    fn test_order_total_survives_later_cart_changes() {
        let (_clock, mut engine) = engine();
        let rahul = customer(0);
        engine.add_to_cart(&product(0));
        let order = engine.place_order(Some(&rahul), PaymentMethod::Upi, None).unwrap();

        engine.add_to_cart(&product(7));
        engine.add_to_cart(&product(7));

        assert_eq!(engine.order(&order.id).unwrap().total, Decimal::new(4599, 0));
    }

    #[test]
    fn test_revenue_is_sum_of_order_totals() {
        let (_clock, mut engine) = engine();
        let rahul = customer(0);
        let priya = customer(1);

        engine.add_to_cart(&product(0));
        engine.place_order(Some(&rahul), PaymentMethod::Upi, None).unwrap();
        engine.add_to_cart(&product(4));
        engine.add_to_cart(&product(5));
        engine.place_order(Some(&priya), PaymentMethod::Cod, None).unwrap();

        let sum: Decimal = engine.orders().iter().map(|o| o.total).sum();
        assert_eq!(engine.stats().total_revenue, sum);
        assert_eq!(engine.stats().orders_placed_count, 2);
        assert_eq!(engine.orders_for(&priya.id).len(), 1);
        assert_eq!(engine.orders()[0].user_id, priya.id);
    }

    #[test]
    fn test_update_order_status_changes_only_status() {
        let (_clock, mut engine) = engine();
        let rahul = customer(0);
        engine.add_to_cart(&product(0));
        let placed = engine.place_order(Some(&rahul), PaymentMethod::Upi, None).unwrap();

        engine.update_order_status(&placed.id, OrderStatus::Shipped).unwrap();

        let order = engine.order(&placed.id).unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.total, placed.total);
        assert_eq!(order.items, placed.items);
        assert_eq!(
            engine.notifications().current().unwrap().message,
            format!("Order #{} updated to Shipped", placed.id)
        );
    }

    #[test]
    fn test_update_order_status_unknown_id_is_noop() {
        let (_clock, mut engine) = engine();
        let rahul = customer(0);
        engine.add_to_cart(&product(0));
        let placed = engine.place_order(Some(&rahul), PaymentMethod::Upi, None).unwrap();
        engine.hide_notification();

        engine
            .update_order_status(&OrderId::new("ORD-0000-XX"), OrderStatus::Delivered)
            .unwrap();

        assert_eq!(engine.order(&placed.id).unwrap().status, OrderStatus::Pending);
        assert!(engine.notifications().current().is_none());
    }

    #[test]
    fn test_return_request_flow() {
        let (_clock, mut engine) = engine();
        let rahul = customer(0);
        let priya = customer(1);
        engine.add_to_cart(&product(0));
        let order = engine.place_order(Some(&rahul), PaymentMethod::Upi, None).unwrap();

        assert!(matches!(
            engine.request_return(&order.id, &rahul),
            Err(OrderError::InvalidStatusTransition { .. })
        ));

        engine.update_order_status(&order.id, OrderStatus::Delivered).unwrap();
        assert_eq!(engine.request_return(&order.id, &priya), Err(OrderError::NotOwner));
        assert_eq!(engine.return_request_count(), 0);

        engine.request_return(&order.id, &rahul).unwrap();
        assert_eq!(engine.return_request_count(), 1);
        assert_eq!(engine.history(&order.id).len(), 3);
    }

    #[test]
    fn test_order_ids_are_unique_and_well_formed() {
        let (_clock, mut engine) = engine();
        let rahul = customer(0);

        for _ in 0..20 {
            engine.add_to_cart(&product(2));
            engine.place_order(Some(&rahul), PaymentMethod::Cod, None).unwrap();
        }

        let mut ids: Vec<&str> = engine.orders().iter().map(|o| o.id.as_str()).collect();
        assert!(ids.iter().all(|id| id.starts_with("ORD-") && id.len() == 11));
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }
}

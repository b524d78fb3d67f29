use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::aggregate::OrderAggregate;
use crate::domain::cart::CartItem;

// ============================================================================
// Order Summary - subtotal, tax and total as shown at checkout and on invoices
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub tax: Decimal,
    /// Always zero: shipping is free.
    pub shipping: Decimal,
    pub total: Decimal,
}

impl OrderSummary {
    /// `tax_rate` is a fraction, e.g. 0.18. Tax is rounded half away
    /// from zero to paise.
    pub fn for_items(items: &[CartItem], tax_rate: Decimal) -> Self {
        let subtotal: Decimal = items.iter().map(CartItem::line_total).sum();
        Self::from_subtotal(subtotal, tax_rate)
    }

    /// Uses the total fixed at placement as the subtotal.
    pub fn for_order(order: &OrderAggregate, tax_rate: Decimal) -> Self {
        Self::from_subtotal(order.total, tax_rate)
    }

    fn from_subtotal(subtotal: Decimal, tax_rate: Decimal) -> Self {
        let tax = (subtotal * tax_rate).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Self {
            subtotal,
            tax,
            shipping: Decimal::ZERO,
            total: subtotal + tax,
        }
    }

    pub fn shipping_label(&self) -> String {
        if self.shipping.is_zero() {
            "Free".to_string()
        } else {
            self.shipping.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Catalog;

    #[test]
    fn test_eighteen_percent_tax_and_free_shipping() {
        let mut line = CartItem::new(Catalog::seeded().products()[0].clone());
        line.quantity = 2;

        let summary = OrderSummary::for_items(&[line], Decimal::new(18, 2));

        assert_eq!(summary.subtotal, Decimal::new(9198, 0));
        assert_eq!(summary.tax, Decimal::new(165564, 2));
        assert_eq!(summary.total, Decimal::new(1085364, 2));
        assert_eq!(summary.shipping_label(), "Free");
    }

    #[test]
    fn test_tax_is_rounded_to_two_places() {
        let line = CartItem::new(Catalog::seeded().products()[2].clone());
        let summary = OrderSummary::for_items(&[line], Decimal::new(175, 3));

        // 129 * 0.175 = 22.575
        assert_eq!(summary.tax, Decimal::new(2258, 2));
    }

    #[test]
    fn test_empty_items() {
        let summary = OrderSummary::for_items(&[], Decimal::new(18, 2));
        assert_eq!(summary.total, Decimal::ZERO);
    }
}

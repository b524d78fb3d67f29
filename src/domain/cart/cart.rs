use rust_decimal::Decimal;

use super::value_objects::CartItem;
use crate::domain::catalog::{Product, ProductId};

// ============================================================================
// Cart
// ============================================================================
//
// Lines keep insertion order. There is at most one line per product id, and
// every line has quantity >= 1. The total is never cached.
//
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartItem] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn quantity_of(&self, id: &ProductId) -> Option<u32> {
        self.line(id).map(|l| l.quantity)
    }

    /// Increment the product's line, or append a new one with quantity 1.
    /// Returns the line's new quantity.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }

        self.lines.push(CartItem::new(product.clone()));
        1
    }

    /// Returns whether a line was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.product.id != id);
        self.lines.len() != before
    }

    /// Set a line's quantity exactly. Quantities below 1 and unknown ids
    /// are ignored; returns whether anything changed.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) -> bool {
        if quantity < 1 {
            return false;
        }

        match self.lines.iter_mut().find(|l| &l.product.id == id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Recomputed on every call.
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartItem::line_total).sum()
    }

    fn line(&self, id: &ProductId) -> Option<&CartItem> {
        self.lines.iter().find(|l| &l.product.id == id)
    }
}

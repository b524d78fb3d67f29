use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Product, ProductId};

// ============================================================================
// Cart Value Objects
// ============================================================================

/// One cart line: a snapshot of the product taken when it was first added,
/// plus a quantity of at least one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product: Product) -> Self {
        Self { product, quantity: 1 }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

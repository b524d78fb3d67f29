use rust_decimal::Decimal;

// ============================================================================
// Catalog Errors
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CatalogError {
    #[error("Product name cannot be empty")]
    MissingName,

    #[error("Product price must be greater than zero")]
    MissingPrice,

    #[error("Product price cannot be negative: {0}")]
    NegativePrice(Decimal),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

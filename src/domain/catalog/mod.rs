// ============================================================================
// Catalog Domain - products, the catalog store, filtering and search
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod catalog;
pub mod filter;
mod seed;

pub use value_objects::*;
pub use errors::*;
pub use catalog::*;
pub use filter::*;

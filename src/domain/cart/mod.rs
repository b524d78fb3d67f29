// ============================================================================
// Cart Domain - the live, pre-checkout cart
// ============================================================================

pub mod value_objects;
pub mod cart;

pub use value_objects::*;
pub use cart::*;

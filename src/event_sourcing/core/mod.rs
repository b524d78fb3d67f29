// ============================================================================
// Event Sourcing Core - Generic Abstractions
// ============================================================================
//
// No domain types here (no Order, Identity, Product).
//
// ============================================================================

pub mod aggregate;
pub mod event;

pub use aggregate::Aggregate;
pub use event::{DomainEvent, EventEnvelope};

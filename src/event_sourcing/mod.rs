// ============================================================================
// Event Sourcing Infrastructure
// ============================================================================
//
// Generic aggregate/event plumbing plus an in-memory event log.
// Domain-specific code is in src/domain/
//
// ============================================================================

pub mod core;
pub mod store;

pub use self::core::*;
pub use self::store::*;

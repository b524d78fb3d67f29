// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each domain has its own subdirectory. Orders follow the aggregate layout:
// - Value objects
// - Events
// - Commands
// - Errors
// - Aggregate implementation
// - Command handler
//
// Catalog, identity and cart are plain state with their own rules and
// errors; they have no event history.
//
// ============================================================================

pub mod catalog;
pub mod identity;
pub mod cart;
pub mod order;

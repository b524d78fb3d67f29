// ============================================================================
// Event Sourcing Store - In-Memory Event Log
// ============================================================================
//
// Process-lifetime only; nothing here is persisted.
//
// ============================================================================

pub mod event_log;

pub use event_log::{EventLog, EventLogError};

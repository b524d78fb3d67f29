// ============================================================================
// Services - stateful engines composed from the domain types
// ============================================================================

pub mod notifications;
pub mod commerce;

pub use notifications::{Notification, NotificationCenter};
pub use commerce::{CartStats, CommerceEngine};

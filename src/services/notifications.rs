use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

use crate::clock::Clock;

// ============================================================================
// Notification Center - a single transient message
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub posted_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Holds at most one notification. Posting replaces whatever is showing.
/// Expiry is checked against the clock on read; nothing runs in the background.
pub struct NotificationCenter {
    clock: Arc<dyn Clock>,
    ttl: Duration,
    current: Option<Notification>,
}

impl NotificationCenter {
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self { clock, ttl, current: None }
    }

    pub fn post(&mut self, message: impl Into<String>) {
        let posted_at = self.clock.now();
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or_else(|_| chrono::Duration::zero());
        let notification = Notification {
            message: message.into(),
            posted_at,
            expires_at: posted_at + ttl,
        };

        tracing::debug!(message = %notification.message, "Notification posted");
        self.current = Some(notification);
    }

    /// The visible notification, if it has not expired or been hidden.
    pub fn current(&self) -> Option<&Notification> {
        let now = self.clock.now();
        self.current.as_ref().filter(|n| now < n.expires_at)
    }

    pub fn hide(&mut self) {
        self.current = None;
    }
}

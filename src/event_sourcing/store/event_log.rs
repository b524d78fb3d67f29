use std::collections::HashMap;

use crate::event_sourcing::core::{Aggregate, DomainEvent, EventEnvelope};

// ============================================================================
// Generic Event Log - Append-only history per aggregate
// ============================================================================
//
// Responsibilities:
// 1. Append events to an aggregate's stream (append-only)
// 2. Load event history for aggregates
// 3. Optimistic version check on append
//
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EventLogError {
    #[error("Cannot append empty event list")]
    EmptyAppend,

    #[error("Concurrency conflict on {aggregate_id}: expected version {expected}, but current is {current}")]
    ConcurrencyConflict {
        aggregate_id: String,
        expected: i64,
        current: i64,
    },
}

pub struct EventLog<E: DomainEvent> {
    aggregate_type_name: String,
    streams: HashMap<String, Vec<EventEnvelope<E>>>,
}

impl<E: DomainEvent> EventLog<E> {
    pub fn new(aggregate_type_name: &str) -> Self {
        Self {
            aggregate_type_name: aggregate_type_name.to_string(),
            streams: HashMap::new(),
        }
    }

    /// Append events, returning the new version.
    ///
    /// `expected_version` must equal the stream's current length.
    pub fn append_events(
        &mut self,
        aggregate_id: &str,
        expected_version: i64,
        events: Vec<EventEnvelope<E>>,
    ) -> Result<i64, EventLogError> {
        if events.is_empty() {
            return Err(EventLogError::EmptyAppend);
        }

        let current = self.current_version(aggregate_id);
        if current != expected_version {
            return Err(EventLogError::ConcurrencyConflict {
                aggregate_id: aggregate_id.to_string(),
                expected: expected_version,
                current,
            });
        }

        let stream = self.streams.entry(aggregate_id.to_string()).or_default();
        let event_count = events.len();
        stream.extend(events);
        let new_version = stream.len() as i64;

        tracing::debug!(
            aggregate_id = %aggregate_id,
            aggregate_type = %self.aggregate_type_name,
            new_version = new_version,
            event_count = event_count,
            "Appended events to event log"
        );

        Ok(new_version)
    }

    pub fn current_version(&self, aggregate_id: &str) -> i64 {
        self.streams.get(aggregate_id).map_or(0, |s| s.len() as i64)
    }

    pub fn aggregate_exists(&self, aggregate_id: &str) -> bool {
        self.streams.contains_key(aggregate_id)
    }

    /// Events for one aggregate, oldest first. Empty when unknown.
    pub fn load_events(&self, aggregate_id: &str) -> &[EventEnvelope<E>] {
        self.streams.get(aggregate_id).map_or(&[], Vec::as_slice)
    }

    pub fn load_aggregate<A>(&self, aggregate_id: &str) -> anyhow::Result<A>
    where
        A: Aggregate<Event = E>,
        A::Error: std::fmt::Display,
    {
        A::load_from_events(self.load_events(aggregate_id))
    }

    /// Total events across all streams.
    pub fn len(&self) -> usize {
        self.streams.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

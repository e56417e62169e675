//! In-memory event bus implementation for testing.
//!
//! Captures published envelopes synchronously so tests can assert on
//! exactly what a handler dispatched after commit.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

/// In-memory event bus for tests.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned. Acceptable for test
/// code; production deployments use a durable publisher.
pub struct InMemoryEventBus {
    published: RwLock<Vec<EventEnvelope>>,
}

impl InMemoryEventBus {
    /// Creates a new empty event bus.
    pub fn new() -> Self {
        Self {
            published: RwLock::new(Vec::new()),
        }
    }

    /// Returns all published events (for test assertions).
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .clone()
    }

    /// Returns events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Returns the number of published events.
    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .len()
    }

    /// Checks whether an event of the given type was published.
    pub fn has_event(&self, event_type: &str) -> bool {
        self.published_events()
            .iter()
            .any(|e| e.event_type == event_type)
    }

    /// Clears captured events.
    pub fn clear(&self) {
        self.published
            .write()
            .expect("InMemoryEventBus: published lock poisoned")
            .clear();
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.published
            .write()
            .expect("InMemoryEventBus: published lock poisoned")
            .push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::class_schedule::ClassBooked;
    use crate::domain::foundation::{ClassScheduleId, EventId, Timestamp};

    fn booked_envelope(class_id: i64) -> EventEnvelope {
        let event = ClassBooked {
            event_id: EventId::new(),
            class_schedule_id: ClassScheduleId::new(class_id),
            class_name: "Spin".to_string(),
            current_bookings: 1,
            capacity: 10,
            occurred_at: Timestamp::now(),
        };
        EventEnvelope::from_event(&event)
    }

    #[tokio::test]
    async fn publish_captures_envelope() {
        let bus = InMemoryEventBus::new();

        bus.publish(booked_envelope(1)).await.unwrap();

        assert_eq!(bus.event_count(), 1);
        assert!(bus.has_event("class.booked"));
    }

    #[tokio::test]
    async fn publish_all_preserves_order() {
        let bus = InMemoryEventBus::new();

        bus.publish_all(vec![booked_envelope(1), booked_envelope(2)])
            .await
            .unwrap();

        let events = bus.published_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].aggregate_id, "1");
        assert_eq!(events[1].aggregate_id, "2");
    }

    #[tokio::test]
    async fn events_of_type_filters() {
        let bus = InMemoryEventBus::new();
        bus.publish(booked_envelope(1)).await.unwrap();

        assert_eq!(bus.events_of_type("class.booked").len(), 1);
        assert!(bus.events_of_type("class.cancelled").is_empty());
    }

    #[tokio::test]
    async fn clear_empties_the_bus() {
        let bus = InMemoryEventBus::new();
        bus.publish(booked_envelope(1)).await.unwrap();

        bus.clear();

        assert_eq!(bus.event_count(), 0);
    }
}

//! Document change events and the broadcast bus that carries them.
//!
//! Stores emit a [`DocumentChanged`] event whenever a document's content
//! changes. Downstream consumers (the live summary service, hosts, tests)
//! subscribe independently. Delivery is at-least-once from a consumer's
//! point of view: the bus may carry duplicates for one logical change and
//! never coalesces, so consumers must be idempotent. A consumer that falls
//! behind the channel capacity observes `Lagged` and has to treat the gap
//! as "anything may have changed".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Notification that a stored document's content changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChanged {
    /// Unique event identifier (UUIDv7 for temporal ordering).
    pub event_id: Uuid,
    /// Store path of the changed document (reference plus extension).
    pub path: String,
    /// When the change was observed (UTC).
    pub occurred_at: DateTime<Utc>,
}

impl DocumentChanged {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            path: path.into(),
            occurred_at: Utc::now(),
        }
    }
}

/// Broadcast bus for document change notifications.
///
/// Cheap to share behind an `Arc`; every subscriber gets an independent
/// stream starting at subscription time.
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<DocumentChanged>,
}

impl EventBus {
    /// Create a new event bus with the given buffer capacity.
    ///
    /// Recommended: 256 for production, 32 for tests.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit a change event to all subscribers.
    ///
    /// If there are no active subscribers, the event is silently dropped.
    pub fn emit(&self, event: DocumentChanged) {
        let subscriber_count = self.tx.receiver_count();
        tracing::debug!(
            event_id = %event.event_id,
            doc_path = %event.path,
            subscriber_count,
            "EventBus emit"
        );
        let _ = self.tx.send(event);
    }

    /// Subscribe to change events. Each subscriber gets its own independent stream.
    pub fn subscribe(&self) -> broadcast::Receiver<DocumentChanged> {
        self.tx.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(crate::defaults::EVENT_BUS_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus_emit_subscribe() {
        let bus = EventBus::new(32);
        let mut rx = bus.subscribe();

        bus.emit(DocumentChanged::new("notes.md"));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.path, "notes.md");
    }

    #[tokio::test]
    async fn test_event_bus_multiple_subscribers_each_receive() {
        let bus = EventBus::new(32);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.emit(DocumentChanged::new("a.md"));

        assert_eq!(rx1.recv().await.unwrap().path, "a.md");
        assert_eq!(rx2.recv().await.unwrap().path, "a.md");
    }

    #[tokio::test]
    async fn test_event_bus_emit_without_subscribers_does_not_panic() {
        let bus = EventBus::new(32);
        bus.emit(DocumentChanged::new("ignored.md"));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_event_bus_late_subscriber_misses_earlier_events() {
        let bus = EventBus::new(32);
        bus.emit(DocumentChanged::new("early.md"));

        let mut rx = bus.subscribe();
        bus.emit(DocumentChanged::new("late.md"));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.path, "late.md");
    }

    #[test]
    fn test_document_changed_event_ids_are_unique() {
        let a = DocumentChanged::new("x.md");
        let b = DocumentChanged::new("x.md");
        assert_ne!(a.event_id, b.event_id);
    }

    #[test]
    fn test_document_changed_serializes_path() {
        let event = DocumentChanged::new("notes.md");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"path\":\"notes.md\""));
    }
}

//! In-memory document store for deterministic testing.
//!
//! Behaves exactly like a real store from the pipeline's point of view
//! (same handle mapping, same change events) without touching the
//! filesystem.
//!
//! ## Usage
//!
//! ```rust
//! use tagsum_vault::MemoryVault;
//!
//! let vault = MemoryVault::new()
//!     .with_document("notes", "#proj kickoff\n## Milestone One\n");
//! vault.update("notes", "#proj kickoff\n## Renamed\n");
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tagsum_core::defaults::EVENT_BUS_CAPACITY;
use tagsum_core::{DocumentChanged, DocumentHandle, DocumentStore, EventBus, Result};

/// In-memory document store. Clones share content and the event bus.
#[derive(Clone)]
pub struct MemoryVault {
    docs: Arc<Mutex<HashMap<String, String>>>,
    events: Arc<EventBus>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self {
            docs: Arc::new(Mutex::new(HashMap::new())),
            events: Arc::new(EventBus::new(EVENT_BUS_CAPACITY)),
        }
    }

    /// Seed a document without emitting a change event.
    pub fn with_document(self, reference: &str, text: &str) -> Self {
        let handle = DocumentHandle::from_reference(reference);
        self.docs.lock().unwrap().insert(handle.path, text.to_string());
        self
    }

    /// Insert or overwrite a document and notify subscribers.
    pub fn update(&self, reference: &str, text: &str) {
        let handle = DocumentHandle::from_reference(reference);
        self.docs
            .lock()
            .unwrap()
            .insert(handle.path.clone(), text.to_string());
        self.events.emit(DocumentChanged::new(handle.path));
    }

    /// Remove a document silently.
    pub fn remove(&self, reference: &str) {
        let handle = DocumentHandle::from_reference(reference);
        self.docs.lock().unwrap().remove(&handle.path);
    }

    /// The bus this vault emits change events on.
    pub fn events(&self) -> &EventBus {
        &self.events
    }
}

impl Default for MemoryVault {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryVault {
    async fn resolve(&self, reference: &str) -> Result<Option<DocumentHandle>> {
        let handle = DocumentHandle::from_reference(reference);
        let present = self.docs.lock().unwrap().contains_key(&handle.path);
        Ok(present.then_some(handle))
    }

    async fn read_text(&self, handle: &DocumentHandle) -> Result<String> {
        let docs = self.docs.lock().unwrap();
        docs.get(&handle.path).cloned().ok_or_else(|| {
            tagsum_core::Error::DocumentNotFound(handle.reference.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_document_resolves() {
        let vault = MemoryVault::new().with_document("notes", "hello");
        let handle = vault.resolve("notes").await.unwrap().expect("resolves");
        assert_eq!(handle.path, "notes.md");
        assert_eq!(vault.read_text(&handle).await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_missing_document_is_none() {
        let vault = MemoryVault::new();
        assert!(vault.resolve("ghost").await.unwrap().is_none());
        assert!(!vault.exists("ghost").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_emits_change_event() {
        let vault = MemoryVault::new();
        let mut rx = vault.events().subscribe();

        vault.update("notes", "v1");

        let event = rx.recv().await.unwrap();
        assert_eq!(event.path, "notes.md");
    }

    #[tokio::test]
    async fn test_seeding_does_not_emit() {
        let vault = MemoryVault::new();
        let mut rx = vault.events().subscribe();

        let vault = vault.with_document("quiet", "x");
        vault.update("loud", "y");

        // The only observable event is the update.
        let event = rx.recv().await.unwrap();
        assert_eq!(event.path, "loud.md");
    }

    #[tokio::test]
    async fn test_remove_then_resolve_is_none() {
        let vault = MemoryVault::new().with_document("notes", "x");
        vault.remove("notes");
        assert!(vault.resolve("notes").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_content_and_bus() {
        let vault = MemoryVault::new();
        let clone = vault.clone();
        let mut rx = vault.events().subscribe();

        clone.update("shared", "body");

        assert!(vault.resolve("shared").await.unwrap().is_some());
        assert_eq!(rx.recv().await.unwrap().path, "shared.md");
    }
}

//! Filesystem-backed document store.
//!
//! Documents live as files under a root directory. References map to
//! paths through [`DocumentHandle::from_reference`], so `projects/plan`
//! resolves to `<root>/projects/plan.md`. Writes through [`save`] and
//! externally observed edits reported through [`notify_changed`] both
//! emit [`DocumentChanged`] on the vault's event bus.
//!
//! [`save`]: FilesystemVault::save
//! [`notify_changed`]: FilesystemVault::notify_changed

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tagsum_core::defaults::EVENT_BUS_CAPACITY;
use tagsum_core::{
    DocumentChanged, DocumentHandle, DocumentStore, Error, EventBus, Result,
};
use tokio::fs;
use tracing::{debug, warn};

/// Document store rooted at a local directory.
pub struct FilesystemVault {
    root: PathBuf,
    events: Arc<EventBus>,
}

impl FilesystemVault {
    /// Create a vault rooted at the given directory, with its own bus.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_event_bus(root, Arc::new(EventBus::new(EVENT_BUS_CAPACITY)))
    }

    /// Create a vault that emits on a shared bus.
    pub fn with_event_bus(root: impl Into<PathBuf>, events: Arc<EventBus>) -> Self {
        Self {
            root: root.into(),
            events,
        }
    }

    /// The bus this vault emits change events on.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    fn full_path(&self, storage_path: &str) -> PathBuf {
        self.root.join(storage_path)
    }

    /// Write a document's text and notify subscribers.
    ///
    /// Parent directories are created as needed. Creating a new document
    /// and overwriting an existing one both count as a change.
    pub async fn save(&self, reference: &str, text: &str) -> Result<()> {
        if !is_safe_reference(reference) {
            return Err(Error::InvalidInput(format!(
                "unsafe document reference: {reference}"
            )));
        }
        let handle = DocumentHandle::from_reference(reference);
        let full = self.full_path(&handle.path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&full, text).await?;
        debug!(
            doc_path = %handle.path,
            size = text.len(),
            "FilesystemVault: save"
        );
        self.events.emit(DocumentChanged::new(handle.path));
        Ok(())
    }

    /// Report an externally observed edit at a store path.
    ///
    /// For hosts that watch the root directory themselves; the vault
    /// cannot see writes that bypass [`save`](Self::save).
    pub fn notify_changed(&self, path: impl Into<String>) {
        self.events.emit(DocumentChanged::new(path));
    }
}

#[async_trait]
impl DocumentStore for FilesystemVault {
    async fn resolve(&self, reference: &str) -> Result<Option<DocumentHandle>> {
        if !is_safe_reference(reference) {
            warn!(
                doc_reference = %reference,
                "FilesystemVault: rejecting unsafe reference"
            );
            return Ok(None);
        }
        let handle = DocumentHandle::from_reference(reference);
        let full = self.full_path(&handle.path);
        match fs::metadata(&full).await {
            Ok(meta) if meta.is_file() => Ok(Some(handle)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn read_text(&self, handle: &DocumentHandle) -> Result<String> {
        let full = self.full_path(&handle.path);
        debug!(doc_path = %handle.path, "FilesystemVault: read");
        Ok(fs::read_to_string(&full).await?)
    }
}

/// A reference is safe when it stays inside the root: relative, made of
/// normal components only (no `..`, no leading `/`, no drive prefixes).
fn is_safe_reference(reference: &str) -> bool {
    let path = Path::new(reference);
    !reference.is_empty()
        && !path.is_absolute()
        && path.components().all(|c| matches!(c, Component::Normal(_)))
}

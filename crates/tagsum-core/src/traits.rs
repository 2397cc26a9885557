//! Core traits for tagsum abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability. The host's
//! document store, inline renderer, and output surface all stay behind
//! these seams; nothing in the pipeline depends on a concrete one.

use async_trait::async_trait;
use serde::Serialize;

use crate::defaults::DOCUMENT_EXTENSION;
use crate::error::Result;

// =============================================================================
// DOCUMENT STORE
// =============================================================================

/// Handle to a resolved document within a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentHandle {
    /// Reference the document was resolved from (no extension).
    pub reference: String,
    /// Store path, reference plus extension. Change notifications carry
    /// exactly this string.
    pub path: String,
    /// Display name used as the link target base (final path component
    /// without extension).
    pub display_name: String,
}

impl DocumentHandle {
    /// Map a document reference to its handle.
    ///
    /// This is the single authority for the reference → path → display
    /// name mapping; stores and change matching both go through it.
    pub fn from_reference(reference: &str) -> Self {
        let path = format!("{reference}{DOCUMENT_EXTENSION}");
        let display_name = display_name_of(&path);
        Self {
            reference: reference.to_string(),
            path,
            display_name,
        }
    }
}

/// Final path component without its extension.
fn display_name_of(path: &str) -> String {
    let file_name = path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

/// Read access to a document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Resolve a reference to a document handle, or `None` if no document
    /// exists at the mapped path.
    async fn resolve(&self, reference: &str) -> Result<Option<DocumentHandle>>;

    /// Read the full text of a resolved document.
    async fn read_text(&self, handle: &DocumentHandle) -> Result<String>;

    /// Check whether a reference resolves, without keeping the handle.
    async fn exists(&self, reference: &str) -> Result<bool> {
        Ok(self.resolve(reference).await?.is_some())
    }
}

// =============================================================================
// RENDERING SEAMS
// =============================================================================

/// Renders one markdown line into the host's display form.
#[async_trait]
pub trait InlineRenderer: Send + Sync {
    /// Render a single line of markdown (plain text plus wiki links).
    /// `source_id` identifies the document the embed lives in, so the
    /// host can resolve relative link targets.
    async fn render_inline(&self, markdown: &str, source_id: &str) -> Result<String>;
}

/// A live output region owned by exactly one embed instance.
///
/// Methods take `&self` because racing pipeline runs hold shared
/// references; implementations use interior mutability.
#[async_trait]
pub trait OutputSurface: Send + Sync {
    /// Remove all previously rendered blocks.
    async fn clear(&self) -> Result<()>;

    /// Append a group heading block.
    async fn append_heading(&self, text: &str) -> Result<()>;

    /// Append one rendered list item under the current group.
    async fn append_list_item(&self, rendered: &str) -> Result<()>;

    /// Append a plain message block (errors and notices).
    async fn append_message(&self, text: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_from_reference_appends_extension() {
        let handle = DocumentHandle::from_reference("notes");
        assert_eq!(handle.reference, "notes");
        assert_eq!(handle.path, "notes.md");
        assert_eq!(handle.display_name, "notes");
    }

    #[test]
    fn test_handle_from_nested_reference_uses_file_stem() {
        let handle = DocumentHandle::from_reference("projects/2026/roadmap");
        assert_eq!(handle.path, "projects/2026/roadmap.md");
        assert_eq!(handle.display_name, "roadmap");
    }

    #[test]
    fn test_display_name_keeps_dotted_stems() {
        // Only the final extension is dropped.
        let handle = DocumentHandle::from_reference("reports/q3.final");
        assert_eq!(handle.path, "reports/q3.final.md");
        assert_eq!(handle.display_name, "q3.final");
    }
}

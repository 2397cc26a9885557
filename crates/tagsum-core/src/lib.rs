//! # tagsum-core
//!
//! Core types, traits, and abstractions for the tagsum library.
//!
//! This crate provides the tag-to-header extraction pipeline, the summary
//! renderer, embed configuration parsing, the document change bus, and the
//! trait seams (store, inline renderer, output surface) that other tagsum
//! crates depend on.

pub mod defaults;
pub mod embed;
pub mod error;
pub mod events;
pub mod extract;
pub mod logging;
pub mod summary;
pub mod tags;
pub mod traits;

// Re-export commonly used types at crate root
pub use defaults::HeaderRule;
pub use embed::{EmbedConfig, RenderContext};
pub use error::{Error, Result};
pub use events::{DocumentChanged, EventBus};
pub use extract::extract_tag_headers;
pub use summary::{render_summary, RenderInstruction};
pub use tags::{HeaderText, Tag, TagHeaderIndex};
pub use traits::{DocumentHandle, DocumentStore, InlineRenderer, OutputSurface};

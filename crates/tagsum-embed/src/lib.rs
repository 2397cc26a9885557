//! # tagsum-embed
//!
//! Live summary embeds over a document store. An embed binds a fenced
//! code block's config to one document, renders a tag-to-header summary
//! onto an output surface, and keeps it current as the document changes.
//!
//! [`SummaryService`] owns the embed registry and the change listener;
//! [`markdown`] provides inline renderers and [`surface`] the output
//! surface implementations.

mod controller;
pub mod markdown;
pub mod service;
pub mod surface;

#[cfg(test)]
mod tests;

pub use markdown::{HtmlInlineRenderer, PlainTextRenderer};
pub use service::{ServiceConfig, ServiceHandle, SummaryEvent, SummaryService};
pub use surface::{HtmlSurface, RecordingSurface, SurfaceOp};

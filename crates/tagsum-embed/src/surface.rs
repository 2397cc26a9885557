//! Output surfaces for rendered summaries.
//!
//! A surface is the live region one embed block owns. [`HtmlSurface`]
//! accumulates blocks and serializes them on demand; [`RecordingSurface`]
//! keeps the raw operation log for assertions in tests.

use std::sync::Mutex;

use async_trait::async_trait;
use tagsum_core::{OutputSurface, Result};

use crate::markdown::html_escape;

/// One surface operation, as applied by a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    Clear,
    Heading(String),
    Item(String),
    Message(String),
}

/// Surface that accumulates blocks and serializes them to HTML.
///
/// Heading and message text are escaped here; item content arrives
/// already rendered (and escaped) by the inline renderer and is inserted
/// verbatim.
#[derive(Debug, Default)]
pub struct HtmlSurface {
    blocks: Mutex<Vec<SurfaceOp>>,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the current blocks. Consecutive list items are wrapped
    /// in a single list element, so each tag group renders as one
    /// heading followed by one list.
    pub fn to_html(&self) -> String {
        let blocks = self.blocks.lock().unwrap();
        let mut html = String::new();
        let mut in_list = false;
        for block in blocks.iter() {
            if in_list && !matches!(block, SurfaceOp::Item(_)) {
                html.push_str("</ul>");
                in_list = false;
            }
            match block {
                SurfaceOp::Heading(text) => {
                    html.push_str("<h1 class=\"tagsum-header\">");
                    html.push_str(&html_escape(text));
                    html.push_str("</h1>");
                }
                SurfaceOp::Item(rendered) => {
                    if !in_list {
                        html.push_str("<ul class=\"tagsum-list\">");
                        in_list = true;
                    }
                    html.push_str("<li class=\"tagsum-item\">");
                    html.push_str(rendered);
                    html.push_str("</li>");
                }
                SurfaceOp::Message(text) => {
                    html.push_str("<div>");
                    html.push_str(&html_escape(text));
                    html.push_str("</div>");
                }
                SurfaceOp::Clear => {}
            }
        }
        if in_list {
            html.push_str("</ul>");
        }
        html
    }
}

#[async_trait]
impl OutputSurface for HtmlSurface {
    async fn clear(&self) -> Result<()> {
        self.blocks.lock().unwrap().clear();
        Ok(())
    }

    async fn append_heading(&self, text: &str) -> Result<()> {
        self.blocks
            .lock()
            .unwrap()
            .push(SurfaceOp::Heading(text.to_string()));
        Ok(())
    }

    async fn append_list_item(&self, rendered: &str) -> Result<()> {
        self.blocks
            .lock()
            .unwrap()
            .push(SurfaceOp::Item(rendered.to_string()));
        Ok(())
    }

    async fn append_message(&self, text: &str) -> Result<()> {
        self.blocks
            .lock()
            .unwrap()
            .push(SurfaceOp::Message(text.to_string()));
        Ok(())
    }
}

/// Surface that records every operation for test assertions.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Mutex<Vec<SurfaceOp>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full operation log, clears included.
    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.ops.lock().unwrap().clone()
    }

    /// Blocks visible after the most recent clear.
    pub fn visible(&self) -> Vec<SurfaceOp> {
        let ops = self.ops.lock().unwrap();
        let start = ops
            .iter()
            .rposition(|op| *op == SurfaceOp::Clear)
            .map(|i| i + 1)
            .unwrap_or(0);
        ops[start..].to_vec()
    }
}

#[async_trait]
impl OutputSurface for RecordingSurface {
    async fn clear(&self) -> Result<()> {
        self.ops.lock().unwrap().push(SurfaceOp::Clear);
        Ok(())
    }

    async fn append_heading(&self, text: &str) -> Result<()> {
        self.ops
            .lock()
            .unwrap()
            .push(SurfaceOp::Heading(text.to_string()));
        Ok(())
    }

    async fn append_list_item(&self, rendered: &str) -> Result<()> {
        self.ops
            .lock()
            .unwrap()
            .push(SurfaceOp::Item(rendered.to_string()));
        Ok(())
    }

    async fn append_message(&self, text: &str) -> Result<()> {
        self.ops
            .lock()
            .unwrap()
            .push(SurfaceOp::Message(text.to_string()));
        Ok(())
    }
}

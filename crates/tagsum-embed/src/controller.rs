//! Per-embed pipeline execution and output sequencing.
//!
//! Every embed invocation owns one [`EmbedInstance`]: its raw
//! configuration, its output surface, its render context, and a run gate.
//! Pipeline runs may overlap (a change notification can arrive while a
//! previous run is still in flight); each run builds its blocks without
//! holding the gate, then applies them only if no newer run has applied
//! first. The surface therefore always shows the output of the newest
//! completed run, never a mix.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use tagsum_core::{
    extract_tag_headers, render_summary, DocumentHandle, DocumentStore, EmbedConfig, Error,
    HeaderRule, InlineRenderer, OutputSurface, RenderContext, RenderInstruction, Result,
};

/// Message rendered when a run fails for a reason other than a malformed
/// configuration or a missing document. Details go to the log, not the
/// surface.
pub(crate) const GENERIC_FAILURE_MESSAGE: &str = "Unable to render summary";

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RunOutcome {
    /// Output reached the surface.
    Applied { seq: u64 },
    /// A newer run had already applied; this run's output was dropped.
    Discarded { seq: u64 },
    /// The surface rejected the output.
    Failed { seq: u64, error: String },
}

/// A pre-rendered surface block, built outside the apply gate.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    Heading(String),
    Item(String),
    Message(String),
}

/// One embed block's live state.
pub(crate) struct EmbedInstance {
    pub(crate) id: Uuid,
    raw_config: String,
    context: RenderContext,
    surface: Arc<dyn OutputSurface>,
    /// Monotonic run counter; each run takes the next value.
    next_seq: AtomicU64,
    /// Newest applied run sequence. Held across surface writes so
    /// overlapping runs cannot interleave output.
    applied_seq: Mutex<u64>,
}

impl EmbedInstance {
    pub(crate) fn new(
        raw_config: impl Into<String>,
        surface: Arc<dyn OutputSurface>,
        context: RenderContext,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            raw_config: raw_config.into(),
            context,
            surface,
            next_seq: AtomicU64::new(0),
            applied_seq: Mutex::new(0),
        }
    }

    /// Store path this instance re-renders on, when its configuration
    /// parses. A malformed configuration binds to nothing; its error
    /// message stands until the host re-invokes or removes the embed.
    pub(crate) fn bound_path(&self) -> Option<String> {
        EmbedConfig::parse(&self.raw_config)
            .ok()
            .map(|config| DocumentHandle::from_reference(&config.reference).path)
    }

    /// Run the pipeline once: full re-parse of the stored configuration,
    /// resolve, read, extract, render, then apply under the gate.
    #[instrument(skip_all, fields(embed_id = %self.id))]
    pub(crate) async fn run(
        &self,
        store: &dyn DocumentStore,
        renderer: &dyn InlineRenderer,
        rule: HeaderRule,
    ) -> RunOutcome {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let started = Instant::now();

        let blocks = self.build_blocks(store, renderer, rule).await;

        let mut applied_seq = self.applied_seq.lock().await;
        if *applied_seq > seq {
            debug!(
                run_seq = seq,
                newest_seq = *applied_seq,
                "Discarding stale run output"
            );
            return RunOutcome::Discarded { seq };
        }
        // From here the surface belongs to this run, even if a write
        // fails partway; only a newer run may touch it again.
        *applied_seq = seq;
        match self.apply(&blocks).await {
            Ok(()) => {
                debug!(
                    run_seq = seq,
                    block_count = blocks.len(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    "Summary run applied"
                );
                RunOutcome::Applied { seq }
            }
            Err(e) => {
                warn!(run_seq = seq, error = %e, "Surface rejected summary output");
                RunOutcome::Failed {
                    seq,
                    error: e.to_string(),
                }
            }
        }
    }

    /// Build the blocks for one run. Failures become message blocks so
    /// they flow through the same apply step as regular output.
    async fn build_blocks(
        &self,
        store: &dyn DocumentStore,
        renderer: &dyn InlineRenderer,
        rule: HeaderRule,
    ) -> Vec<Block> {
        let config = match EmbedConfig::parse(&self.raw_config) {
            Ok(config) => config,
            Err(e) => return vec![Block::Message(e.to_string())],
        };

        let handle = match store.resolve(&config.reference).await {
            Ok(Some(handle)) => handle,
            Ok(None) => {
                return vec![Block::Message(
                    Error::DocumentNotFound(config.reference).to_string(),
                )]
            }
            Err(e) => {
                warn!(doc_reference = %config.reference, error = %e, "Document resolution failed");
                return vec![Block::Message(GENERIC_FAILURE_MESSAGE.to_string())];
            }
        };

        let text = match store.read_text(&handle).await {
            Ok(text) => text,
            Err(e) => {
                warn!(doc_path = %handle.path, error = %e, "Document read failed");
                return vec![Block::Message(GENERIC_FAILURE_MESSAGE.to_string())];
            }
        };

        let index = extract_tag_headers(&text, &config.tags, rule);
        let instructions = render_summary(&handle.display_name, &index);

        let mut blocks = Vec::with_capacity(instructions.len());
        for instruction in instructions {
            match instruction {
                RenderInstruction::GroupHeading { text } => blocks.push(Block::Heading(text)),
                RenderInstruction::ListItem { markdown } => {
                    match renderer
                        .render_inline(&markdown, &self.context.source_id)
                        .await
                    {
                        Ok(rendered) => blocks.push(Block::Item(rendered)),
                        Err(e) => {
                            warn!(error = %e, "Inline rendering failed");
                            return vec![Block::Message(GENERIC_FAILURE_MESSAGE.to_string())];
                        }
                    }
                }
            }
        }
        blocks
    }

    /// Clear and repopulate the surface. Clearing happens here, never
    /// eagerly, so a run that ends up discarded cannot wipe newer output.
    async fn apply(&self, blocks: &[Block]) -> Result<()> {
        self.surface.clear().await?;
        for block in blocks {
            match block {
                Block::Heading(text) => self.surface.append_heading(text).await?,
                Block::Item(rendered) => self.surface.append_list_item(rendered).await?,
                Block::Message(text) => self.surface.append_message(text).await?,
            }
        }
        Ok(())
    }
}

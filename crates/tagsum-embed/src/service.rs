//! Live summary service: embed registration and change-driven re-rendering.
//!
//! The service owns the registry of embed instances and the pipeline
//! collaborators (document store, inline renderer). Hosts hand it fenced
//! code blocks; it renders them once and keeps them current by listening
//! to the store's change bus. Observers can follow lifecycle and render
//! outcomes through a broadcast event stream; rendering never depends on
//! anyone listening.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, RwLock};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use tagsum_core::defaults::{
    EMBED_TRIGGER, ENV_SERVICE_EVENT_CAPACITY, SERVICE_EVENT_CAPACITY,
};
use tagsum_core::{
    DocumentChanged, DocumentStore, Error, HeaderRule, InlineRenderer, OutputSurface,
    RenderContext, Result,
};

use crate::controller::{EmbedInstance, RunOutcome};

/// Configuration for the live summary service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Header matching rule used by every pipeline run.
    pub header_rule: HeaderRule,
    /// Capacity of the observer event channel.
    pub event_capacity: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            header_rule: HeaderRule::default(),
            event_capacity: SERVICE_EVENT_CAPACITY,
        }
    }
}

impl ServiceConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `TAGSUM_HEADER_RULE` | `markdown_heading` | Header matching rule |
    /// | `TAGSUM_SERVICE_EVENT_CAPACITY` | `64` | Observer channel capacity |
    pub fn from_env() -> Self {
        let header_rule = HeaderRule::from_env();

        let event_capacity = std::env::var(ENV_SERVICE_EVENT_CAPACITY)
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(SERVICE_EVENT_CAPACITY)
            .max(1);

        Self {
            header_rule,
            event_capacity,
        }
    }

    /// Set the header matching rule.
    pub fn with_header_rule(mut self, rule: HeaderRule) -> Self {
        self.header_rule = rule;
        self
    }

    /// Set the observer channel capacity.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }
}

/// Event emitted by the live summary service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryEvent {
    /// An embed instance was registered.
    EmbedRegistered { embed_id: Uuid },
    /// An embed instance was removed.
    EmbedRemoved { embed_id: Uuid },
    /// A pipeline run's output reached its surface.
    RenderApplied { embed_id: Uuid, seq: u64 },
    /// A pipeline run finished after a newer run; output was dropped.
    RenderDiscarded { embed_id: Uuid, seq: u64 },
    /// A pipeline run could not write to its surface.
    RenderFailed {
        embed_id: Uuid,
        seq: u64,
        error: String,
    },
    /// Change listener started.
    ListenerStarted,
    /// Change listener stopped.
    ListenerStopped,
}

/// Handle for controlling a running change listener.
pub struct ServiceHandle {
    shutdown_tx: mpsc::Sender<()>,
    event_rx: broadcast::Receiver<SummaryEvent>,
}

impl ServiceHandle {
    /// Signal the listener to shut down gracefully.
    pub async fn shutdown(&self) -> Result<()> {
        self.shutdown_tx
            .send(())
            .await
            .map_err(|_| Error::Internal("Failed to send shutdown signal".into()))?;
        Ok(())
    }

    /// Get a receiver for service events.
    pub fn events(&self) -> broadcast::Receiver<SummaryEvent> {
        self.event_rx.resubscribe()
    }
}

/// Live summary service over a document store.
pub struct SummaryService {
    store: Arc<dyn DocumentStore>,
    renderer: Arc<dyn InlineRenderer>,
    config: ServiceConfig,
    embeds: RwLock<HashMap<Uuid, Arc<EmbedInstance>>>,
    event_tx: broadcast::Sender<SummaryEvent>,
}

impl SummaryService {
    /// Create a service with default configuration.
    pub fn new(store: Arc<dyn DocumentStore>, renderer: Arc<dyn InlineRenderer>) -> Self {
        Self::with_config(store, renderer, ServiceConfig::default())
    }

    /// Create a service with explicit configuration.
    pub fn with_config(
        store: Arc<dyn DocumentStore>,
        renderer: Arc<dyn InlineRenderer>,
        config: ServiceConfig,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(config.event_capacity);
        Self {
            store,
            renderer,
            config,
            embeds: RwLock::new(HashMap::new()),
            event_tx,
        }
    }

    /// The fence language this service processes.
    pub fn trigger() -> &'static str {
        EMBED_TRIGGER
    }

    /// Get a receiver for service events.
    pub fn events(&self) -> broadcast::Receiver<SummaryEvent> {
        self.event_tx.subscribe()
    }

    /// Number of registered embed instances.
    pub async fn embed_count(&self) -> usize {
        self.embeds.read().await.len()
    }

    /// Host entry point for fenced code blocks.
    ///
    /// Blocks in a foreign language are not touched and yield `None`;
    /// a `tagsummary` block is registered and rendered.
    pub async fn process_code_block(
        &self,
        language: &str,
        source: &str,
        surface: Arc<dyn OutputSurface>,
        context: RenderContext,
    ) -> Option<Uuid> {
        if language != EMBED_TRIGGER {
            return None;
        }
        Some(self.render_embed(source, surface, context).await)
    }

    /// Register a fresh embed instance and render it once.
    ///
    /// Registration happens before the first run, so a change
    /// notification arriving mid-render is sequenced against it instead
    /// of being lost. Failures render into the surface; they are never
    /// returned to the host.
    pub async fn render_embed(
        &self,
        source: &str,
        surface: Arc<dyn OutputSurface>,
        context: RenderContext,
    ) -> Uuid {
        let instance = Arc::new(EmbedInstance::new(source, surface, context));
        let id = instance.id;
        self.embeds.write().await.insert(id, instance.clone());
        info!(embed_id = %id, "Embed registered");
        let _ = self.event_tx.send(SummaryEvent::EmbedRegistered { embed_id: id });

        let outcome = instance
            .run(
                self.store.as_ref(),
                self.renderer.as_ref(),
                self.config.header_rule,
            )
            .await;
        self.emit_outcome(id, outcome);
        id
    }

    /// Drop an embed instance (the host disposed its block).
    pub async fn remove_embed(&self, id: Uuid) -> bool {
        let removed = self.embeds.write().await.remove(&id).is_some();
        if removed {
            info!(embed_id = %id, "Embed removed");
            let _ = self.event_tx.send(SummaryEvent::EmbedRemoved { embed_id: id });
        }
        removed
    }

    /// Re-render every embed bound to the changed document.
    ///
    /// Matching is an exact store-path comparison. Instances bound to
    /// other documents (or to nothing) are untouched. Safe to call with
    /// duplicate notifications; re-rendering unchanged content applies
    /// identical output.
    pub async fn handle_document_changed(&self, event: &DocumentChanged) {
        let matching: Vec<Arc<EmbedInstance>> = {
            let embeds = self.embeds.read().await;
            embeds
                .values()
                .filter(|instance| instance.bound_path().as_deref() == Some(event.path.as_str()))
                .cloned()
                .collect()
        };
        if matching.is_empty() {
            return;
        }
        debug!(
            doc_path = %event.path,
            embed_count = matching.len(),
            "Dispatching document change"
        );
        self.run_instances(matching).await;
    }

    /// Re-render every registered embed. Used after the change stream
    /// lagged and an unknown number of notifications were dropped.
    pub async fn refresh_all(&self) {
        let all: Vec<Arc<EmbedInstance>> = {
            let embeds = self.embeds.read().await;
            embeds.values().cloned().collect()
        };
        if all.is_empty() {
            return;
        }
        debug!(embed_count = all.len(), "Refreshing all embeds");
        self.run_instances(all).await;
    }

    /// Start the change listener and return a handle for control.
    pub fn start(
        self: Arc<Self>,
        changes: broadcast::Receiver<DocumentChanged>,
    ) -> ServiceHandle {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        let event_rx = self.event_tx.subscribe();

        tokio::spawn(async move {
            self.listen(changes, shutdown_rx).await;
        });

        ServiceHandle {
            shutdown_tx,
            event_rx,
        }
    }

    /// Run a batch of instances concurrently and report their outcomes.
    /// Instances are independent; one failing never affects the others.
    async fn run_instances(&self, instances: Vec<Arc<EmbedInstance>>) {
        let runs = instances.iter().map(|instance| {
            instance.run(
                self.store.as_ref(),
                self.renderer.as_ref(),
                self.config.header_rule,
            )
        });
        let outcomes = futures::future::join_all(runs).await;
        for (instance, outcome) in instances.iter().zip(outcomes) {
            self.emit_outcome(instance.id, outcome);
        }
    }

    fn emit_outcome(&self, embed_id: Uuid, outcome: RunOutcome) {
        let event = match outcome {
            RunOutcome::Applied { seq } => SummaryEvent::RenderApplied { embed_id, seq },
            RunOutcome::Discarded { seq } => SummaryEvent::RenderDiscarded { embed_id, seq },
            RunOutcome::Failed { seq, error } => SummaryEvent::RenderFailed {
                embed_id,
                seq,
                error,
            },
        };
        let _ = self.event_tx.send(event);
    }

    #[instrument(skip_all)]
    async fn listen(
        self: Arc<Self>,
        mut changes: broadcast::Receiver<DocumentChanged>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        info!(header_rule = %self.config.header_rule, "Live summary listener started");
        let _ = self.event_tx.send(SummaryEvent::ListenerStarted);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Live summary listener received shutdown signal");
                    break;
                }
                received = changes.recv() => match received {
                    Ok(event) => self.handle_document_changed(&event).await,
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!(missed, "Change stream lagged; refreshing all embeds");
                        self.refresh_all().await;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        info!("Change stream closed");
                        break;
                    }
                },
            }
        }

        let _ = self.event_tx.send(SummaryEvent::ListenerStopped);
        info!("Live summary listener stopped");
    }
}

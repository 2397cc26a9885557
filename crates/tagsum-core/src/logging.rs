//! Structured logging schema and field name constants for tagsum.
//!
//! All crates use these constants for consistent structured logging fields.
//! This ensures log aggregation tools can query by standardized field names
//! across every subsystem. Libraries emit events only; installing a
//! subscriber is the host's job.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (registration, listener start/stop) |
//! | DEBUG | Decision points (event dispatch, stale-run discards) |
//! | TRACE | Per-item iteration (tag occurrences, header pushes) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "core", "vault", "embed"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "extract", "service", "controller", "fs_vault"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "render_embed", "handle_change", "resolve", "save"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Embed instance UUID being rendered.
pub const EMBED_ID: &str = "embed_id";

/// Pipeline run sequence number within one embed instance.
pub const RUN_SEQ: &str = "run_seq";

/// Document reference as written in the embed configuration.
pub const DOC_REFERENCE: &str = "doc_reference";

/// Store path of a document (reference plus extension).
pub const DOC_PATH: &str = "doc_path";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of tags requested by an embed configuration.
pub const TAG_COUNT: &str = "tag_count";

/// Number of headers captured into an index.
pub const HEADER_COUNT: &str = "header_count";

/// Number of embed instances affected by a dispatch.
pub const EMBED_COUNT: &str = "embed_count";

/// Number of live receivers on a broadcast channel.
pub const SUBSCRIBER_COUNT: &str = "subscriber_count";

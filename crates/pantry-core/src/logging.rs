//! Structured logging schema and field name constants for pantry.
//!
//! Every field listed here is emitted by at least one crate, so log
//! aggregation can query search tiers, fallbacks and latencies by the same
//! names across every subsystem. `tracing` macros take field names as
//! identifiers, so call sites spell them out; APIs that take a field name at
//! runtime (such as `Span::record`) use these constants. [`ALL_FIELDS`] lists
//! the full schema.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events, operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-candidate scoring detail |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID for one search invocation. Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "search", "db", "live"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "orchestrator", "retriever", "scorer", "pool", "usda"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "search", "full_text_search", "trigram_search", "remote_search"
pub const OPERATION: &str = "op";

// ─── Query fields ──────────────────────────────────────────────────────────

/// Search query text.
pub const QUERY: &str = "query";

/// Requested category filter.
pub const CATEGORY: &str = "category";

/// Requested result limit.
pub const LIMIT: &str = "limit";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a search.
pub const RESULT_COUNT: &str = "result_count";

/// Number of candidates retrieved before ranking.
pub const CANDIDATE_COUNT: &str = "candidate_count";

/// Over-fetch row budget sent to the provider.
pub const OVER_FETCH: &str = "over_fetch";

// ─── Search-specific fields ────────────────────────────────────────────────

/// Provider tier that produced the results ("indexed", "live").
pub const TIER: &str = "tier";

/// Retrieval path inside the indexed tier ("full_text", "trigram").
pub const RETRIEVAL_PATH: &str = "retrieval_path";

/// Relevance score of a single candidate.
pub const SCORE: &str = "score";

/// Name of the live provider that served or failed a lookup.
pub const PROVIDER: &str = "provider";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Every structured field name in the schema.
pub const ALL_FIELDS: &[&str] = &[
    REQUEST_ID,
    SUBSYSTEM,
    COMPONENT,
    OPERATION,
    QUERY,
    CATEGORY,
    LIMIT,
    DURATION_MS,
    RESULT_COUNT,
    CANDIDATE_COUNT,
    OVER_FETCH,
    TIER,
    RETRIEVAL_PATH,
    SCORE,
    PROVIDER,
    ERROR_MSG,
];

/// Install a global `tracing` subscriber configured from the environment.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, enables daily-rotated file logging)
///   RUST_LOG    - standard env filter (default: "pantry=info")
///
/// Returns the non-blocking writer guard when file logging is enabled; keep it
/// alive for the lifetime of the process. Fails if a global subscriber is
/// already installed.
#[cfg(feature = "subscriber")]
pub fn init_from_env() -> crate::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    use std::path::Path;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pantry=info".into());
    let registry = tracing_subscriber::registry().with(env_filter);
    let init_err = |e: tracing_subscriber::util::TryInitError| crate::Error::Config(e.to_string());

    match log_file {
        Some(path) => {
            let path = Path::new(&path);
            let dir = path.parent().unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("pantry.log");
            let appender = tracing_appender::rolling::daily(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            if log_format == "json" {
                registry
                    .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
                    .try_init()
                    .map_err(init_err)?;
            } else {
                registry
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(writer)
                            .with_ansi(false),
                    )
                    .try_init()
                    .map_err(init_err)?;
            }
            Ok(Some(guard))
        }
        None => {
            if log_format == "json" {
                registry
                    .with(tracing_subscriber::fmt::layer().json())
                    .try_init()
                    .map_err(init_err)?;
            } else {
                registry
                    .with(tracing_subscriber::fmt::layer())
                    .try_init()
                    .map_err(init_err)?;
            }
            Ok(None)
        }
    }
}

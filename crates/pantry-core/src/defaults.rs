//! Centralized default constants for the pantry food search engine.
//!
//! **This module is the single source of truth** for all shared default values.
//! Scoring weights, retrieval bounds and provider settings are referenced from
//! here instead of being repeated as magic numbers across crates.
//!
//! Organized by domain area. The scoring weights are empirically tuned; treat
//! them as configuration and override them through `ScoringWeights` rather
//! than editing control flow.

// =============================================================================
// QUERY
// =============================================================================

/// Minimum trimmed query length (in characters). Shorter queries yield an
/// empty result without any provider call.
pub const MIN_QUERY_LEN: usize = 2;

/// Default number of results returned to the caller.
pub const RESULT_LIMIT: usize = 25;

// =============================================================================
// RETRIEVAL
// =============================================================================

/// Over-fetch multiplier applied to the requested limit when retrieving
/// candidates from the index.
pub const OVER_FETCH_MULTIPLIER: usize = 3;

/// Hard cap on the number of candidate rows requested from any provider.
pub const OVER_FETCH_CAP: usize = 200;

/// The index counts as populated when it holds strictly more rows than this.
pub const POPULATED_THRESHOLD: i64 = 100;

/// How long a population probe answer is reused, in seconds (0 disables caching).
pub const POPULATED_PROBE_TTL_SECS: u64 = 60;

// =============================================================================
// SCORING
// =============================================================================

/// Penalty applied when the candidate conflicts with the query intent.
pub const SCORE_INCOMPATIBLE_PENALTY: i32 = 100;

/// Candidate normalized name equals the normalized query.
pub const SCORE_EXACT_MATCH: i32 = 50;

/// Candidate name contains the whole query as a contiguous substring.
pub const SCORE_PHRASE_MATCH: i32 = 25;

/// Every query term appears in the candidate name.
pub const SCORE_FULL_COVERAGE: i32 = 25;

/// Per query term found in the candidate name.
pub const SCORE_PER_TERM: i32 = 10;

/// First word of the candidate name equals the first query term.
pub const SCORE_FIRST_WORD: i32 = 30;

/// Candidate preparation method is mentioned in the query.
pub const SCORE_PREPARATION_MATCH: i32 = 20;

/// Candidate is a canonical single-ingredient reference food.
pub const SCORE_CANONICAL: i32 = 30;

/// Data source bonus for `Foundation` records.
pub const SCORE_SOURCE_FOUNDATION: i32 = 30;

/// Data source bonus for `SR Legacy` records.
pub const SCORE_SOURCE_SR_LEGACY: i32 = 15;

/// Data source adjustment for `Branded` records (negative).
pub const SCORE_SOURCE_BRANDED: i32 = -5;

/// Names at or below this length (in characters) earn the simplicity bonus.
pub const SIMPLE_NAME_MAX_CHARS: usize = 35;

/// Simplicity bonus for short names.
pub const SCORE_SIMPLE_NAME: i32 = 10;

/// Bonus when the name has at most two comma-separated segments.
pub const SCORE_FEW_SEGMENTS: i32 = 5;

/// Segment count up to which the comma bonus applies.
pub const FEW_SEGMENTS_MAX: usize = 2;

/// Penalty per comma segment beyond `FEW_SEGMENTS_MAX`.
pub const SCORE_EXTRA_SEGMENT_PENALTY: i32 = 3;

// =============================================================================
// COMPOUND DISH PENALTIES
// =============================================================================

/// Penalty for strong compound-dish indicators (medley, casserole, ...).
pub const COMPOUND_PENALTY_STRONG: i32 = 40;

/// Penalty for moderate indicators (with, topped, stuffed, ...).
pub const COMPOUND_PENALTY_MODERATE: i32 = 20;

/// Penalty for weak stylistic indicators (style, seasoned, ...).
pub const COMPOUND_PENALTY_WEAK: i32 = 10;

// =============================================================================
// LIVE PROVIDER (USDA FoodData Central)
// =============================================================================

/// Default USDA FoodData Central API base URL.
pub const USDA_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";

/// Public demo key accepted by the USDA API (heavily rate limited).
pub const USDA_API_KEY: &str = "DEMO_KEY";

/// Timeout for live lookups in seconds.
pub const USDA_TIMEOUT_SECS: u64 = 10;

/// Maximum page size accepted by the USDA search endpoint.
pub const USDA_MAX_PAGE_SIZE: usize = 200;

// =============================================================================
// DATABASE
// =============================================================================

/// Default maximum number of pooled connections.
pub const DB_MAX_CONNECTIONS: u32 = 10;

/// Default connection acquire timeout in seconds.
pub const DB_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default idle connection timeout in seconds.
pub const DB_IDLE_TIMEOUT_SECS: u64 = 600;

/// Default maximum connection lifetime in seconds.
pub const DB_MAX_LIFETIME_SECS: u64 = 1800;

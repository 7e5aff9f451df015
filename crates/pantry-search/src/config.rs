//! Search configuration and runtime feature flags.
//!
//! The flags are kill-switches for the fallback paths. All of them are
//! enabled by default and can be turned off through environment variables if
//! a provider misbehaves, without redeploying.

use std::env;

use pantry_core::defaults;

use crate::scoring::ScoringWeights;

/// Feature flags controlling the fallback paths.
///
/// # Example
/// ```
/// use pantry_search::config::SearchFeatureFlags;
///
/// let flags = SearchFeatureFlags::default();
/// assert!(flags.trigram_fallback);
/// assert!(flags.live_fallback);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFeatureFlags {
    /// Retry with trigram similarity when full-text search finds nothing.
    /// Default: true.
    pub trigram_fallback: bool,

    /// Delegate to the live provider when the index yields nothing.
    /// Default: true.
    pub live_fallback: bool,

    /// Post-filter live results by macro-inferred category when a category
    /// was requested. Default: true.
    pub live_category_filter: bool,
}

impl Default for SearchFeatureFlags {
    fn default() -> Self {
        Self {
            trigram_fallback: true,
            live_fallback: true,
            live_category_filter: true,
        }
    }
}

impl SearchFeatureFlags {
    /// Constructs flags from environment variables.
    ///
    /// Environment variables:
    /// - `FOOD_SEARCH_TRIGRAM_FALLBACK` (default: true)
    /// - `FOOD_SEARCH_LIVE_FALLBACK` (default: true)
    /// - `FOOD_SEARCH_LIVE_CATEGORY_FILTER` (default: true)
    ///
    /// Values are parsed as booleans: "true", "1", "yes", "on" (case-insensitive) are truthy.
    pub fn from_env() -> Self {
        Self {
            trigram_fallback: parse_bool_env("FOOD_SEARCH_TRIGRAM_FALLBACK", true),
            live_fallback: parse_bool_env("FOOD_SEARCH_LIVE_FALLBACK", true),
            live_category_filter: parse_bool_env("FOOD_SEARCH_LIVE_CATEGORY_FILTER", true),
        }
    }

    /// Flags for an index-only deployment (no live provider fallback).
    pub fn index_only() -> Self {
        Self {
            live_fallback: false,
            ..Default::default()
        }
    }
}

/// Configuration for the food search engine.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Queries whose trimmed length is below this return nothing.
    pub min_query_len: usize,
    /// Limit used by `SearchRequest` when none is given.
    pub default_limit: usize,
    /// Candidate over-fetch multiplier applied to the requested limit.
    pub over_fetch_multiplier: usize,
    /// Hard cap on candidate rows requested from a provider.
    pub over_fetch_cap: usize,
    /// Relevance signal weights.
    pub weights: ScoringWeights,
    /// Fallback kill-switches.
    pub flags: SearchFeatureFlags,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: defaults::MIN_QUERY_LEN,
            default_limit: defaults::RESULT_LIMIT,
            over_fetch_multiplier: defaults::OVER_FETCH_MULTIPLIER,
            over_fetch_cap: defaults::OVER_FETCH_CAP,
            weights: ScoringWeights::default(),
            flags: SearchFeatureFlags::default(),
        }
    }
}

impl SearchConfig {
    /// Default configuration with feature flags read from the environment.
    pub fn from_env() -> Self {
        Self {
            flags: SearchFeatureFlags::from_env(),
            ..Default::default()
        }
    }

    /// Number of candidate rows to request for `limit` results:
    /// `min(limit * multiplier, cap)`.
    pub fn over_fetch_limit(&self, limit: usize) -> usize {
        limit
            .saturating_mul(self.over_fetch_multiplier)
            .min(self.over_fetch_cap)
    }

    /// Set scoring weights.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set feature flags.
    pub fn with_flags(mut self, flags: SearchFeatureFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the default result limit.
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Set the over-fetch multiplier and cap.
    pub fn with_over_fetch(mut self, multiplier: usize, cap: usize) -> Self {
        self.over_fetch_multiplier = multiplier;
        self.over_fetch_cap = cap;
        self
    }
}

/// Parses a boolean environment variable with a default fallback.
///
/// Recognizes "true", "1", "yes", "on" (case-insensitive) as true.
/// Any other value or missing variable returns the default.
fn parse_bool_env(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|val| match val.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

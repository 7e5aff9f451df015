//! Food index configuration.

use std::env;
use std::time::Duration;

use pantry_core::defaults;

/// Population probe settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// The index counts as populated when it holds more rows than this.
    pub populated_threshold: i64,
    /// How long a probe answer is reused. Zero disables caching.
    pub probe_cache_ttl: Duration,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            populated_threshold: defaults::POPULATED_THRESHOLD,
            probe_cache_ttl: Duration::from_secs(defaults::POPULATED_PROBE_TTL_SECS),
        }
    }
}

impl IndexConfig {
    /// Defaults overridden by environment variables.
    ///
    /// - `FOOD_INDEX_PROBE_TTL_SECS` (default: 60, 0 disables caching)
    /// - `FOOD_INDEX_POPULATED_THRESHOLD` (default: 100)
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let default = Self::default();
        let probe_cache_ttl = env::var("FOOD_INDEX_PROBE_TTL_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(default.probe_cache_ttl);
        let populated_threshold = env::var("FOOD_INDEX_POPULATED_THRESHOLD")
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|n| *n >= 0)
            .unwrap_or(default.populated_threshold);

        Self {
            populated_threshold,
            probe_cache_ttl,
        }
    }

    pub fn with_populated_threshold(mut self, threshold: i64) -> Self {
        self.populated_threshold = threshold;
        self
    }

    pub fn with_probe_cache_ttl(mut self, ttl: Duration) -> Self {
        self.probe_cache_ttl = ttl;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process-global, so tests must not run in parallel.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_index_env() {
        env::remove_var("FOOD_INDEX_PROBE_TTL_SECS");
        env::remove_var("FOOD_INDEX_POPULATED_THRESHOLD");
    }

    #[test]
    fn test_defaults() {
        let config = IndexConfig::default();
        assert_eq!(config.populated_threshold, 100);
        assert_eq!(config.probe_cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_from_env_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_index_env();

        env::set_var("FOOD_INDEX_PROBE_TTL_SECS", "0");
        env::set_var("FOOD_INDEX_POPULATED_THRESHOLD", "500");
        let config = IndexConfig::from_env();
        assert_eq!(config.probe_cache_ttl, Duration::ZERO);
        assert_eq!(config.populated_threshold, 500);

        clear_index_env();
    }

    #[test]
    fn test_from_env_ignores_garbage() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_index_env();

        env::set_var("FOOD_INDEX_PROBE_TTL_SECS", "soon");
        env::set_var("FOOD_INDEX_POPULATED_THRESHOLD", "-4");
        assert_eq!(IndexConfig::from_env(), IndexConfig::default());

        clear_index_env();
    }
}

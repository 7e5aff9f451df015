//! USDA FoodData Central client configuration.

use std::env;
use std::time::Duration;

use pantry_core::defaults;

/// Connection settings for the FoodData Central search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsdaConfig {
    /// API key sent as the `api_key` query parameter.
    pub api_key: String,
    /// Base URL, without the `/foods/search` path.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Data type labels to restrict the search to (e.g. "Foundation").
    /// Empty means all data types.
    pub data_types: Vec<String>,
}

impl Default for UsdaConfig {
    fn default() -> Self {
        Self {
            api_key: defaults::USDA_API_KEY.to_string(),
            base_url: defaults::USDA_BASE_URL.to_string(),
            timeout: Duration::from_secs(defaults::USDA_TIMEOUT_SECS),
            data_types: Vec::new(),
        }
    }
}

impl UsdaConfig {
    /// Defaults overridden by environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `USDA_API_KEY` | `DEMO_KEY` |
    /// | `USDA_BASE_URL` | `https://api.nal.usda.gov/fdc/v1` |
    /// | `USDA_TIMEOUT_SECS` | 10 |
    /// | `USDA_DATA_TYPES` | (all), comma-separated |
    pub fn from_env() -> Self {
        let default = Self::default();

        let api_key = env::var("USDA_API_KEY")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default.api_key);
        let base_url = env::var("USDA_BASE_URL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default.base_url);
        let timeout = env::var("USDA_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(default.timeout);
        let data_types = env::var("USDA_DATA_TYPES")
            .map(|v| parse_data_types(&v))
            .unwrap_or_default();

        Self {
            api_key,
            base_url,
            timeout,
            data_types,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_data_types<I, S>(mut self, data_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data_types = data_types.into_iter().map(Into::into).collect();
        self
    }
}

fn parse_data_types(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

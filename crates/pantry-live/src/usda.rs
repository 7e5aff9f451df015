//! USDA FoodData Central live provider.
//!
//! Calls `GET {base}/foods/search` and maps each hit into an
//! [`ExternalFoodRecord`]. Macros are picked out of `foodNutrients` by
//! nutrient id (or the legacy SR nutrient number), falling back to the
//! nutrient name when neither is recognized.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use pantry_core::defaults::USDA_MAX_PAGE_SIZE;
use pantry_core::{Error, ExternalFoodRecord, ExternalMacros, LiveProvider, Result};

use crate::config::UsdaConfig;

/// Provider name reported in logs and diagnostics.
pub const PROVIDER_NAME: &str = "usda";

const SEARCH_PATH: &str = "/foods/search";

/// Longest error body excerpt carried into a `Request` error.
const ERROR_BODY_EXCERPT: usize = 200;

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    total_hits: Option<u64>,
    #[serde(default)]
    foods: Vec<SearchFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchFood {
    fdc_id: i64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    data_type: Option<String>,
    #[serde(default)]
    brand_owner: Option<String>,
    #[serde(default)]
    serving_size: Option<f64>,
    #[serde(default)]
    serving_size_unit: Option<String>,
    #[serde(default)]
    food_nutrients: Vec<SearchNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchNutrient {
    #[serde(default)]
    nutrient_id: Option<i64>,
    #[serde(default)]
    nutrient_number: Option<String>,
    #[serde(default)]
    nutrient_name: Option<String>,
    #[serde(default)]
    unit_name: Option<String>,
    #[serde(default)]
    value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Macro {
    Calories,
    Protein,
    Carbs,
    Fat,
}

impl SearchNutrient {
    /// Which macro this nutrient reports, if any.
    fn classify(&self) -> Option<Macro> {
        let by_id = self.nutrient_id.and_then(|id| match id {
            1008 => Some(Macro::Calories),
            1003 => Some(Macro::Protein),
            1005 => Some(Macro::Carbs),
            1004 => Some(Macro::Fat),
            _ => None,
        });
        let by_number = || {
            self.nutrient_number.as_deref().map(str::trim).and_then(|n| match n {
                "1008" | "208" => Some(Macro::Calories),
                "1003" | "203" => Some(Macro::Protein),
                "1005" | "205" => Some(Macro::Carbs),
                "1004" | "204" => Some(Macro::Fat),
                _ => None,
            })
        };
        by_id.or_else(by_number).or_else(|| self.classify_by_name())
    }

    fn classify_by_name(&self) -> Option<Macro> {
        let name = self.nutrient_name.as_deref()?.to_lowercase();
        if name.starts_with("energy") {
            // Only kilocalories; the kJ entry shares the name
            let unit = self.unit_name.as_deref().unwrap_or("kcal");
            return unit.eq_ignore_ascii_case("kcal").then_some(Macro::Calories);
        }
        if name == "protein" {
            Some(Macro::Protein)
        } else if name.starts_with("carbohydrate") {
            Some(Macro::Carbs)
        } else if name.starts_with("total lipid") || name == "total fat" {
            Some(Macro::Fat)
        } else {
            None
        }
    }
}

impl SearchFood {
    fn macros(&self) -> ExternalMacros {
        let mut macros = ExternalMacros::default();
        for nutrient in &self.food_nutrients {
            let (Some(kind), Some(value)) = (nutrient.classify(), nutrient.value) else {
                continue;
            };
            if !value.is_finite() {
                continue;
            }
            let slot = match kind {
                Macro::Calories => &mut macros.calories,
                Macro::Protein => &mut macros.protein,
                Macro::Carbs => &mut macros.carbs,
                Macro::Fat => &mut macros.fat,
            };
            // First match wins
            slot.get_or_insert(value);
        }
        macros
    }

    fn into_external(self) -> ExternalFoodRecord {
        let macros = self.macros();
        ExternalFoodRecord {
            external_id: self.fdc_id,
            description: self.description.trim().to_string(),
            data_type: self.data_type,
            brand_owner: self.brand_owner,
            serving_size: self.serving_size,
            serving_unit: self.serving_size_unit,
            macros,
        }
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Live provider backed by the USDA FoodData Central search API.
pub struct UsdaFoodDataClient {
    client: Client,
    config: UsdaConfig,
}

impl UsdaFoodDataClient {
    /// Create a client with the given configuration.
    pub fn new(config: UsdaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "live",
            component = "usda",
            base_url = %config.base_url,
            timeout_ms = config.timeout.as_millis() as u64,
            data_types = ?config.data_types,
            "Initializing USDA FoodData Central client"
        );

        Ok(Self { client, config })
    }

    /// Create with default configuration (public demo key).
    pub fn with_defaults() -> Result<Self> {
        Self::new(UsdaConfig::default())
    }

    /// Create from environment variables, see [`UsdaConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(UsdaConfig::from_env())
    }

    pub fn config(&self) -> &UsdaConfig {
        &self.config
    }

    fn search_url(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), SEARCH_PATH)
    }

    fn query_params(&self, query: &str, page_size: usize) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("query", query.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        if !self.config.data_types.is_empty() {
            params.push(("dataType", self.config.data_types.join(",")));
        }
        params.push(("api_key", self.config.api_key.clone()));
        params
    }
}

/// Page size sent to the API for a requested row count.
pub fn page_size_for(max_rows: usize) -> usize {
    max_rows.clamp(1, USDA_MAX_PAGE_SIZE)
}

#[async_trait]
impl LiveProvider for UsdaFoodDataClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    #[instrument(skip(self), fields(subsystem = "live", component = "usda", op = "remote_search"))]
    async fn remote_search(&self, query: &str, max_rows: usize) -> Result<Vec<ExternalFoodRecord>> {
        if max_rows == 0 {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let page_size = page_size_for(max_rows);

        let response = self
            .client
            .get(self.search_url())
            .query(&self.query_params(query, page_size))
            .send()
            .await
            .map_err(|e| Error::Request(format!("USDA search request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(ERROR_BODY_EXCERPT).collect();
            warn!(
                status = status.as_u16(),
                body = %excerpt,
                "USDA search returned an error status"
            );
            return Err(Error::Request(format!(
                "USDA search returned {}: {}",
                status, excerpt
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Invalid USDA search response: {}", e)))?;

        let returned = body.foods.len();
        let mut records: Vec<ExternalFoodRecord> = body
            .foods
            .into_iter()
            .map(SearchFood::into_external)
            .filter(|r| !r.description.is_empty())
            .collect();
        records.truncate(max_rows);

        debug!(
            page_size,
            total_hits = body.total_hits.unwrap_or(0),
            returned,
            result_count = records.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "USDA search complete"
        );
        Ok(records)
    }
}

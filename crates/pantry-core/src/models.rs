//! Food record and search result models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

// =============================================================================
// CATEGORY
// =============================================================================

/// Macro-nutrient category used as an optional search filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Protein,
    Carbs,
    Fats,
}

impl FoodCategory {
    /// Storage/wire label for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Protein => "protein",
            FoodCategory::Carbs => "carbs",
            FoodCategory::Fats => "fats",
        }
    }

    /// Infer a category from macro dominance.
    ///
    /// Carbs win when they exceed both protein and fat, fat wins when it
    /// exceeds both protein and carbs, everything else counts as protein.
    pub fn from_macros(protein: f64, carbs: f64, fat: f64) -> Self {
        if carbs > protein && carbs > fat {
            FoodCategory::Carbs
        } else if fat > protein && fat > carbs {
            FoodCategory::Fats
        } else {
            FoodCategory::Protein
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "protein" => Ok(FoodCategory::Protein),
            "carbs" => Ok(FoodCategory::Carbs),
            "fats" => Ok(FoodCategory::Fats),
            other => Err(Error::InvalidInput(format!("unknown food category: {other}"))),
        }
    }
}

// =============================================================================
// DATA TYPE (PROVENANCE)
// =============================================================================

/// Provenance tag of a food record; informs trust ranking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum DataType {
    Foundation,
    SrLegacy,
    Branded,
    /// Any other provenance label, kept verbatim.
    Other(String),
}

impl DataType {
    /// Parse a provenance label. Matching is case-insensitive for the known
    /// labels; unknown labels are preserved as `Other`.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_lowercase().as_str() {
            "foundation" => DataType::Foundation,
            "sr legacy" => DataType::SrLegacy,
            "branded" => DataType::Branded,
            _ => DataType::Other(trimmed.to_string()),
        }
    }

    /// Label as stored in the index and returned by USDA.
    pub fn label(&self) -> &str {
        match self {
            DataType::Foundation => "Foundation",
            DataType::SrLegacy => "SR Legacy",
            DataType::Branded => "Branded",
            DataType::Other(label) => label,
        }
    }
}

impl From<String> for DataType {
    fn from(label: String) -> Self {
        DataType::from_label(&label)
    }
}

impl From<DataType> for String {
    fn from(data_type: DataType) -> Self {
        data_type.label().to_string()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// FOOD RECORD
// =============================================================================

/// A food record as stored and returned by a provider.
///
/// Records are owned by the provider; the search core only borrows them for
/// one query and never mutates them. `normalized_name` is always
/// `normalize_text(name)`, derived once when the record is indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub id: i64,
    pub name: String,
    pub normalized_name: String,
    pub category: Option<FoodCategory>,
    /// Energy in kcal per reference serving.
    pub calories: f64,
    /// Grams per reference serving.
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub serving_size: f64,
    pub serving_unit: String,
    pub data_type: DataType,
    pub is_canonical: bool,
    pub preparation_method: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_terms: Vec<String>,
}

impl FoodRecord {
    /// Create a record with the normalized name derived from `name` and
    /// neutral defaults for every other attribute.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            normalized_name: crate::text::normalize_text(&name),
            name,
            category: None,
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            serving_size: 100.0,
            serving_unit: "g".to_string(),
            data_type: DataType::Other(String::new()),
            is_canonical: false,
            preparation_method: None,
            search_terms: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: FoodCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_macros(mut self, calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        self.calories = calories;
        self.protein = protein;
        self.carbs = carbs;
        self.fat = fat;
        self
    }

    pub fn with_serving(mut self, size: f64, unit: impl Into<String>) -> Self {
        self.serving_size = size;
        self.serving_unit = unit.into();
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn with_canonical(mut self, is_canonical: bool) -> Self {
        self.is_canonical = is_canonical;
        self
    }

    pub fn with_preparation_method(mut self, method: impl Into<String>) -> Self {
        self.preparation_method = Some(method.into());
        self
    }

    pub fn with_search_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_terms = terms.into_iter().map(Into::into).collect();
        self
    }

    /// Stored category, or one inferred from macro dominance when absent.
    pub fn effective_category(&self) -> FoodCategory {
        self.category
            .unwrap_or_else(|| FoodCategory::from_macros(self.protein, self.carbs, self.fat))
    }
}

// =============================================================================
// EXTERNAL (LIVE PROVIDER) RECORD
// =============================================================================

/// Macro values reported by a live provider; any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalMacros {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

/// A food record in the shape a live provider hands back, before it is
/// normalized into a [`FoodRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalFoodRecord {
    pub external_id: i64,
    pub description: String,
    pub data_type: Option<String>,
    pub brand_owner: Option<String>,
    pub serving_size: Option<f64>,
    pub serving_unit: Option<String>,
    pub macros: ExternalMacros,
}

// =============================================================================
// SEARCH RESULTS
// =============================================================================

/// A candidate with its relevance score, built fresh per query.
///
/// `raw_score` may be negative and is what ranking orders by; callers see the
/// clamped `relevance_score()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub record: FoodRecord,
    pub raw_score: i32,
}

impl ScoredCandidate {
    pub fn new(record: FoodRecord, raw_score: i32) -> Self {
        Self { record, raw_score }
    }

    /// Score exposed to callers, floored at zero.
    pub fn relevance_score(&self) -> i32 {
        self.raw_score.max(0)
    }
}

/// Provider tier that produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchTier {
    /// Local full-text/trigram index, results scored and ranked.
    Indexed,
    /// Remote nutrition lookup, results in provider order.
    Live,
}

impl SearchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchTier::Indexed => "indexed",
            SearchTier::Live => "live",
        }
    }
}

impl fmt::Display for SearchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the ordered result list returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodSearchHit {
    pub record: FoodRecord,
    /// Clamped relevance score; `None` for unscored live results.
    pub relevance_score: Option<i32>,
    pub tier: SearchTier,
}

impl FoodSearchHit {
    /// Hit for a live result, which is never scored locally.
    pub fn unscored(record: FoodRecord) -> Self {
        Self {
            record,
            relevance_score: None,
            tier: SearchTier::Live,
        }
    }
}

impl From<ScoredCandidate> for FoodSearchHit {
    fn from(candidate: ScoredCandidate) -> Self {
        let relevance_score = Some(candidate.relevance_score());
        Self {
            record: candidate.record,
            relevance_score,
            tier: SearchTier::Indexed,
        }
    }
}

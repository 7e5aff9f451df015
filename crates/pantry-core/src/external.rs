//! Mapping of live provider records into the internal food record shape.
//!
//! This is the only place where external field names are interpreted;
//! scoring and ranking never see an [`ExternalFoodRecord`].

use crate::models::{DataType, ExternalFoodRecord, FoodCategory, FoodRecord};
use crate::text::normalize_text;

/// Serving size used when the provider reports none (nutrients are per 100 g).
const DEFAULT_SERVING_SIZE: f64 = 100.0;

/// Serving unit used when the provider reports none.
const DEFAULT_SERVING_UNIT: &str = "g";

/// Normalize a live provider record into a [`FoodRecord`].
///
/// Missing macros default to zero, the category is inferred from macro
/// dominance and live records are never canonical.
pub fn normalize_external(external: ExternalFoodRecord) -> FoodRecord {
    let protein = external.macros.protein.unwrap_or(0.0);
    let carbs = external.macros.carbs.unwrap_or(0.0);
    let fat = external.macros.fat.unwrap_or(0.0);

    let data_type = external
        .data_type
        .as_deref()
        .map(DataType::from_label)
        .unwrap_or_else(|| DataType::Other(String::new()));

    let search_terms = external
        .brand_owner
        .as_deref()
        .map(normalize_text)
        .filter(|brand| !brand.is_empty())
        .into_iter()
        .collect();

    let serving_size = external
        .serving_size
        .filter(|size| size.is_finite() && *size > 0.0)
        .unwrap_or(DEFAULT_SERVING_SIZE);

    let serving_unit = external
        .serving_unit
        .map(|unit| unit.trim().to_lowercase())
        .filter(|unit| !unit.is_empty())
        .unwrap_or_else(|| DEFAULT_SERVING_UNIT.to_string());

    FoodRecord {
        id: external.external_id,
        normalized_name: normalize_text(&external.description),
        name: external.description,
        category: Some(FoodCategory::from_macros(protein, carbs, fat)),
        calories: external.macros.calories.unwrap_or(0.0),
        protein,
        carbs,
        fat,
        serving_size,
        serving_unit,
        data_type,
        is_canonical: false,
        preparation_method: None,
        search_terms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExternalMacros;

    fn external(description: &str, macros: ExternalMacros) -> ExternalFoodRecord {
        ExternalFoodRecord {
            external_id: 171077,
            description: description.to_string(),
            data_type: Some("SR Legacy".to_string()),
            brand_owner: None,
            serving_size: None,
            serving_unit: None,
            macros,
        }
    }

    #[test]
    fn test_normalize_external_maps_macros_and_category() {
        let record = normalize_external(external(
            "Rice, white, long-grain, cooked",
            ExternalMacros {
                calories: Some(130.0),
                protein: Some(2.7),
                carbs: Some(28.2),
                fat: Some(0.3),
            },
        ));

        assert_eq!(record.id, 171077);
        assert_eq!(record.name, "Rice, white, long-grain, cooked");
        assert_eq!(record.normalized_name, "rice white longgrain cooked");
        assert_eq!(record.category, Some(FoodCategory::Carbs));
        assert_eq!(record.calories, 130.0);
        assert_eq!(record.data_type, DataType::SrLegacy);
        assert!(!record.is_canonical);
    }

    #[test]
    fn test_normalize_external_defaults_missing_fields() {
        let record = normalize_external(external("Mystery food", ExternalMacros::default()));

        assert_eq!(record.calories, 0.0);
        assert_eq!(record.protein, 0.0);
        assert_eq!(record.serving_size, 100.0);
        assert_eq!(record.serving_unit, "g");
        assert_eq!(record.category, Some(FoodCategory::Protein));
    }

    #[test]
    fn test_normalize_external_keeps_serving_and_brand() {
        let mut raw = external(
            "Greek Yogurt",
            ExternalMacros {
                calories: Some(100.0),
                protein: Some(17.0),
                carbs: Some(6.0),
                fat: Some(0.7),
            },
        );
        raw.data_type = Some("Branded".to_string());
        raw.brand_owner = Some("Acme Dairy, Inc.".to_string());
        raw.serving_size = Some(170.0);
        raw.serving_unit = Some("GRM".to_string());

        let record = normalize_external(raw);
        assert_eq!(record.serving_size, 170.0);
        assert_eq!(record.serving_unit, "grm");
        assert_eq!(record.data_type, DataType::Branded);
        assert_eq!(record.search_terms, vec!["acme dairy inc".to_string()]);
    }

    #[test]
    fn test_normalize_external_rejects_non_positive_serving() {
        let mut raw = external("Salt", ExternalMacros::default());
        raw.serving_size = Some(0.0);
        assert_eq!(normalize_external(raw).serving_size, 100.0);
    }
}

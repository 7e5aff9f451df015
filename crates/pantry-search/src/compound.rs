//! Compound-dish detection.
//!
//! Multi-ingredient prepared dishes ("Chicken Casserole", "Rice with Beans")
//! are rarely what a user means when searching for an ingredient. The
//! detector inspects the words of a candidate name and returns a penalty for
//! the strongest tier of indicator it finds.

use pantry_core::defaults;

/// Words that mark a prepared multi-ingredient dish.
pub static STRONG_INDICATORS: &[&str] = &[
    "medley",
    "mix",
    "mixture",
    "combo",
    "combination",
    "casserole",
    "stew",
    "soup",
    "salad",
    "bowl",
    "platter",
    "plate",
    "meal",
    "dish",
    "entree",
];

/// Words that join or layer several ingredients.
pub static MODERATE_INDICATORS: &[&str] = &[
    "with", "and", "plus", "topped", "stuffed", "filled", "layered", "wrapped", "covered",
];

/// Stylistic modifiers.
pub static WEAK_INDICATORS: &[&str] = &["style", "flavored", "seasoned", "marinated"];

/// Indicator tier, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundTier {
    Strong,
    Moderate,
    Weak,
}

/// Detects compound-dish signals in candidate names.
#[derive(Debug, Clone, Copy)]
pub struct CompoundDishDetector {
    strong_penalty: i32,
    moderate_penalty: i32,
    weak_penalty: i32,
}

impl Default for CompoundDishDetector {
    fn default() -> Self {
        Self {
            strong_penalty: defaults::COMPOUND_PENALTY_STRONG,
            moderate_penalty: defaults::COMPOUND_PENALTY_MODERATE,
            weak_penalty: defaults::COMPOUND_PENALTY_WEAK,
        }
    }
}

impl CompoundDishDetector {
    /// Detector with custom tier penalties.
    pub fn with_penalties(strong: i32, moderate: i32, weak: i32) -> Self {
        Self {
            strong_penalty: strong,
            moderate_penalty: moderate,
            weak_penalty: weak,
        }
    }

    /// Strongest indicator tier present in a lowercased name.
    ///
    /// Indicators match whole words; "mixed" does not count as "mix".
    pub fn detect(&self, name_lower: &str) -> Option<CompoundTier> {
        let words: Vec<&str> = name_lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        let has_any = |table: &[&str]| words.iter().any(|w| table.contains(w));

        if has_any(STRONG_INDICATORS) {
            Some(CompoundTier::Strong)
        } else if has_any(MODERATE_INDICATORS) {
            Some(CompoundTier::Moderate)
        } else if has_any(WEAK_INDICATORS) {
            Some(CompoundTier::Weak)
        } else {
            None
        }
    }

    /// Penalty magnitude for a lowercased name: only the strongest tier applies.
    pub fn penalty(&self, name_lower: &str) -> i32 {
        match self.detect(name_lower) {
            Some(CompoundTier::Strong) => self.strong_penalty,
            Some(CompoundTier::Moderate) => self.moderate_penalty,
            Some(CompoundTier::Weak) => self.weak_penalty,
            None => 0,
        }
    }
}

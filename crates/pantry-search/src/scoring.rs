//! Relevance scoring.
//!
//! The score is a plain sum of independent signals. Every weight lives in
//! [`ScoringWeights`] so ranking can be tuned without touching control flow.

use pantry_core::{defaults, DataType, FoodRecord};

use crate::compound::CompoundDishDetector;
use crate::incompatibility::IncompatibilityFilter;
use crate::normalizer::NormalizedQuery;

/// Weights of the additive relevance signals.
///
/// Penalties are stored as positive magnitudes and subtracted by the scorer,
/// except `source_branded` which is a signed contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringWeights {
    pub incompatible_penalty: i32,
    pub exact_match: i32,
    pub phrase_match: i32,
    pub full_coverage: i32,
    pub per_term: i32,
    pub first_word: i32,
    pub preparation_match: i32,
    pub canonical: i32,
    pub source_foundation: i32,
    pub source_sr_legacy: i32,
    pub source_branded: i32,
    pub compound_strong: i32,
    pub compound_moderate: i32,
    pub compound_weak: i32,
    pub simple_name: i32,
    /// Names up to this many characters earn `simple_name`.
    pub simple_name_max_chars: usize,
    pub few_segments: i32,
    /// Names with at most this many comma segments earn `few_segments`.
    pub few_segments_max: usize,
    /// Subtracted once per comma segment beyond `few_segments_max`.
    pub extra_segment_penalty: i32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            incompatible_penalty: defaults::SCORE_INCOMPATIBLE_PENALTY,
            exact_match: defaults::SCORE_EXACT_MATCH,
            phrase_match: defaults::SCORE_PHRASE_MATCH,
            full_coverage: defaults::SCORE_FULL_COVERAGE,
            per_term: defaults::SCORE_PER_TERM,
            first_word: defaults::SCORE_FIRST_WORD,
            preparation_match: defaults::SCORE_PREPARATION_MATCH,
            canonical: defaults::SCORE_CANONICAL,
            source_foundation: defaults::SCORE_SOURCE_FOUNDATION,
            source_sr_legacy: defaults::SCORE_SOURCE_SR_LEGACY,
            source_branded: defaults::SCORE_SOURCE_BRANDED,
            compound_strong: defaults::COMPOUND_PENALTY_STRONG,
            compound_moderate: defaults::COMPOUND_PENALTY_MODERATE,
            compound_weak: defaults::COMPOUND_PENALTY_WEAK,
            simple_name: defaults::SCORE_SIMPLE_NAME,
            simple_name_max_chars: defaults::SIMPLE_NAME_MAX_CHARS,
            few_segments: defaults::SCORE_FEW_SEGMENTS,
            few_segments_max: defaults::FEW_SEGMENTS_MAX,
            extra_segment_penalty: defaults::SCORE_EXTRA_SEGMENT_PENALTY,
        }
    }
}

/// Per-signal contributions for one candidate. Penalties appear as negative
/// numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub incompatibility: i32,
    pub exact_match: i32,
    pub phrase_match: i32,
    pub full_coverage: i32,
    pub term_coverage: i32,
    pub first_word: i32,
    pub preparation: i32,
    pub canonical: i32,
    pub data_source: i32,
    pub compound: i32,
    pub simplicity: i32,
    pub segments: i32,
}

impl ScoreBreakdown {
    /// Raw (unclamped) score.
    pub fn total(&self) -> i32 {
        self.incompatibility
            + self.exact_match
            + self.phrase_match
            + self.full_coverage
            + self.term_coverage
            + self.first_word
            + self.preparation
            + self.canonical
            + self.data_source
            + self.compound
            + self.simplicity
            + self.segments
    }
}

/// Scores candidates against a normalized query.
///
/// Scoring is pure: it reads the record and the query and nothing else.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    weights: ScoringWeights,
    detector: CompoundDishDetector,
    filter: IncompatibilityFilter,
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl RelevanceScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        let detector = CompoundDishDetector::with_penalties(
            weights.compound_strong,
            weights.compound_moderate,
            weights.compound_weak,
        );
        Self {
            weights,
            detector,
            filter: IncompatibilityFilter::default(),
        }
    }

    /// Replace the incompatibility rule tables.
    pub fn with_filter(mut self, filter: IncompatibilityFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Raw score; may be negative. Ordering uses this value, exposure clamps it.
    pub fn score(&self, record: &FoodRecord, query: &NormalizedQuery) -> i32 {
        self.explain(record, query).total()
    }

    /// Contribution of every signal for one candidate.
    pub fn explain(&self, record: &FoodRecord, query: &NormalizedQuery) -> ScoreBreakdown {
        let w = &self.weights;
        let name = record.normalized_name.as_str();
        let mut breakdown = ScoreBreakdown::default();

        if self.filter.is_incompatible(name, &query.terms) {
            breakdown.incompatibility = -w.incompatible_penalty;
        }

        if !query.normalized.is_empty() && name == query.normalized {
            breakdown.exact_match = w.exact_match;
        }

        if !query.text.is_empty()
            && (name.contains(query.text.as_str())
                || record.name.to_lowercase().contains(query.text.as_str()))
        {
            breakdown.phrase_match = w.phrase_match;
        }

        let matched_terms = query
            .terms
            .iter()
            .filter(|term| name.contains(term.as_str()))
            .count();
        if !query.terms.is_empty() && matched_terms == query.terms.len() {
            breakdown.full_coverage = w.full_coverage;
        }
        breakdown.term_coverage = w.per_term * matched_terms as i32;

        if let (Some(first_name_word), Some(first_term)) =
            (name.split_whitespace().next(), query.first_term())
        {
            if first_name_word == first_term {
                breakdown.first_word = w.first_word;
            }
        }

        if let Some(method) = record.preparation_method.as_deref() {
            let method = method.trim().to_lowercase();
            if !method.is_empty() && query.text.contains(method.as_str()) {
                breakdown.preparation = w.preparation_match;
            }
        }

        if record.is_canonical {
            breakdown.canonical = w.canonical;
        }

        breakdown.data_source = match record.data_type {
            DataType::Foundation => w.source_foundation,
            DataType::SrLegacy => w.source_sr_legacy,
            DataType::Branded => w.source_branded,
            DataType::Other(_) => 0,
        };

        breakdown.compound = -self.detector.penalty(name);

        if record.name.chars().count() <= w.simple_name_max_chars {
            breakdown.simplicity = w.simple_name;
        }

        let segments = record.name.split(',').count();
        breakdown.segments = if segments <= w.few_segments_max {
            w.few_segments
        } else {
            -w.extra_segment_penalty * (segments - w.few_segments_max) as i32
        };

        breakdown
    }
}

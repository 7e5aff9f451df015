//! Final ordering of scored candidates.

use pantry_core::ScoredCandidate;

/// Sort by raw score, highest first, and keep at most `limit` candidates.
///
/// The sort is stable: equal scores keep their retrieval order, so identical
/// provider responses always produce identical output.
pub fn rank(mut candidates: Vec<ScoredCandidate>, limit: usize) -> Vec<ScoredCandidate> {
    candidates.sort_by(|a, b| b.raw_score.cmp(&a.raw_score));
    candidates.truncate(limit);
    candidates
}

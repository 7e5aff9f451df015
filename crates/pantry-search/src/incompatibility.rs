//! Semantic incompatibility between query intent and candidate identity.
//!
//! A query for "chicken" should not surface "Beef Brisket" near the top, and
//! "ground" meat is not a bratwurst. Incompatibility is not a hard filter: the
//! scorer turns it into a large negative contribution so that, when every
//! candidate conflicts, the best of them still surfaces.
//!
//! Both rule tables are plain data and may be tuned without touching the
//! matching logic.

/// Protein keyword to the protein keywords considered mutually exclusive with it.
///
/// Salmon and tuna are not listed as conflicts of "fish".
pub static PROTEIN_CONFLICTS: &[(&str, &[&str])] = &[
    (
        "chicken",
        &["beef", "pork", "turkey", "fish", "salmon", "tuna", "shrimp", "tofu"],
    ),
    (
        "beef",
        &["chicken", "pork", "turkey", "fish", "salmon", "tuna", "shrimp", "tofu"],
    ),
    (
        "pork",
        &["chicken", "beef", "turkey", "fish", "salmon", "tuna", "shrimp", "tofu"],
    ),
    (
        "turkey",
        &["chicken", "beef", "pork", "fish", "salmon", "tuna", "shrimp", "tofu"],
    ),
    ("fish", &["chicken", "beef", "pork", "turkey", "shrimp", "tofu"]),
    (
        "salmon",
        &["chicken", "beef", "pork", "turkey", "tuna", "shrimp", "tofu"],
    ),
    (
        "tuna",
        &["chicken", "beef", "pork", "turkey", "salmon", "shrimp", "tofu"],
    ),
    (
        "shrimp",
        &["chicken", "beef", "pork", "turkey", "fish", "salmon", "tuna", "tofu"],
    ),
    (
        "tofu",
        &["chicken", "beef", "pork", "turkey", "fish", "salmon", "tuna", "shrimp"],
    ),
];

/// Qualifier term to qualifiers that contradict it.
pub static ATTRIBUTE_CONFLICTS: &[(&str, &[&str])] = &[
    (
        "ground",
        &["bratwurst", "sausage", "hot dog", "patty", "burger", "meatball", "nugget"],
    ),
    (
        "breast",
        &["thigh", "wing", "drumstick", "leg", "tenders", "nugget"],
    ),
    (
        "white",
        &["brown", "wild", "whole wheat", "whole grain", "dark meat"],
    ),
    (
        "whole",
        &["skim", "nonfat", "low fat", "lowfat", "reduced fat", "fat free", "fatfree"],
    ),
];

/// Which rule table flagged a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// Query protein vs. a different protein in the candidate name.
    Protein { query_term: String, found: String },
    /// Query qualifier vs. a contradicting qualifier in the candidate name.
    Attribute { query_term: String, found: String },
}

/// Rule-table based incompatibility check.
#[derive(Debug, Clone, Copy)]
pub struct IncompatibilityFilter {
    protein_conflicts: &'static [(&'static str, &'static [&'static str])],
    attribute_conflicts: &'static [(&'static str, &'static [&'static str])],
}

impl Default for IncompatibilityFilter {
    fn default() -> Self {
        Self {
            protein_conflicts: PROTEIN_CONFLICTS,
            attribute_conflicts: ATTRIBUTE_CONFLICTS,
        }
    }
}

impl IncompatibilityFilter {
    /// Filter with custom rule tables.
    pub fn with_tables(
        protein_conflicts: &'static [(&'static str, &'static [&'static str])],
        attribute_conflicts: &'static [(&'static str, &'static [&'static str])],
    ) -> Self {
        Self {
            protein_conflicts,
            attribute_conflicts,
        }
    }

    /// Whether the candidate conflicts with the query terms.
    pub fn is_incompatible(&self, name_lower: &str, query_terms: &[String]) -> bool {
        self.find_conflict(name_lower, query_terms).is_some()
    }

    /// First conflict found, protein table before attribute table.
    pub fn find_conflict(&self, name_lower: &str, query_terms: &[String]) -> Option<Conflict> {
        for term in query_terms {
            if let Some(conflicts) = lookup(self.protein_conflicts, term) {
                let found = conflicts.iter().find(|conflict| {
                    name_lower.contains(**conflict) && !is_listed_alternative(name_lower, conflict)
                });
                if let Some(found) = found {
                    return Some(Conflict::Protein {
                        query_term: term.clone(),
                        found: (*found).to_string(),
                    });
                }
            }
        }

        for term in query_terms {
            if let Some(conflicts) = lookup(self.attribute_conflicts, term) {
                if let Some(found) = conflicts.iter().find(|c| name_lower.contains(**c)) {
                    return Some(Conflict::Attribute {
                        query_term: term.clone(),
                        found: (*found).to_string(),
                    });
                }
            }
        }

        None
    }
}

fn lookup(
    table: &'static [(&'static str, &'static [&'static str])],
    term: &str,
) -> Option<&'static [&'static str]> {
    table
        .iter()
        .find(|(key, _)| *key == term)
        .map(|(_, conflicts)| *conflicts)
}

/// "chicken or beef" lists options rather than naming a different food.
fn is_listed_alternative(name_lower: &str, conflict: &str) -> bool {
    name_lower.contains(&format!("or {conflict}")) || name_lower.contains(&format!("{conflict} or"))
}

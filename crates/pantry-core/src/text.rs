//! Text normalization shared by indexing, live record mapping and querying.
//!
//! The same transform produces `FoodRecord::normalized_name` at index time
//! and the exact-match channel of a query, so the two are comparable with a
//! plain string equality.

/// Lowercase, drop every character that is neither alphanumeric nor
/// whitespace, and collapse whitespace runs into single spaces.
pub fn normalize_text(input: &str) -> String {
    let stripped: String = input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split normalized text into terms, discarding empty tokens.
pub fn tokenize(normalized: &str) -> Vec<String> {
    normalized.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize_text("Chicken Breast, raw"), "chicken breast raw");
        assert_eq!(normalize_text("Rice (white), cooked!"), "rice white cooked");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_text("  White \t Rice \n cooked "), "white rice cooked");
    }

    #[test]
    fn test_normalize_keeps_digits() {
        assert_eq!(normalize_text("Milk, 2% fat"), "milk 2 fat");
    }

    #[test]
    fn test_normalize_empty_and_symbols_only() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("?!,"), "");
    }

    #[test]
    fn test_tokenize_normalized_text() {
        assert_eq!(tokenize(&normalize_text("Ground  Chicken!")), vec!["ground", "chicken"]);
    }

    #[test]
    fn test_tokenize_discards_empty_tokens() {
        assert!(tokenize("   ").is_empty());
        assert_eq!(tokenize(" rice "), vec!["rice"]);
    }
}

//! Lexical helpers for the response evaluator
//!
//! Keyword extraction and technical-term detection. All pattern sets are
//! fixed at compile time; behavior is fully deterministic.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Stop words discarded during keyword extraction
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "be", "been", "being", "have", "has", "had", "do",
    "does", "did", "will", "would", "should", "could", "may", "might", "can", "this", "that",
    "these", "those", "i", "you", "he", "she", "it", "we", "they",
];

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid word pattern"));

/// Upper-case acronyms of two or more letters, matched against the raw answer
static ACRONYM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2,}\b").expect("valid acronym pattern"));

/// Words carrying technical suffixes
static SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\w+(?:tion|ment|ness|ity|ism)\b").expect("valid suffix pattern")
});

/// Fixed vocabulary of systems and programming terms
static VOCAB_RE: LazyLock<Regex> = LazyLock::new(|| {
    let vocabulary = [
        "algorithm|data|structure|pattern|architecture|design",
        "function|method|class|interface|api",
        "database|query|index|transaction",
        "concurrent|asynchronous|parallel|distributed",
    ]
    .join("|");
    Regex::new(&format!(r"(?i)\b(?:{})\b", vocabulary)).expect("valid vocabulary pattern")
});

/// Extract the keyword set from free text
///
/// Lower-cases, tokenizes into words, and drops stop words and tokens of
/// length <= 2.
pub fn extract_keywords(text: &str) -> HashSet<String> {
    WORD_RE
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .filter(|w| w.len() > 2 && !STOP_WORDS.contains(&w.as_str()))
        .collect()
}

/// Detect distinct technical terms in an answer
///
/// Matches acronyms against the raw text, suffixes and the fixed vocabulary
/// case-insensitively. Matches are deduplicated lower-cased.
pub fn detect_technical_terms(answer: &str) -> HashSet<String> {
    let mut terms = HashSet::new();
    for re in [&*ACRONYM_RE, &*SUFFIX_RE, &*VOCAB_RE] {
        for m in re.find_iter(answer) {
            terms.insert(m.as_str().to_lowercase());
        }
    }
    terms
}

/// Categories that trigger the technical-depth check
const TECHNICAL_CATEGORIES: &[&str] = &["technical", "programming", "algorithm", "system design"];

/// True when the category matches the technical allowlist (case-insensitive
/// substring)
pub fn is_technical_category(category: &str) -> bool {
    let category = category.to_lowercase();
    TECHNICAL_CATEGORIES
        .iter()
        .any(|allowed| category.contains(allowed))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Keyword Extraction Tests ====================

    #[test]
    fn extract_keywords_drops_stop_words() {
        let keywords = extract_keywords("The cache is a layer for the database");
        assert!(keywords.contains("cache"));
        assert!(keywords.contains("layer"));
        assert!(keywords.contains("database"));
        assert!(!keywords.contains("the"));
        assert!(!keywords.contains("for"));
    }

    #[test]
    fn extract_keywords_drops_short_tokens() {
        let keywords = extract_keywords("go to db io");
        assert!(!keywords.contains("go"));
        assert!(!keywords.contains("db"));
        assert!(!keywords.contains("io"));
    }

    #[test]
    fn extract_keywords_lowercases() {
        let keywords = extract_keywords("Encapsulation INHERITANCE Polymorphism");
        assert!(keywords.contains("encapsulation"));
        assert!(keywords.contains("inheritance"));
        assert!(keywords.contains("polymorphism"));
    }

    #[test]
    fn extract_keywords_empty_text_yields_empty_set() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   ").is_empty());
    }

    // ==================== Technical Term Tests ====================

    #[test]
    fn detects_acronyms_in_raw_text() {
        let terms = detect_technical_terms("We expose a REST API over HTTP");
        assert!(terms.contains("rest"));
        assert!(terms.contains("api"));
        assert!(terms.contains("http"));
    }

    #[test]
    fn detects_technical_suffixes() {
        let terms = detect_technical_terms("encapsulation improves maintainability");
        assert!(terms.contains("encapsulation"));
        assert!(terms.contains("maintainability"));
    }

    #[test]
    fn detects_fixed_vocabulary() {
        let terms = detect_technical_terms("a distributed database with an index");
        assert!(terms.contains("distributed"));
        assert!(terms.contains("database"));
        assert!(terms.contains("index"));
    }

    #[test]
    fn duplicate_terms_count_once() {
        let terms = detect_technical_terms("database database DATABASE");
        assert_eq!(
            terms.iter().filter(|t| t.as_str() == "database").count(),
            1
        );
    }

    #[test]
    fn plain_prose_has_no_technical_terms() {
        let terms = detect_technical_terms("my favorite color even so");
        assert!(terms.is_empty());
    }

    // ==================== Category Allowlist Tests ====================

    #[test]
    fn technical_categories_match_by_substring() {
        assert!(is_technical_category("Programming Fundamentals"));
        assert!(is_technical_category("System Design"));
        assert!(is_technical_category("algorithms"));
        assert!(is_technical_category("TECHNICAL"));
    }

    #[test]
    fn non_technical_categories_do_not_match() {
        assert!(!is_technical_category("Behavioral"));
        assert!(!is_technical_category("Communication"));
    }
}

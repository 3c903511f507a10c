//! Intent classification for a single utterance.

use once_cell::sync::Lazy;
use regex::Regex;

static TOTAL_QUERY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^total").unwrap());
static RESET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:reiniciar|borrar)").unwrap());

/// Product additions need at least a quantity and a product word.
pub const MIN_ADD_ITEM_TOKENS: usize = 2;

/// What the speaker asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedIntent {
    TotalQuery,
    Reset,
    /// Candidate product addition; carries the cleaned utterance.
    AddItem(String),
    Unrecognized,
}

/// Classify an utterance. Pure; the same text always yields the same intent.
///
/// Priority: total query, then reset, then the token-count guard, then
/// product addition.
pub fn classify(utterance: &str) -> ClassifiedIntent {
    let text = utterance.trim().to_lowercase();

    if TOTAL_QUERY.is_match(&text) {
        return ClassifiedIntent::TotalQuery;
    }
    if RESET.is_match(&text) {
        return ClassifiedIntent::Reset;
    }
    if text.split_whitespace().count() < MIN_ADD_ITEM_TOKENS {
        return ClassifiedIntent::Unrecognized;
    }
    ClassifiedIntent::AddItem(text)
}

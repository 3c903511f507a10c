//! Product phrase cleanup before catalog lookup.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_DETERMINER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:las|los|la|el|unos|unas|un|una)\s+").unwrap());

/// Canonical form of a spoken product phrase.
///
/// Drops one leading article, trailing whitespace and standalone digit tokens
/// (left over when a quantity was captured into the phrase). Letter case is
/// left alone. Idempotent: the passes repeat until nothing changes, since
/// removing a digit can expose a new leading article ("2 la pera").
pub fn normalize_product(phrase: &str) -> String {
    let mut current = phrase.to_string();
    loop {
        let next = normalize_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn normalize_once(phrase: &str) -> String {
    let without_article = LEADING_DETERMINER.replace(phrase, "");
    without_article
        .trim_end()
        .split_whitespace()
        .filter(|token| !token.chars().all(|c| c.is_ascii_digit()))
        .collect::<Vec<_>>()
        .join(" ")
}

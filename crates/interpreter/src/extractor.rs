//! Quantity / product extraction for product-addition utterances.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use voxledger_core::Quantity;

use crate::normalizer::normalize_product;

/// Measure word spoken with the quantity. Informational only: pricing is
/// always `unit_price × quantity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kilos,
    Grams,
    Units,
}

impl Unit {
    fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "kilo" | "kilos" | "kg" => Some(Unit::Kilos),
            "gramo" | "gramos" | "gr" => Some(Unit::Grams),
            "unidad" | "unidades" | "u" => Some(Unit::Units),
            _ => None,
        }
    }

    /// Plural Spanish word used in feedback.
    pub fn label(self) -> &'static str {
        match self {
            Unit::Kilos => "kilos",
            Unit::Grams => "gramos",
            Unit::Units => "unidades",
        }
    }
}

/// Quantity and product phrase split out of an utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub quantity: Quantity,
    /// Already normalized; never empty.
    pub product_phrase: String,
    pub unit: Option<Unit>,
}

/// Which shape of utterance matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// `2 kilos de manzana`
    QuantityUnitDe,
    /// `3 peras`
    QuantityFirst,
    /// `peras 3`
    QuantityLast,
}

// Most specific first; the first pattern that matches decides.
static PATTERNS: Lazy<Vec<(Shape, Regex)>> = Lazy::new(|| {
    vec![
        (
            Shape::QuantityUnitDe,
            Regex::new(r"(?i)^(\d+)\s*(kilos?|kg|gramos?|gr|unidades?|u)?\s+de\s+(.+)$").unwrap(),
        ),
        (Shape::QuantityFirst, Regex::new(r"(?i)^(\d+)\s+(.+)$").unwrap()),
        (Shape::QuantityLast, Regex::new(r"(?i)^(.+)\s+(\d+)$").unwrap()),
    ]
});

/// Connector between quantity and product; never a product on its own.
const CONNECTOR: &str = "de";

/// Split an add-item utterance into quantity and product.
///
/// Returns `None` when no pattern matches, the quantity is zero or out of
/// range, or the product phrase is empty or only the connector ("2 de").
/// Unit words and lone articles stay as the phrase ("2 kilos" → `kilos`) and
/// are left to the catalog lookup.
pub fn extract(utterance: &str) -> Option<Extraction> {
    let text = utterance.trim();

    let (shape, caps) = PATTERNS
        .iter()
        .find_map(|(shape, re)| re.captures(text).map(|caps| (*shape, caps)))?;

    let (digits, phrase, unit) = split_captures(shape, &caps)?;

    let quantity = match digits.parse::<u32>().ok().and_then(|n| Quantity::new(n).ok()) {
        Some(q) => q,
        None => {
            debug!(utterance = text, digits, "quantity is not a positive integer");
            return None;
        }
    };

    let product_phrase = normalize_product(&phrase.trim().to_lowercase());
    if product_phrase.is_empty() || product_phrase == CONNECTOR {
        debug!(utterance = text, "no product word left after extraction");
        return None;
    }

    debug!(utterance = text, ?shape, quantity = quantity.get(), product = %product_phrase, "extracted");
    Some(Extraction {
        quantity,
        product_phrase,
        unit,
    })
}

fn split_captures<'t>(shape: Shape, caps: &Captures<'t>) -> Option<(&'t str, &'t str, Option<Unit>)> {
    match shape {
        Shape::QuantityUnitDe => {
            let unit = caps.get(2).and_then(|m| Unit::from_word(m.as_str()));
            Some((caps.get(1)?.as_str(), caps.get(3)?.as_str(), unit))
        }
        Shape::QuantityFirst => Some((caps.get(1)?.as_str(), caps.get(2)?.as_str(), None)),
        Shape::QuantityLast => Some((caps.get(2)?.as_str(), caps.get(1)?.as_str(), None)),
    }
}

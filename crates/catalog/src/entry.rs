use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use voxledger_core::{DomainError, Money};

/// Accent- and punctuation-insensitive form of a product name.
///
/// NFD-decompose, drop combining marks, keep letters only, lower-case.
/// `"Limón"` and `"limon"` share the key `"limon"`.
pub fn comparison_key(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Product known to the shop, with its unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogEntryWire", into = "CatalogEntryWire")]
pub struct CatalogEntry {
    name: String,
    unit_price: Money,
    key: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, unit_price: u64) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("catalog entry name must not be empty"));
        }
        let unit_price = Money::positive(unit_price)
            .map_err(|_| DomainError::validation(format!("price of '{name}' must be positive")))?;
        let key = comparison_key(&name);
        Ok(Self {
            name,
            unit_price,
            key,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Precomputed [`comparison_key`] of the name.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Transport shape: `{ "name": "manzana", "price": 150 }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogEntryWire {
    name: String,
    #[serde(alias = "unitPrice", alias = "unit_price")]
    price: serde_json::Number,
}

impl TryFrom<CatalogEntryWire> for CatalogEntry {
    type Error = DomainError;

    fn try_from(wire: CatalogEntryWire) -> Result<Self, Self::Error> {
        let price = match wire.price.as_u64() {
            Some(p) => p,
            None => {
                // Accept 150.0, reject 149.5 and negatives.
                let p = wire.price.as_f64().unwrap_or(-1.0);
                if p <= 0.0 || p.fract() != 0.0 || p > u64::MAX as f64 {
                    return Err(DomainError::validation(format!(
                        "price of '{}' must be a positive whole amount, got {}",
                        wire.name, wire.price
                    )));
                }
                p as u64
            }
        };
        CatalogEntry::new(wire.name, price)
    }
}

impl From<CatalogEntry> for CatalogEntryWire {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            name: entry.name,
            price: entry.unit_price.amount().into(),
        }
    }
}

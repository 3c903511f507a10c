//! Structured result of interpreting one utterance, plus the Spanish texts
//! shown on screen and read aloud for it.

use serde::{Deserialize, Serialize};

use voxledger_core::{Money, Quantity};

use crate::extractor::Unit;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    ItemAdded {
        product: String,
        quantity: Quantity,
        unit_price: Money,
        line_total: Money,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<Unit>,
    },
    TotalReport {
        total: Money,
        item_count: usize,
    },
    NoItemsYet,
    ResetConfirmed,
    ProductNotFound {
        product: String,
    },
    UnrecognizedCommand,
}

impl Outcome {
    /// Whether the ledger changed and must be persisted again.
    pub fn mutates_ledger(&self) -> bool {
        matches!(self, Outcome::ItemAdded { .. } | Outcome::ResetConfirmed)
    }

    /// Presentation hint: the user should retry.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Outcome::ProductNotFound { .. } | Outcome::UnrecognizedCommand
        )
    }

    /// On-screen feedback line.
    pub fn feedback(&self) -> String {
        match self {
            Outcome::ItemAdded {
                product,
                quantity,
                line_total,
                unit,
                ..
            } => {
                let unit = unit.map(Unit::label).unwrap_or(Unit::Units.label());
                format!("Agregado: {quantity} {unit} de {product} - ${line_total}")
            }
            Outcome::TotalReport { total, .. } => format!("El total es {total} pesos."),
            Outcome::NoItemsYet => "No hay productos en la lista".to_string(),
            Outcome::ResetConfirmed => {
                "Total reiniciado. Puedes comenzar una nueva venta.".to_string()
            }
            Outcome::ProductNotFound { product } => {
                format!("Producto \"{product}\" no encontrado. Intenta nuevamente.")
            }
            Outcome::UnrecognizedCommand => {
                "No entendí. Di algo como '2 kilos de manzana' o 'total' para ver el total."
                    .to_string()
            }
        }
    }

    /// Shorter text for speech synthesis; `None` when nothing is spoken.
    pub fn announcement(&self) -> Option<String> {
        match self {
            Outcome::ItemAdded {
                product, quantity, ..
            } => Some(format!("Agregado {quantity} de {product}")),
            Outcome::TotalReport { total, .. } => Some(format!("El total es {total} pesos.")),
            Outcome::NoItemsYet => Some("Aún no hay productos agregados".to_string()),
            Outcome::ResetConfirmed => Some("Total reiniciado".to_string()),
            Outcome::ProductNotFound { product } => {
                Some(format!("Producto {product} no reconocido"))
            }
            Outcome::UnrecognizedCommand => None,
        }
    }
}

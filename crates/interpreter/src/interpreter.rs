use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use voxledger_catalog::CatalogProvider;
use voxledger_core::{DomainResult, LedgerId};
use voxledger_sales::{LedgerSnapshot, OrderLedger};

use crate::classifier::{ClassifiedIntent, classify};
use crate::extractor::extract;
use crate::outcome::Outcome;

/// Turns utterances into ledger mutations, one at a time.
///
/// Owns the session ledger; the catalog is read from `P` on every utterance so
/// a refreshed (or still empty) catalog is picked up without blocking.
#[derive(Debug)]
pub struct CommandInterpreter<P> {
    catalog: P,
    ledger: OrderLedger,
}

impl<P: CatalogProvider> CommandInterpreter<P> {
    /// Start a session with an empty ledger.
    pub fn new(catalog: P) -> Self {
        Self {
            catalog,
            ledger: OrderLedger::empty(LedgerId::new()),
        }
    }

    /// Replace the ledger with persisted state.
    ///
    /// On error the current ledger is kept as is.
    pub fn initialize(&mut self, snapshot: LedgerSnapshot) -> DomainResult<()> {
        self.ledger = OrderLedger::from_snapshot(self.ledger.id_typed(), snapshot)?;
        Ok(())
    }

    pub fn ledger(&self) -> &OrderLedger {
        &self.ledger
    }

    /// Committed state, for the persistence layer.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }

    pub fn interpret(&mut self, utterance: &str) -> Outcome {
        self.interpret_at(utterance, Utc::now())
    }

    /// Same as [`interpret`](Self::interpret) with an explicit timestamp for
    /// any entry it appends.
    pub fn interpret_at(&mut self, utterance: &str, now: DateTime<Utc>) -> Outcome {
        let intent = classify(utterance);
        debug!(utterance, ?intent, "classified utterance");

        match intent {
            ClassifiedIntent::TotalQuery => self.report_total(),
            ClassifiedIntent::Reset => match self.ledger.reset(now) {
                Ok(_) => Outcome::ResetConfirmed,
                Err(err) => {
                    warn!(error = %err, "ledger rejected reset");
                    Outcome::UnrecognizedCommand
                }
            },
            ClassifiedIntent::AddItem(text) => self.add_item(&text, now),
            ClassifiedIntent::Unrecognized => Outcome::UnrecognizedCommand,
        }
    }

    fn report_total(&self) -> Outcome {
        if self.ledger.is_empty() {
            return Outcome::NoItemsYet;
        }
        Outcome::TotalReport {
            total: self.ledger.total(),
            item_count: self.ledger.entries().len(),
        }
    }

    fn add_item(&mut self, text: &str, now: DateTime<Utc>) -> Outcome {
        let Some(extraction) = extract(text) else {
            return Outcome::UnrecognizedCommand;
        };

        let catalog = self.catalog.current();
        let Some(found) = catalog.lookup(&extraction.product_phrase) else {
            return Outcome::ProductNotFound {
                product: extraction.product_phrase,
            };
        };
        // The catalog spelling is recorded, not the heard phrase ("peras" → "pera").
        let product = found.entry.name().to_string();
        debug!(heard = %extraction.product_phrase, product = %product, kind = ?found.kind, "product resolved");

        match self
            .ledger
            .append(product, extraction.quantity, found.entry.unit_price(), now)
        {
            Ok(entry) => Outcome::ItemAdded {
                product: entry.product,
                quantity: entry.quantity,
                unit_price: entry.unit_price,
                line_total: entry.line_total,
                unit: extraction.unit,
            },
            Err(err) => {
                // Only reachable on arithmetic overflow; the ledger is untouched.
                warn!(error = %err, product = %extraction.product_phrase, "ledger rejected entry");
                Outcome::UnrecognizedCommand
            }
        }
    }
}

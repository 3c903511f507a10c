use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use voxledger_core::{
    Aggregate, AggregateRoot, DomainError, DomainResult, Event, LedgerId, Money, Quantity,
};

/// One sold line (immutable once appended).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Catalog name of the matched product.
    pub product: String,
    pub quantity: Quantity,
    pub unit_price: Money,
    /// `unit_price × quantity`.
    pub line_total: Money,
    pub timestamp: DateTime<Utc>,
}

/// Read-only copy of the ledger, exchanged with persistence and reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub total: Money,
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,
}

impl LedgerSnapshot {
    pub fn item_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Aggregate root: running sale total plus itemized history.
///
/// Invariant: `total` always equals the sum of `entries[i].line_total`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLedger {
    id: LedgerId,
    total: Money,
    entries: Vec<LedgerEntry>,
    version: u64,
}

impl OrderLedger {
    /// Fresh ledger for a new session.
    pub fn empty(id: LedgerId) -> Self {
        Self {
            id,
            total: Money::ZERO,
            entries: Vec::new(),
            version: 0,
        }
    }

    /// Restore a previously persisted ledger.
    ///
    /// Rejects snapshots that break the ledger invariant rather than
    /// silently repairing them.
    pub fn from_snapshot(id: LedgerId, snapshot: LedgerSnapshot) -> DomainResult<Self> {
        let mut sum = Money::ZERO;
        for (idx, entry) in snapshot.entries.iter().enumerate() {
            if entry.unit_price.is_zero() {
                return Err(DomainError::invariant(format!(
                    "entry {idx} has a zero unit price"
                )));
            }
            let expected = entry.unit_price.checked_times(entry.quantity)?;
            if expected != entry.line_total {
                return Err(DomainError::invariant(format!(
                    "entry {idx} line total {} != {} x {}",
                    entry.line_total, entry.unit_price, entry.quantity
                )));
            }
            sum = sum.checked_add(entry.line_total)?;
        }

        if sum != snapshot.total {
            return Err(DomainError::invariant(format!(
                "ledger total {} does not match sum of entries {sum}",
                snapshot.total
            )));
        }

        Ok(Self {
            id,
            total: snapshot.total,
            entries: snapshot.entries,
            version: 0,
        })
    }

    pub fn id_typed(&self) -> LedgerId {
        self.id
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            total: self.total,
            entries: self.entries.clone(),
        }
    }

    /// Record a sold line and raise the total. All or nothing.
    pub fn append(
        &mut self,
        product: impl Into<String>,
        quantity: Quantity,
        unit_price: Money,
        timestamp: DateTime<Utc>,
    ) -> DomainResult<LedgerEntry> {
        let cmd = LedgerCommand::AppendEntry(AppendEntry {
            ledger_id: self.id,
            product: product.into(),
            quantity,
            unit_price,
            occurred_at: timestamp,
        });
        let events = self.execute(&cmd)?;
        match events.into_iter().next() {
            Some(LedgerEvent::EntryAppended(e)) => Ok(e.entry),
            _ => Err(DomainError::invariant("append produced no entry")),
        }
    }

    /// Clear total and history. There is no undo.
    pub fn reset(&mut self, timestamp: DateTime<Utc>) -> DomainResult<usize> {
        let cmd = LedgerCommand::ResetLedger(ResetLedger {
            ledger_id: self.id,
            occurred_at: timestamp,
        });
        let events = self.execute(&cmd)?;
        match events.into_iter().next() {
            Some(LedgerEvent::LedgerReset(e)) => Ok(e.cleared_entries),
            _ => Err(DomainError::invariant("reset produced no event")),
        }
    }
}

impl AggregateRoot for OrderLedger {
    type Id = LedgerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AppendEntry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendEntry {
    pub ledger_id: LedgerId,
    pub product: String,
    pub quantity: Quantity,
    pub unit_price: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ResetLedger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetLedger {
    pub ledger_id: LedgerId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerCommand {
    AppendEntry(AppendEntry),
    ResetLedger(ResetLedger),
}

/// Event: EntryAppended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryAppended {
    pub ledger_id: LedgerId,
    pub entry: LedgerEntry,
}

/// Event: LedgerReset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerReset {
    pub ledger_id: LedgerId,
    pub cleared_entries: usize,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    EntryAppended(EntryAppended),
    LedgerReset(LedgerReset),
}

impl Event for LedgerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::EntryAppended(_) => "sales.ledger.entry_appended",
            LedgerEvent::LedgerReset(_) => "sales.ledger.reset",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            LedgerEvent::EntryAppended(e) => e.entry.timestamp,
            LedgerEvent::LedgerReset(e) => e.occurred_at,
        }
    }
}

impl Aggregate for OrderLedger {
    type Command = LedgerCommand;
    type Event = LedgerEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            LedgerEvent::EntryAppended(e) => {
                // `handle` already proved the addition fits.
                self.total = Money::new(self.total.amount().saturating_add(e.entry.line_total.amount()));
                self.entries.push(e.entry.clone());
                info!(
                    ledger_id = %self.id,
                    product = %e.entry.product,
                    quantity = e.entry.quantity.get(),
                    line_total = e.entry.line_total.amount(),
                    total = self.total.amount(),
                    "ledger entry appended"
                );
            }
            LedgerEvent::LedgerReset(e) => {
                self.total = Money::ZERO;
                self.entries.clear();
                info!(ledger_id = %self.id, cleared = e.cleared_entries, "ledger reset");
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            LedgerCommand::AppendEntry(cmd) => self.handle_append(cmd),
            LedgerCommand::ResetLedger(cmd) => self.handle_reset(cmd),
        }
    }
}

impl OrderLedger {
    fn ensure_ledger_id(&self, ledger_id: LedgerId) -> Result<(), DomainError> {
        if self.id != ledger_id {
            return Err(DomainError::invariant("ledger_id mismatch"));
        }
        Ok(())
    }

    fn handle_append(&self, cmd: &AppendEntry) -> Result<Vec<LedgerEvent>, DomainError> {
        self.ensure_ledger_id(cmd.ledger_id)?;

        if cmd.product.trim().is_empty() {
            return Err(DomainError::validation("product must not be empty"));
        }
        if cmd.unit_price.is_zero() {
            return Err(DomainError::validation("unit_price must be positive"));
        }

        let line_total = cmd.unit_price.checked_times(cmd.quantity)?;
        // Reject now so `apply` never has to.
        self.total.checked_add(line_total)?;

        Ok(vec![LedgerEvent::EntryAppended(EntryAppended {
            ledger_id: cmd.ledger_id,
            entry: LedgerEntry {
                product: cmd.product.clone(),
                quantity: cmd.quantity,
                unit_price: cmd.unit_price,
                line_total,
                timestamp: cmd.occurred_at,
            },
        })])
    }

    fn handle_reset(&self, cmd: &ResetLedger) -> Result<Vec<LedgerEvent>, DomainError> {
        self.ensure_ledger_id(cmd.ledger_id)?;

        Ok(vec![LedgerEvent::LedgerReset(LedgerReset {
            ledger_id: cmd.ledger_id,
            cleared_entries: self.entries.len(),
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_ledger_id() -> LedgerId {
        LedgerId::new()
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn qty(n: u32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    fn sum_of_lines(ledger: &OrderLedger) -> u64 {
        ledger.entries().iter().map(|e| e.line_total.amount()).sum()
    }

    #[test]
    fn append_records_line_and_raises_total() {
        let mut ledger = OrderLedger::empty(test_ledger_id());

        let entry = ledger
            .append("manzana", qty(2), Money::new(150), test_time())
            .unwrap();

        assert_eq!(entry.line_total, Money::new(300));
        assert_eq!(ledger.total(), Money::new(300));
        assert_eq!(ledger.entries().len(), 1);
        assert_eq!(ledger.entries()[0].product, "manzana");
        assert_eq!(ledger.version(), 1);
    }

    #[test]
    fn entries_keep_append_order() {
        let mut ledger = OrderLedger::empty(test_ledger_id());
        ledger.append("pan", qty(1), Money::new(50), test_time()).unwrap();
        ledger.append("leche", qty(2), Money::new(120), test_time()).unwrap();

        let names: Vec<_> = ledger.entries().iter().map(|e| e.product.as_str()).collect();
        assert_eq!(names, vec!["pan", "leche"]);
        assert_eq!(ledger.total(), Money::new(290));
    }

    #[test]
    fn overflowing_append_commits_nothing() {
        let mut ledger = OrderLedger::empty(test_ledger_id());
        ledger.append("pan", qty(1), Money::new(50), test_time()).unwrap();
        let before = ledger.clone();

        let err = ledger
            .append("oro", qty(2), Money::new(u64::MAX), test_time())
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(ledger, before);
    }

    #[test]
    fn zero_price_is_rejected() {
        let mut ledger = OrderLedger::empty(test_ledger_id());
        let err = ledger
            .append("pan", qty(1), Money::ZERO, test_time())
            .unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("unit_price must be positive") => {}
            _ => panic!("Expected Validation for zero price"),
        }
        assert!(ledger.is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let mut ledger = OrderLedger::empty(test_ledger_id());
        ledger.append("pera", qty(3), Money::new(180), test_time()).unwrap();
        ledger.append("pan", qty(1), Money::new(50), test_time()).unwrap();

        let cleared = ledger.reset(test_time()).unwrap();

        assert_eq!(cleared, 2);
        assert_eq!(ledger.total(), Money::ZERO);
        assert!(ledger.entries().is_empty());
        assert_eq!(ledger.version(), 3);
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let mut ledger = OrderLedger::empty(test_ledger_id());
        ledger.append("pan", qty(1), Money::new(50), test_time()).unwrap();
        let before = ledger.clone();

        let cmd = LedgerCommand::AppendEntry(AppendEntry {
            ledger_id: ledger.id_typed(),
            product: "leche".to_string(),
            quantity: qty(1),
            unit_price: Money::new(120),
            occurred_at: test_time(),
        });
        let events1 = ledger.handle(&cmd).unwrap();
        let events2 = ledger.handle(&cmd).unwrap();

        assert_eq!(ledger, before);
        assert_eq!(events1, events2);
    }

    #[test]
    fn events_carry_type_and_business_time() {
        let mut ledger = OrderLedger::empty(test_ledger_id());
        let at = test_time();

        let appended = ledger
            .execute(&LedgerCommand::AppendEntry(AppendEntry {
                ledger_id: ledger.id_typed(),
                product: "pan".to_string(),
                quantity: qty(2),
                unit_price: Money::new(50),
                occurred_at: at,
            }))
            .unwrap();
        assert_eq!(appended.len(), 1);
        assert_eq!(appended[0].event_type(), "sales.ledger.entry_appended");
        assert_eq!(appended[0].occurred_at(), at);
        assert_eq!(Event::version(&appended[0]), 1);

        let reset = ledger
            .execute(&LedgerCommand::ResetLedger(ResetLedger {
                ledger_id: ledger.id_typed(),
                occurred_at: at,
            }))
            .unwrap();
        assert_eq!(reset[0].event_type(), "sales.ledger.reset");
        match &reset[0] {
            LedgerEvent::LedgerReset(e) => assert_eq!(e.cleared_entries, 1),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(ledger.is_empty());
    }

    #[test]
    fn foreign_ledger_commands_are_rejected() {
        let ledger = OrderLedger::empty(test_ledger_id());
        let cmd = LedgerCommand::ResetLedger(ResetLedger {
            ledger_id: test_ledger_id(),
            occurred_at: test_time(),
        });
        let err = ledger.handle(&cmd).unwrap_err();
        assert_eq!(err, DomainError::invariant("ledger_id mismatch"));
    }

    #[test]
    fn snapshot_round_trips_through_restore() {
        let mut ledger = OrderLedger::empty(test_ledger_id());
        ledger.append("kiwi", qty(2), Money::new(250), test_time()).unwrap();
        ledger.append("pan", qty(4), Money::new(50), test_time()).unwrap();

        let snapshot = ledger.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: LedgerSnapshot = serde_json::from_str(&json).unwrap();

        let restored = OrderLedger::from_snapshot(test_ledger_id(), decoded).unwrap();
        assert_eq!(restored.total(), Money::new(700));
        assert_eq!(restored.entries(), ledger.entries());
    }

    #[test]
    fn restore_rejects_inconsistent_total() {
        let mut ledger = OrderLedger::empty(test_ledger_id());
        ledger.append("kiwi", qty(2), Money::new(250), test_time()).unwrap();
        let mut snapshot = ledger.snapshot();
        snapshot.total = Money::new(1);

        let err = OrderLedger::from_snapshot(test_ledger_id(), snapshot).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn restore_rejects_inconsistent_line_total() {
        let mut ledger = OrderLedger::empty(test_ledger_id());
        ledger.append("kiwi", qty(2), Money::new(250), test_time()).unwrap();
        let mut snapshot = ledger.snapshot();
        snapshot.entries[0].line_total = Money::new(250);
        snapshot.total = Money::new(250);

        assert!(OrderLedger::from_snapshot(test_ledger_id(), snapshot).is_err());
    }

    #[test]
    fn snapshot_json_uses_declared_field_names() {
        let json = r#"{
            "total": 300,
            "entries": [
                {"product": "manzana", "quantity": 2, "unit_price": 150, "line_total": 300,
                 "timestamp": "2026-01-05T10:15:00Z"}
            ]
        }"#;
        let snapshot: LedgerSnapshot = serde_json::from_str(json).unwrap();
        let ledger = OrderLedger::from_snapshot(test_ledger_id(), snapshot).unwrap();
        assert_eq!(ledger.total(), Money::new(300));

        // Rows keyed `total`/`price` (browser history layout) are not a ledger entry.
        let foreign = r#"{
            "total": 300,
            "entries": [
                {"product": "manzana", "quantity": "2", "price": 150, "total": 300,
                 "timestamp": "10:15:00"}
            ]
        }"#;
        assert!(serde_json::from_str::<LedgerSnapshot>(foreign).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: total equals the sum of line totals after any sequence
        /// of appends and resets.
        #[test]
        fn total_matches_sum_of_lines(
            ops in prop::collection::vec(
                prop_oneof![
                    (1u32..50u32, 1u64..10_000u64).prop_map(Some),
                    Just(None),
                ],
                0..40,
            )
        ) {
            let mut ledger = OrderLedger::empty(test_ledger_id());
            for op in ops {
                match op {
                    Some((q, price)) => {
                        ledger.append("item", qty(q), Money::new(price), test_time()).unwrap();
                    }
                    None => {
                        ledger.reset(test_time()).unwrap();
                    }
                }
                prop_assert_eq!(ledger.total().amount(), sum_of_lines(&ledger));
            }
        }

        /// Property: reset leaves nothing behind, whatever came before.
        #[test]
        fn reset_is_complete(
            lines in prop::collection::vec((1u32..50u32, 1u64..10_000u64), 0..20)
        ) {
            let mut ledger = OrderLedger::empty(test_ledger_id());
            for (q, price) in lines {
                ledger.append("item", qty(q), Money::new(price), test_time()).unwrap();
            }
            ledger.reset(test_time()).unwrap();
            prop_assert_eq!(ledger.total(), Money::ZERO);
            prop_assert!(ledger.entries().is_empty());
        }
    }
}

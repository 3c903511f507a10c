//! Sale ledger domain module.
//!
//! Running total plus itemized history for one selling session, implemented
//! as deterministic domain logic (no IO, no storage).

pub mod ledger;

pub use ledger::{
    AppendEntry, EntryAppended, LedgerCommand, LedgerEntry, LedgerEvent, LedgerReset,
    LedgerSnapshot, OrderLedger, ResetLedger,
};

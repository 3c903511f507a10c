//! Ledger persistence boundary.
//!
//! The engine keeps the authoritative ledger in memory; stores only hold the
//! last committed snapshot so a session survives restarts.

pub mod in_memory;
pub mod json_file;
pub mod r#trait;

pub use in_memory::InMemoryLedgerStore;
pub use json_file::JsonFileLedgerStore;
pub use r#trait::{LedgerStore, StoreError};

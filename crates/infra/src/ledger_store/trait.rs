use std::path::PathBuf;

use thiserror::Error;

use voxledger_sales::LedgerSnapshot;

/// Ledger persistence error.
///
/// These are **infrastructure errors** (filesystem, encoding) as opposed to
/// domain errors. A snapshot that decodes fine but breaks the ledger invariant
/// is reported later, by `OrderLedger::from_snapshot`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot (de)serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Durable home of the session ledger.
///
/// The app saves after every mutating outcome and loads once at start-up.
pub trait LedgerStore: Send + Sync {
    /// Last saved snapshot, or `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<LedgerSnapshot>, StoreError>;

    /// Replace the saved snapshot.
    fn save(&self, snapshot: &LedgerSnapshot) -> Result<(), StoreError>;
}

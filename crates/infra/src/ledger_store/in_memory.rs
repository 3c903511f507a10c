use std::sync::RwLock;

use voxledger_sales::LedgerSnapshot;

use super::r#trait::{LedgerStore, StoreError};

/// In-memory ledger store.
///
/// Intended for tests/dev; nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    saved: RwLock<Option<LedgerSnapshot>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: LedgerSnapshot) -> Self {
        Self {
            saved: RwLock::new(Some(snapshot)),
        }
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn load(&self) -> Result<Option<LedgerSnapshot>, StoreError> {
        let saved = self
            .saved
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        Ok(saved.clone())
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> Result<(), StoreError> {
        let mut saved = self
            .saved
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        *saved = Some(snapshot.clone());
        Ok(())
    }
}

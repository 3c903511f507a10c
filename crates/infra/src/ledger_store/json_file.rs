use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use voxledger_sales::LedgerSnapshot;

use super::r#trait::{LedgerStore, StoreError};

/// Ledger snapshot kept as a single JSON document on disk.
///
/// Writes go to a sibling temp file that is then renamed over the target, so
/// a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonFileLedgerStore {
    path: PathBuf,
}

impl JsonFileLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl LedgerStore for JsonFileLedgerStore {
    fn load(&self) -> Result<Option<LedgerSnapshot>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved ledger");
                return Ok(None);
            }
            Err(err) => return Err(Self::io_error(&self.path, err)),
        };

        let snapshot: LedgerSnapshot = serde_json::from_slice(&bytes)?;
        debug!(
            path = %self.path.display(),
            entries = snapshot.entries.len(),
            total = snapshot.total.amount(),
            "loaded saved ledger"
        );
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Self::io_error(parent, e))?;
        }

        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.temp_path();
        fs::write(&tmp, bytes).map_err(|e| Self::io_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| Self::io_error(&self.path, e))?;
        Ok(())
    }
}

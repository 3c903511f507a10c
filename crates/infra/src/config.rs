//! Process configuration from environment variables.

use std::path::PathBuf;

use tracing::warn;

pub use voxledger_observability::LogFormat;

pub const STATE_PATH_VAR: &str = "VOXLEDGER_STATE_PATH";
pub const CATALOG_PATH_VAR: &str = "VOXLEDGER_CATALOG_PATH";
pub const LOG_FORMAT_VAR: &str = "VOXLEDGER_LOG_FORMAT";

const DEFAULT_STATE_PATH: &str = "voxledger-state.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Where the ledger snapshot is saved.
    pub state_path: PathBuf,
    /// Catalog JSON file; `None` selects the built-in catalog.
    pub catalog_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (tests pass a map instead of the process env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let state_path = match lookup(STATE_PATH_VAR).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_STATE_PATH),
        };

        let catalog_path = lookup(CATALOG_PATH_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let log_format = match lookup(LOG_FORMAT_VAR).as_deref().map(str::trim) {
            None | Some("") | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                warn!(var = LOG_FORMAT_VAR, value = other, "unknown log format; using pretty");
                LogFormat::Pretty
            }
        };

        Self {
            state_path,
            catalog_path,
            log_format,
        }
    }
}

//! Infrastructure layer: ledger persistence, catalog files, configuration.

pub mod catalog_source;
pub mod config;
pub mod ledger_store;

pub use catalog_source::{CatalogLoadError, load_catalog_file, parse_catalog, resolve_catalog};
pub use config::{AppConfig, LogFormat};
pub use ledger_store::{InMemoryLedgerStore, JsonFileLedgerStore, LedgerStore, StoreError};

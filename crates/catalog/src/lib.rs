//! Product catalog (read-only per session).
//!
//! Holds the priced product list handed in by the caller and resolves spoken
//! product phrases against it. No IO: fetching and file loading live in
//! `voxledger-infra`.

pub mod catalog;
pub mod defaults;
pub mod entry;
pub mod provider;

pub use catalog::{Catalog, CatalogMatch, MatchKind};
pub use entry::{CatalogEntry, comparison_key};
pub use provider::{CatalogProvider, SharedCatalog};

//! Catalog loading from a JSON file (`[{"name": "pan", "price": 50}, ...]`).

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use voxledger_catalog::Catalog;

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("cannot read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse a catalog document already in memory.
pub fn parse_catalog(json: &str) -> Result<Catalog, serde_json::Error> {
    serde_json::from_str(json)
}

/// Read and validate a catalog file. Every entry must have a non-empty name
/// and a positive whole price, otherwise the whole file is rejected.
pub fn load_catalog_file(path: &Path) -> Result<Catalog, CatalogLoadError> {
    let json = fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&json).map_err(|source| CatalogLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), products = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Catalog file when configured, built-in table otherwise.
pub fn resolve_catalog(path: Option<&Path>) -> Result<Catalog, CatalogLoadError> {
    match path {
        Some(path) => load_catalog_file(path),
        None => {
            info!("using built-in catalog");
            Ok(Catalog::default_almacen())
        }
    }
}

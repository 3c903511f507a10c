use anyhow::Context;
use tokio::io::BufReader;
use tokio::sync::mpsc;

use voxledger_app::{Session, capture_lines};
use voxledger_infra::{AppConfig, JsonFileLedgerStore, resolve_catalog};

const CAPTURE_BUFFER: usize = 32;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    voxledger_observability::init(config.log_format);

    let catalog = resolve_catalog(config.catalog_path.as_deref())
        .context("failed to load product catalog")?;
    tracing::info!(products = catalog.len(), state = %config.state_path.display(), "starting session");

    let store = JsonFileLedgerStore::new(config.state_path.clone());
    let session = Session::restore(std::sync::Arc::new(catalog), store);

    let (tx, rx) = mpsc::channel(CAPTURE_BUFFER);
    let capture = tokio::spawn(capture_lines(BufReader::new(tokio::io::stdin()), tx));

    let session = session
        .run(rx, tokio::io::stdout())
        .await
        .context("failed to write feedback")?;

    capture
        .await
        .context("capture task panicked")?
        .context("failed to read capture input")?;

    tracing::info!(total = %session.snapshot().total, "session closed");
    Ok(())
}

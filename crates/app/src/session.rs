//! The sale session: one interpreter, one store, events consumed in arrival order.

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{info, warn};

use voxledger_catalog::CatalogProvider;
use voxledger_infra::LedgerStore;
use voxledger_interpreter::{CommandInterpreter, Outcome};
use voxledger_sales::LedgerSnapshot;

use crate::capture::CaptureEvent;

/// What the presentation layer shows for one capture event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    /// Text to speak, if any.
    pub announcement: Option<String>,
    pub is_error: bool,
}

impl From<&Outcome> for Feedback {
    fn from(outcome: &Outcome) -> Self {
        Self {
            text: outcome.feedback(),
            announcement: outcome.announcement(),
            is_error: outcome.is_error(),
        }
    }
}

pub struct Session<P, S> {
    interpreter: CommandInterpreter<P>,
    store: S,
}

impl<P, S> Session<P, S>
where
    P: CatalogProvider,
    S: LedgerStore,
{
    /// Open a session, restoring the last saved ledger.
    ///
    /// Unreadable or inconsistent state is logged and the session starts empty.
    pub fn restore(catalog: P, store: S) -> Self {
        let mut interpreter = CommandInterpreter::new(catalog);

        match store.load() {
            Ok(Some(snapshot)) => {
                let entries = snapshot.item_count();
                match interpreter.initialize(snapshot) {
                    Ok(()) => info!(entries, "ledger restored"),
                    Err(err) => warn!(error = %err, "saved ledger rejected; starting empty"),
                }
            }
            Ok(None) => info!("no saved ledger; starting empty"),
            Err(err) => warn!(error = %err, "cannot load saved ledger; starting empty"),
        }

        Self { interpreter, store }
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.interpreter.snapshot()
    }

    /// Process one capture event to completion, persisting any ledger change.
    pub fn handle(&mut self, event: CaptureEvent) -> Feedback {
        match event {
            CaptureEvent::Transcript(utterance) => {
                let outcome = self.interpreter.interpret(&utterance);
                if outcome.mutates_ledger() {
                    self.persist();
                }
                Feedback::from(&outcome)
            }
            CaptureEvent::Failed(err) => {
                warn!(?err, "speech capture failed");
                Feedback {
                    text: err.to_string(),
                    announcement: None,
                    is_error: true,
                }
            }
        }
    }

    // Save failures never undo the in-memory change.
    fn persist(&self) {
        if let Err(err) = self.store.save(&self.interpreter.snapshot()) {
            warn!(error = %err, "failed to persist ledger");
        }
    }

    /// Drain `events` in order, writing feedback lines to `out`.
    pub async fn run<W>(mut self, mut events: mpsc::Receiver<CaptureEvent>, mut out: W) -> std::io::Result<Self>
    where
        W: AsyncWrite + Unpin,
    {
        while let Some(event) = events.recv().await {
            let feedback = self.handle(event);
            let mut line = feedback.text;
            if let Some(spoken) = feedback.announcement {
                line.push_str("\n  » ");
                line.push_str(&spoken);
            }
            line.push('\n');
            out.write_all(line.as_bytes()).await?;
            out.flush().await?;
        }
        Ok(self)
    }
}

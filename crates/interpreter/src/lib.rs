//! Command interpretation for spoken sale commands.
//!
//! Pipeline per utterance:
//!
//! ```text
//! utterance ─▶ classify ─▶ extract ─▶ normalize_product ─▶ Catalog::lookup ─▶ OrderLedger::append
//!                 │
//!                 ├─ total  ─▶ ledger snapshot
//!                 └─ reset  ─▶ OrderLedger::reset
//! ```
//!
//! Everything here is synchronous and free of IO; the only state is the
//! ledger owned by [`CommandInterpreter`].

pub mod classifier;
pub mod extractor;
pub mod interpreter;
pub mod normalizer;
pub mod outcome;

pub use classifier::{ClassifiedIntent, classify};
pub use extractor::{Extraction, Unit, extract};
pub use interpreter::CommandInterpreter;
pub use normalizer::normalize_product;
pub use outcome::Outcome;

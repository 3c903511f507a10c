//! Logging setup shared by the binaries.

/// Install the process-wide subscriber. Later calls are no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}

pub use tracing::LogFormat;

/// Subscriber construction (filter, writer, format).
pub mod tracing;

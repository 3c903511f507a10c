//! Console shell around the interpreter: capture events in, feedback out.

pub mod capture;
pub mod session;

pub use capture::{CaptureError, CaptureEvent, capture_lines, parse_line};
pub use session::{Feedback, Session};

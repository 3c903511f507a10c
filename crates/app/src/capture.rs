//! Speech-capture boundary.
//!
//! The real recognizer lives outside this repository; here a line-oriented
//! reader stands in for it. Each non-blank line is one transcribed utterance,
//! and a line starting with `!` reports a recognizer error code
//! (`!no-speech`).

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::debug;

/// Error codes reported by the speech recognizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptureError {
    NoSpeech,
    AudioCapture,
    NotAllowed,
    Aborted,
    Network,
    LanguageNotSupported,
    Unknown(String),
}

impl CaptureError {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "no-speech" => CaptureError::NoSpeech,
            "audio-capture" => CaptureError::AudioCapture,
            "not-allowed" => CaptureError::NotAllowed,
            "aborted" => CaptureError::Aborted,
            "network" => CaptureError::Network,
            "language-not-supported" => CaptureError::LanguageNotSupported,
            other => CaptureError::Unknown(other.to_string()),
        }
    }

    /// User-facing Spanish description.
    pub fn message(&self) -> &'static str {
        match self {
            CaptureError::NoSpeech => "No se detectó voz",
            CaptureError::AudioCapture => "No se pudo capturar audio",
            CaptureError::NotAllowed => "Permiso denegado",
            CaptureError::Aborted => "Reconocimiento abortado",
            CaptureError::Network => "Error de red",
            CaptureError::LanguageNotSupported => "Idioma no soportado",
            CaptureError::Unknown(_) => "Error desconocido",
        }
    }
}

impl core::fmt::Display for CaptureError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Error: {}", self.message())
    }
}

/// One delivery from the recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Lower-cased, trimmed transcript.
    Transcript(String),
    Failed(CaptureError),
}

/// Turn one input line into an event; blank lines yield nothing.
pub fn parse_line(line: &str) -> Option<CaptureEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match line.strip_prefix('!') {
        Some(code) => Some(CaptureEvent::Failed(CaptureError::from_code(code))),
        None => Some(CaptureEvent::Transcript(line.to_lowercase())),
    }
}

/// Feed every line of `reader` into `tx`, in order, until EOF or until the
/// receiving side is gone.
pub async fn capture_lines<R>(reader: R, tx: mpsc::Sender<CaptureEvent>) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let Some(event) = parse_line(&line) else {
            continue;
        };
        if tx.send(event).await.is_err() {
            debug!("session closed; stopping capture");
            break;
        }
    }
    Ok(())
}

//! Progress event channel
//!
//! The crawl reports its status through a one-way, append-only stream of
//! typed events. The crawl side holds a [`ProgressSink`] and never blocks
//! on the observer; if the observer disconnects, further events are
//! discarded harmlessly. The observer side consumes events as UTF-8 text
//! lines and must treat the `DONE` sentinel as the unambiguous end of the
//! stream.

use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// One progress event emitted during a crawl session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Informational status message
    Status(String),

    /// Non-fatal condition worth surfacing
    Warning(String),

    /// Failure condition (page-scoped or overall)
    Error(String),

    /// No-op emitted on an idle timer to signal liveness
    Keepalive,

    /// Terminal sentinel; nothing follows
    Done,
}

impl ProgressEvent {
    /// Renders the event as one wire line
    pub fn as_line(&self) -> String {
        match self {
            ProgressEvent::Status(message) => message.clone(),
            ProgressEvent::Warning(message) => format!("WARNING: {}", message),
            ProgressEvent::Error(message) => format!("ERROR: {}", message),
            ProgressEvent::Keepalive => "...".to_string(),
            ProgressEvent::Done => "DONE".to_string(),
        }
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_line())
    }
}

/// Write half of the progress channel, held by the crawl
///
/// Cloneable; every clone feeds the same observer. All emit methods are
/// non-blocking and infallible from the crawl's point of view.
#[derive(Debug, Clone)]
pub struct ProgressSink {
    tx: Option<UnboundedSender<ProgressEvent>>,
}

impl ProgressSink {
    /// Creates a connected sink/receiver pair
    pub fn channel() -> (Self, UnboundedReceiver<ProgressEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// Creates a sink that discards every event (useful in tests)
    pub fn discard() -> Self {
        Self { tx: None }
    }

    /// Emits an event; a disconnected observer is not an error
    pub fn emit(&self, event: ProgressEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }

    pub fn status(&self, message: impl Into<String>) {
        self.emit(ProgressEvent::Status(message.into()));
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.emit(ProgressEvent::Warning(message.into()));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(ProgressEvent::Error(message.into()));
    }

    pub fn done(&self) {
        self.emit(ProgressEvent::Done);
    }
}

/// Forwards events to a writer as wire lines until `DONE` or disconnect
///
/// Emits a keepalive line after `idle` with no traffic, so an observer
/// applying its own idle timeout can tell "still working" apart from
/// "gone". The crawl never waits on this side.
pub async fn relay<W: std::io::Write>(
    mut rx: UnboundedReceiver<ProgressEvent>,
    idle: Duration,
    writer: &mut W,
) -> std::io::Result<()> {
    loop {
        match tokio::time::timeout(idle, rx.recv()).await {
            Ok(Some(event)) => {
                writeln!(writer, "{}", event)?;
                if event == ProgressEvent::Done {
                    return Ok(());
                }
            }
            // Sender dropped without DONE; stream is over regardless
            Ok(None) => return Ok(()),
            Err(_) => {
                writeln!(writer, "{}", ProgressEvent::Keepalive)?;
            }
        }
    }
}

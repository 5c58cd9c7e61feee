//! Scan event queue
//!
//! The decoder delivers detections from its own callback context; they are
//! pushed onto a bounded channel and the session consumes them one at a time.
//! Duplicate decode events are not debounced: two events for the same code
//! add quantity 2 through the cart's merge rule.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

/// One raw decode event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    /// Untrusted decoder output, not yet normalized
    pub raw: String,
    pub received_at: DateTime<Utc>,
}

impl ScanEvent {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            received_at: Utc::now(),
        }
    }
}

/// Create a bounded scan queue
pub fn scan_channel(capacity: usize) -> (ScanSender, ScanReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (ScanSender { tx }, ScanReceiver { rx })
}

/// Decoder-side handle
#[derive(Debug, Clone)]
pub struct ScanSender {
    tx: mpsc::Sender<ScanEvent>,
}

impl ScanSender {
    /// Non-blocking push for decoder callbacks
    ///
    /// Returns false when the queue is full or the session has closed; the
    /// event is dropped in both cases.
    pub fn push(&self, raw: impl Into<String>) -> bool {
        match self.tx.try_send(ScanEvent::new(raw)) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(raw = %event.raw, "scan queue full, dropping decode event");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// Push, waiting for queue space
    pub async fn send(&self, raw: impl Into<String>) -> bool {
        self.tx.send(ScanEvent::new(raw)).await.is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Session-side handle
#[derive(Debug)]
pub struct ScanReceiver {
    rx: mpsc::Receiver<ScanEvent>,
}

impl ScanReceiver {
    /// Wait for the next event; `None` once every sender is gone
    pub async fn next(&mut self) -> Option<ScanEvent> {
        self.rx.recv().await
    }

    /// Next already-queued event, if any
    pub fn try_next(&mut self) -> Option<ScanEvent> {
        self.rx.try_recv().ok()
    }

    /// Stop accepting events; queued ones can still be read
    pub fn close(&mut self) {
        self.rx.close();
    }
}

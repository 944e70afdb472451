use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use super::TrackerEvent;

/// Envelope wrapping a tracker event with metadata
#[derive(Debug, Clone)]
pub struct TrackerEventEnvelope {
    pub timestamp: DateTime<Utc>,
    pub event: TrackerEvent,
}

/// Handle for emitting tracker events
///
/// This is cheaply cloneable and can be shared across tasks.
#[derive(Debug, Clone)]
pub struct EventHandle {
    tx: mpsc::Sender<TrackerEventEnvelope>,
}

impl EventHandle {
    /// Create a new event handle from a channel sender
    pub fn new(tx: mpsc::Sender<TrackerEventEnvelope>) -> Self {
        Self { tx }
    }

    /// Emit an event without blocking
    ///
    /// Returns true if the event was queued. A full or closed channel drops
    /// the event.
    pub fn emit(&self, event: TrackerEvent) -> bool {
        let envelope = TrackerEventEnvelope {
            timestamp: Utc::now(),
            event,
        };
        match self.tx.try_send(envelope) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(envelope)) => {
                tracing::warn!("Event channel full, dropping {:?}", envelope.event);
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!("Event channel closed, dropping event");
                false
            }
        }
    }
}

/// Create an event handle and the receiver a presentation layer drains.
pub fn create_event_channel(
    buffer_size: usize,
) -> (EventHandle, mpsc::Receiver<TrackerEventEnvelope>) {
    let (tx, rx) = mpsc::channel(buffer_size.max(1));
    (EventHandle::new(tx), rx)
}

/// Emit through an optional handle.
pub(crate) fn emit(events: &Option<EventHandle>, event: TrackerEvent) {
    if let Some(handle) = events {
        handle.emit(event);
    }
}

use std::sync::{Arc, Mutex, MutexGuard};

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::StreamExt;

use crate::stream::{CompletionExt, OnCompletion};

struct GateState {
    value: i64,
    subscribers: Vec<mpsc::UnboundedSender<i64>>,
    writer_dropped: bool,
}

struct Shared {
    state: Mutex<GateState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Read side of the gate counter. Cheap to clone.
#[derive(Clone)]
pub struct GateCounter {
    shared: Arc<Shared>,
}

/// Write side of the gate counter. There is exactly one per counter.
///
/// Dropping the writer ends every subscription.
pub struct GateWriter {
    shared: Arc<Shared>,
}

impl GateCounter {
    /// Create a counter starting at `initial`.
    pub fn new(initial: i64) -> (GateWriter, GateCounter) {
        let shared = Arc::new(Shared {
            state: Mutex::new(GateState {
                value: initial,
                subscribers: Vec::new(),
                writer_dropped: false,
            }),
        });
        (
            GateWriter {
                shared: Arc::clone(&shared),
            },
            GateCounter { shared },
        )
    }

    pub fn value(&self) -> i64 {
        self.shared.lock().value
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        let mut state = self.shared.lock();
        state.subscribers.retain(|tx| !tx.is_closed());
        state.subscribers.len()
    }

    /// Every value from now on, starting with the current one.
    ///
    /// Ends when the writer is dropped.
    pub fn updates(&self) -> impl Stream<Item = i64> + Send + Unpin + 'static {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.shared.lock();
        // Queue the current value under the lock so no set() can slip in between.
        if tx.send(state.value).is_ok() && !state.writer_dropped {
            state.subscribers.push(tx);
        }
        UnboundedReceiverStream::new(rx)
    }

    /// Positive values from now on. Ends at the first value <= 0, which is not
    /// yielded.
    pub fn subscribe(&self) -> impl Stream<Item = i64> + Send + Unpin + 'static {
        self.updates().take_while(|count| *count > 0)
    }

    /// Like [`subscribe`](Self::subscribe), running `hook` exactly once when
    /// the subscription stops.
    pub fn subscribe_with<F>(
        &self,
        hook: F,
    ) -> OnCompletion<impl Stream<Item = i64> + Send + Unpin + 'static, F>
    where
        F: FnOnce() + Send + Unpin + 'static,
    {
        self.subscribe().on_completion(hook)
    }
}

impl std::fmt::Debug for GateCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateCounter")
            .field("value", &self.value())
            .finish()
    }
}

impl GateWriter {
    pub fn value(&self) -> i64 {
        self.shared.lock().value
    }

    /// Overwrite the value and notify every subscriber, in call order.
    pub fn set(&mut self, value: i64) {
        let mut state = self.shared.lock();
        state.value = value;
        state.subscribers.retain(|tx| tx.send(value).is_ok());
    }

    /// Decrement by one and return the new value.
    pub fn decrement(&mut self) -> i64 {
        let value = self.value() - 1;
        self.set(value);
        value
    }
}

impl Drop for GateWriter {
    fn drop(&mut self) {
        let mut state = self.shared.lock();
        state.writer_dropped = true;
        state.subscribers.clear();
    }
}

impl std::fmt::Debug for GateWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateWriter")
            .field("value", &self.value())
            .finish()
    }
}

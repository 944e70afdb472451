//! Worker pool implementation.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::events::{self, EventHandle, TrackerEvent};
use crate::fetcher::ParallelFetcher;
use crate::flight::FlightStatus;

use super::types::PoolError;

/// Capacity of the passenger-name work queue. Kept minimal so the producer
/// only runs ahead of the workers by one name.
const WORK_QUEUE_CAPACITY: usize = 1;

const DEFAULT_RESULT_BUFFER: usize = 16;

/// Fixed-size pool of fetch workers.
pub struct WorkerPool {
    fetcher: Arc<ParallelFetcher>,
    worker_count: usize,
    result_buffer: usize,
    events: Option<EventHandle>,
}

impl WorkerPool {
    /// Creates a pool with `worker_count` workers.
    pub fn new(fetcher: Arc<ParallelFetcher>, worker_count: usize) -> Self {
        Self {
            fetcher,
            worker_count,
            result_buffer: DEFAULT_RESULT_BUFFER,
            events: None,
        }
    }

    /// Sets the capacity of the result queue.
    pub fn with_result_buffer(mut self, result_buffer: usize) -> Self {
        self.result_buffer = result_buffer.max(1);
        self
    }

    /// Sets the event handle for fetch notifications.
    pub fn with_events(mut self, events: EventHandle) -> Self {
        self.events = Some(events);
        self
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Fetches the flight of every passenger.
    ///
    /// Results come back in completion order, not submission order. The first
    /// failing fetch aborts every other task and discards collected results.
    pub async fn fetch_all(
        &self,
        passenger_names: Vec<String>,
        cancel: &CancellationToken,
    ) -> Result<Vec<FlightStatus>, PoolError> {
        if self.worker_count == 0 {
            return Err(PoolError::NoWorkers);
        }
        if cancel.is_cancelled() {
            return Err(PoolError::Cancelled);
        }

        let expected = passenger_names.len();
        info!(
            passengers = expected,
            workers = self.worker_count,
            "Fetching flights"
        );

        let (work_tx, work_rx) = mpsc::channel::<String>(WORK_QUEUE_CAPACITY);
        let (result_tx, mut result_rx) = mpsc::channel::<FlightStatus>(self.result_buffer);
        let work_rx = Arc::new(Mutex::new(work_rx));

        let mut tasks: JoinSet<Result<(), PoolError>> = JoinSet::new();
        tasks.spawn(produce(passenger_names, work_tx));
        for worker_id in 0..self.worker_count {
            tasks.spawn(run_worker(
                worker_id,
                Arc::clone(&self.fetcher),
                Arc::clone(&work_rx),
                result_tx.clone(),
                self.events.clone(),
            ));
        }
        // Workers hold the only senders now; the queue closes when they finish.
        drop(result_tx);

        let mut flights = Vec::with_capacity(expected);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    warn!("Flight fetch cancelled");
                    tasks.shutdown().await;
                    return Err(PoolError::Cancelled);
                }
                Some(joined) = tasks.join_next() => {
                    if let Err(e) = task_result(joined) {
                        tasks.shutdown().await;
                        return Err(e);
                    }
                }
                received = result_rx.recv() => match received {
                    Some(flight) => flights.push(flight),
                    None => break,
                },
            }
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = task_result(joined) {
                tasks.shutdown().await;
                return Err(e);
            }
        }

        info!(fetched = flights.len(), "All flights fetched");
        Ok(flights)
    }
}

fn task_result(joined: Result<Result<(), PoolError>, JoinError>) -> Result<(), PoolError> {
    match joined {
        Ok(result) => result,
        Err(e) => Err(PoolError::TaskFailed(e.to_string())),
    }
}

/// Queue every name in order; dropping the sender marks the end of input.
async fn produce(passenger_names: Vec<String>, work_tx: mpsc::Sender<String>) -> Result<(), PoolError> {
    for passenger in passenger_names {
        if work_tx.send(passenger).await.is_err() {
            debug!("All workers gone, stopping producer");
            break;
        }
    }
    debug!("All passengers queued");
    Ok(())
}

async fn run_worker(
    worker_id: usize,
    fetcher: Arc<ParallelFetcher>,
    work_rx: Arc<Mutex<mpsc::Receiver<String>>>,
    result_tx: mpsc::Sender<FlightStatus>,
    events: Option<EventHandle>,
) -> Result<(), PoolError> {
    debug!(worker_id, "Fetch worker started");

    loop {
        let passenger = {
            let mut rx = work_rx.lock().await;
            rx.recv().await
        };
        let Some(passenger) = passenger else {
            break;
        };

        let flight = match fetcher.fetch(&passenger).await {
            Ok(flight) => flight,
            Err(source) => {
                warn!(worker_id, passenger = %passenger, "Fetch failed: {}", source);
                return Err(PoolError::Fetch { passenger, source });
            }
        };

        info!(worker_id, "Fetched flight: {}", flight);
        events::emit(
            &events,
            TrackerEvent::FlightFetched {
                passenger: flight.passenger_name().to_string(),
                flight_number: flight.flight_number().to_string(),
                worker_id,
            },
        );

        if result_tx.send(flight).await.is_err() {
            break;
        }
    }

    debug!(worker_id, "Fetch worker finished");
    Ok(())
}

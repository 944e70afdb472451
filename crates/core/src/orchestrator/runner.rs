//! Flight tracker implementation.

use std::sync::Arc;

use futures::{Stream, StreamExt};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::TrackerConfig;
use crate::countdown::{boarding_message, FlightCountdown};
use crate::events::{self, EventHandle, TrackerEvent};
use crate::fetcher::ParallelFetcher;
use crate::flight::FlightStatus;
use crate::gate::{GateCounter, GateWriter};
use crate::pool::{PoolError, WorkerPool};
use crate::source::FlightDataSource;
use crate::stream::CompletionExt;

use super::types::{FlightOutcome, TrackedFlight, TrackerError, TrackingReport};

/// What each tracking task hands back when it finishes.
enum TaskOutcome {
    GateDrained(Vec<i64>),
    CountdownsFinished(Vec<TrackedFlight>),
}

/// The flight tracker - fetches flights, then watches each until departure.
pub struct FlightTracker {
    config: TrackerConfig,
    source: Arc<dyn FlightDataSource>,
    countdown: FlightCountdown,
    events: Option<EventHandle>,
}

impl FlightTracker {
    /// Create a new tracker over the given source.
    pub fn new(config: TrackerConfig, source: Arc<dyn FlightDataSource>) -> Self {
        let countdown = FlightCountdown::new(
            config.tick_interval(),
            config.banned_passengers.iter().cloned(),
        );
        Self {
            config,
            source,
            countdown,
            events: None,
        }
    }

    /// Sets the event handle for presentation updates.
    pub fn with_events(mut self, events: EventHandle) -> Self {
        self.events = Some(events);
        self
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Fetch every configured passenger's flight, then track them all.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<TrackingReport, TrackerError> {
        info!("Getting the latest flight info...");
        let flights = self.fetch_flights(cancel).await?;

        let descriptions: Vec<String> = flights
            .iter()
            .map(|f| format!("{} ({})", f.passenger_name(), f.flight_number()))
            .collect();
        info!("Found flights for {}", descriptions.join(", "));
        events::emit(
            &self.events,
            TrackerEvent::FlightsFound {
                flights: descriptions,
            },
        );

        self.track_flights(flights, cancel).await
    }

    /// Fetch every configured passenger's flight through the worker pool.
    pub async fn fetch_flights(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<FlightStatus>, TrackerError> {
        let mut fetcher = ParallelFetcher::new(Arc::clone(&self.source), self.config.settle_delay());
        if let Some(ref handle) = self.events {
            fetcher = fetcher.with_events(handle.clone());
        }

        let mut pool = WorkerPool::new(Arc::new(fetcher), self.config.worker_count)
            .with_result_buffer(self.config.result_buffer);
        if let Some(ref handle) = self.events {
            pool = pool.with_events(handle.clone());
        }

        match pool.fetch_all(self.config.passengers.clone(), cancel).await {
            Ok(flights) => Ok(flights),
            Err(PoolError::Cancelled) => Err(TrackerError::Cancelled),
            Err(e) => {
                error!("Failed to fetch flights: {}", e);
                Err(e.into())
            }
        }
    }

    /// Track already-fetched flights.
    ///
    /// A gate reporter and a countdown driver run concurrently; the driver
    /// watches one flight at a time and is the only writer of the gate.
    pub async fn track_flights(
        &self,
        flights: Vec<FlightStatus>,
        cancel: &CancellationToken,
    ) -> Result<TrackingReport, TrackerError> {
        let (writer, gate) = GateCounter::new(flights.len() as i64);

        // Subscribe before the driver starts so the first count is never missed.
        let hook_events = self.events.clone();
        let subscription = gate.subscribe_with(move || {
            info!("Finished tracking all flights");
            events::emit(&hook_events, TrackerEvent::AllFlightsFinished);
        });

        let mut tasks: JoinSet<Result<TaskOutcome, TrackerError>> = JoinSet::new();
        tasks.spawn(report_gate(subscription, self.events.clone()));
        tasks.spawn(drive_countdowns(
            flights,
            self.countdown.clone(),
            writer,
            self.events.clone(),
        ));

        let mut report = TrackingReport::default();
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    warn!("Flight tracking cancelled");
                    tasks.shutdown().await;
                    return Err(TrackerError::Cancelled);
                }
                joined = tasks.join_next() => match joined {
                    None => break,
                    Some(Ok(Ok(TaskOutcome::GateDrained(counts)))) => report.gate_counts = counts,
                    Some(Ok(Ok(TaskOutcome::CountdownsFinished(flights)))) => report.flights = flights,
                    Some(Ok(Err(e))) => {
                        tasks.shutdown().await;
                        return Err(e);
                    }
                    Some(Err(e)) => {
                        tasks.shutdown().await;
                        return Err(TrackerError::TaskFailed(e.to_string()));
                    }
                },
            }
        }

        Ok(report)
    }
}

async fn report_gate<S>(
    mut subscription: S,
    events: Option<EventHandle>,
) -> Result<TaskOutcome, TrackerError>
where
    S: Stream<Item = i64> + Unpin,
{
    let mut observed = Vec::new();
    while let Some(count) = subscription.next().await {
        info!("There are {} flights being tracked", count);
        events::emit(&events, TrackerEvent::FlightsRemaining { count });
        observed.push(count);
    }
    Ok(TaskOutcome::GateDrained(observed))
}

async fn drive_countdowns(
    flights: Vec<FlightStatus>,
    countdown: FlightCountdown,
    mut writer: GateWriter,
    events: Option<EventHandle>,
) -> Result<TaskOutcome, TrackerError> {
    let mut tracked = Vec::with_capacity(flights.len());
    for flight in flights {
        tracked.push(watch_flight(&countdown, flight, &events).await);
        // Exactly one decrement per flight, even when tracking was refused.
        let remaining = writer.decrement();
        debug!(remaining, "Flight left the gate");
    }
    Ok(TaskOutcome::CountdownsFinished(tracked))
}

async fn watch_flight(
    countdown: &FlightCountdown,
    flight: FlightStatus,
    events: &Option<EventHandle>,
) -> TrackedFlight {
    let passenger = flight.passenger_name().to_string();
    let flight_number = flight.flight_number().to_string();
    events::emit(
        events,
        TrackerEvent::TrackingStarted {
            passenger: passenger.clone(),
        },
    );

    let hook_events = events.clone();
    let hook_passenger = passenger.clone();
    let mut updates = countdown.watch(flight.clone()).on_completion(move || {
        info!("Finished tracking {}'s flight", hook_passenger);
        events::emit(
            &hook_events,
            TrackerEvent::TrackingFinished {
                passenger: hook_passenger,
            },
        );
    });

    let mut last = flight;
    let mut count = 0;
    let mut rejected = None;
    while let Some(update) = updates.next().await {
        match update {
            Ok(status) => {
                let message = boarding_message(&status);
                info!("{}: {}", passenger, message);
                events::emit(
                    events,
                    TrackerEvent::BoardingUpdate {
                        passenger: passenger.clone(),
                        boarding_status: status.boarding_status(),
                        departure_time_in_minutes: status.departure_time_in_minutes(),
                        message,
                    },
                );
                count += 1;
                last = status;
            }
            Err(e) => {
                error!(passenger = %passenger, "{}", e);
                events::emit(
                    events,
                    TrackerEvent::TrackingFailed {
                        passenger: passenger.clone(),
                        reason: e.to_string(),
                    },
                );
                rejected = Some(e.to_string());
            }
        }
    }

    let outcome = match rejected {
        Some(reason) => FlightOutcome::Rejected { reason },
        None if last.is_flight_canceled() => FlightOutcome::Canceled,
        None => FlightOutcome::Departed,
    };

    TrackedFlight {
        passenger,
        flight_number,
        updates: count,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::create_event_channel;
    use crate::testing::{fixtures, MockFlightDataSource};
    use std::time::Duration;

    fn config() -> TrackerConfig {
        TrackerConfig {
            passengers: vec!["Madrigal".to_string(), "Polarcubis".to_string()],
            worker_count: 2,
            banned_passengers: vec!["Nogartse".to_string()],
            settle_delay_ms: 10,
            tick_interval_ms: 5,
            result_buffer: 4,
        }
    }

    fn tracker() -> FlightTracker {
        FlightTracker::new(config(), Arc::new(MockFlightDataSource::new()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_gate_counts_down_to_zero() {
        let flights = vec![
            fixtures::flight("Madrigal", 2),
            fixtures::flight("Polarcubis", 0),
            fixtures::flight("Estragon", 1),
        ];

        let report = tracker()
            .track_flights(flights, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.gate_counts, vec![3, 2, 1]);
        let updates: Vec<usize> = report.flights.iter().map(|f| f.updates).collect();
        assert_eq!(updates, vec![3, 1, 2]);
        assert!(report
            .flights
            .iter()
            .all(|f| f.outcome == FlightOutcome::Departed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_banned_passenger_still_decrements_gate() {
        let flights = vec![
            fixtures::flight("Nogartse", 5),
            fixtures::flight("Madrigal", 1),
        ];

        let report = tracker()
            .track_flights(flights, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.gate_counts, vec![2, 1]);
        assert_eq!(report.flights[0].updates, 0);
        assert_eq!(
            report.flights[0].outcome,
            FlightOutcome::Rejected {
                reason: "Cannot track Nogartse's flight. They are banned from the airport."
                    .to_string()
            }
        );
        assert_eq!(report.flights[1].outcome, FlightOutcome::Departed);
        assert_eq!(report.rejected().count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_canceled_flight_outcome() {
        let report = tracker()
            .track_flights(
                vec![fixtures::canceled_flight("Taernyl", 30)],
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(report.flights[0].outcome, FlightOutcome::Canceled);
        assert_eq!(report.flights[0].updates, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_flights() {
        let report = tracker()
            .track_flights(Vec::new(), &CancellationToken::new())
            .await
            .unwrap();
        assert!(report.flights.is_empty());
        assert!(report.gate_counts.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdowns_run_sequentially() {
        let (handle, mut rx) = create_event_channel(256);
        let flights = vec![
            fixtures::flight("Madrigal", 2),
            fixtures::flight("Polarcubis", 2),
        ];

        tracker()
            .with_events(handle)
            .track_flights(flights, &CancellationToken::new())
            .await
            .unwrap();

        let mut lifecycle = Vec::new();
        while let Ok(envelope) = rx.try_recv() {
            match envelope.event {
                TrackerEvent::TrackingStarted { passenger } => {
                    lifecycle.push(format!("start {}", passenger))
                }
                TrackerEvent::TrackingFinished { passenger } => {
                    lifecycle.push(format!("finish {}", passenger))
                }
                _ => {}
            }
        }
        assert_eq!(
            lifecycle,
            vec![
                "start Madrigal",
                "finish Madrigal",
                "start Polarcubis",
                "finish Polarcubis"
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_tracking() {
        let cancel = CancellationToken::new();
        let canceller = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                cancel.cancel();
            })
        };

        let result = tracker()
            .track_flights(vec![fixtures::flight("Madrigal", 10_000)], &cancel)
            .await;
        canceller.await.unwrap();

        assert!(matches!(result, Err(TrackerError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_surfaces_as_pool_error() {
        let source = Arc::new(MockFlightDataSource::new());
        source.set_flight("Polarcubis", "not,a,flight").await;

        let tracker = FlightTracker::new(config(), source);
        let err = tracker.run(&CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, TrackerError::Pool(PoolError::Fetch { .. })));
    }
}

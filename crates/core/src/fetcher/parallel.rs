//! Parallel fetcher implementation.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::events::{self, EventHandle, TrackerEvent};
use crate::flight::{FlightStatus, ParseError};
use crate::source::{DataSourceError, FlightDataSource, SourceKind};

/// Errors that can occur while fetching one passenger's flight.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Fetches and merges both upstream payloads for a passenger.
pub struct ParallelFetcher {
    source: Arc<dyn FlightDataSource>,
    settle_delay: Duration,
    events: Option<EventHandle>,
}

impl ParallelFetcher {
    /// Creates a new fetcher over the given source.
    pub fn new(source: Arc<dyn FlightDataSource>, settle_delay: Duration) -> Self {
        Self {
            source,
            settle_delay,
            events: None,
        }
    }

    /// Sets the event handle for progress notifications.
    pub fn with_events(mut self, events: EventHandle) -> Self {
        self.events = Some(events);
        self
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Fetches a passenger's flight.
    ///
    /// Both requests run concurrently with the settle delay. The first failure
    /// drops the other request and fails the whole fetch.
    pub async fn fetch(&self, passenger_name: &str) -> Result<FlightStatus, FetchError> {
        let settle = async {
            tokio::time::sleep(self.settle_delay).await;
            Ok::<(), DataSourceError>(())
        };

        let (flight_payload, loyalty_payload, ()) = tokio::try_join!(
            self.fetch_payload(SourceKind::FlightInfo, passenger_name),
            self.fetch_payload(SourceKind::LoyaltyInfo, passenger_name),
            settle,
        )?;

        let flight = FlightStatus::parse(passenger_name, &flight_payload, &loyalty_payload)?;
        Ok(flight)
    }

    async fn fetch_payload(
        &self,
        kind: SourceKind,
        passenger_name: &str,
    ) -> Result<String, DataSourceError> {
        debug!(passenger = passenger_name, source = self.source.name(), "Started fetching {}", kind);
        events::emit(
            &self.events,
            TrackerEvent::FetchStarted {
                passenger: passenger_name.to_string(),
                source: kind,
            },
        );

        let payload = self.source.fetch(kind, passenger_name).await?;

        debug!(passenger = passenger_name, source = self.source.name(), "Finished fetching {}", kind);
        events::emit(
            &self.events,
            TrackerEvent::FetchFinished {
                passenger: passenger_name.to_string(),
                source: kind,
            },
        );
        Ok(payload)
    }
}

//! Mock flight data source for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::source::{DataSourceError, FlightDataSource, SourceKind};

use super::fixtures;

/// A recorded source call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Passenger the call was made for.
    pub passenger: String,
    /// Which payload was requested.
    pub kind: SourceKind,
}

/// Mock implementation of the FlightDataSource trait.
///
/// Provides controllable behavior for testing:
/// - Per-passenger flight and loyalty payloads (with deterministic defaults)
/// - Injected failures per passenger and payload kind
/// - Artificial latency
/// - Call recording and peak concurrency tracking
///
/// # Example
///
/// ```rust,ignore
/// use flightwatch_core::testing::MockFlightDataSource;
///
/// let source = MockFlightDataSource::new();
/// source.set_flight("Madrigal", "FW-6112,KSEA,KLAX,On Time,28").await;
/// source.set_loyalty("Madrigal", "Gold").await;
///
/// let payload = source.fetch_flight_info("Madrigal").await?;
/// assert_eq!(source.call_count().await, 1);
/// ```
#[derive(Debug, Default)]
pub struct MockFlightDataSource {
    /// Flight payloads by passenger.
    flights: Arc<RwLock<HashMap<String, String>>>,
    /// Loyalty payloads by passenger.
    loyalty: Arc<RwLock<HashMap<String, String>>>,
    /// Injected failures by passenger and payload kind.
    failures: Arc<RwLock<HashMap<(String, SourceKind), DataSourceError>>>,
    /// Latency applied to every call.
    delay: Arc<RwLock<Duration>>,
    /// Recorded calls, in arrival order.
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl MockFlightDataSource {
    /// Create a new mock source answering with default payloads.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flight payload for a passenger.
    pub async fn set_flight(&self, passenger: &str, payload: &str) {
        self.flights
            .write()
            .await
            .insert(passenger.to_string(), payload.to_string());
    }

    /// Set the loyalty payload for a passenger.
    pub async fn set_loyalty(&self, passenger: &str, payload: &str) {
        self.loyalty
            .write()
            .await
            .insert(passenger.to_string(), payload.to_string());
    }

    /// Make calls of the given kind fail for a passenger.
    pub async fn fail_passenger(&self, passenger: &str, kind: SourceKind, error: DataSourceError) {
        self.failures
            .write()
            .await
            .insert((passenger.to_string(), kind), error);
    }

    /// Clear injected failures.
    pub async fn clear_failures(&self) {
        self.failures.write().await.clear();
    }

    /// Set the latency applied to every call.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }

    /// Get recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Get the number of calls made.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Highest number of calls that were in progress at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    async fn respond(&self, kind: SourceKind, passenger: &str) -> Result<String, DataSourceError> {
        self.calls.write().await.push(RecordedCall {
            passenger: passenger.to_string(),
            kind,
        });

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = *self.delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(err) = self
            .failures
            .read()
            .await
            .get(&(passenger.to_string(), kind))
        {
            return Err(err.clone());
        }

        let payload = match kind {
            SourceKind::FlightInfo => self
                .flights
                .read()
                .await
                .get(passenger)
                .cloned()
                .unwrap_or_else(|| fixtures::default_flight_payload(passenger)),
            SourceKind::LoyaltyInfo => self
                .loyalty
                .read()
                .await
                .get(passenger)
                .cloned()
                .unwrap_or_else(|| fixtures::DEFAULT_LOYALTY_PAYLOAD.to_string()),
        };
        Ok(payload)
    }
}

#[async_trait]
impl FlightDataSource for MockFlightDataSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_flight_info(&self, passenger_name: &str) -> Result<String, DataSourceError> {
        self.respond(SourceKind::FlightInfo, passenger_name).await
    }

    async fn fetch_loyalty_info(&self, passenger_name: &str) -> Result<String, DataSourceError> {
        self.respond(SourceKind::LoyaltyInfo, passenger_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_payloads() {
        let source = MockFlightDataSource::new();
        let flight = source.fetch_flight_info("Madrigal").await.unwrap();
        let loyalty = source.fetch_loyalty_info("Madrigal").await.unwrap();

        assert_eq!(flight, fixtures::default_flight_payload("Madrigal"));
        assert_eq!(loyalty, "Gold");
        assert_eq!(
            source.recorded_calls().await,
            vec![
                RecordedCall {
                    passenger: "Madrigal".to_string(),
                    kind: SourceKind::FlightInfo
                },
                RecordedCall {
                    passenger: "Madrigal".to_string(),
                    kind: SourceKind::LoyaltyInfo
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_configured_payloads_and_failures() {
        let source = MockFlightDataSource::new();
        source.set_flight("Taernyl", "FW-9,A,B,Canceled,10").await;
        source
            .fail_passenger("Taernyl", SourceKind::LoyaltyInfo, DataSourceError::Timeout)
            .await;

        assert_eq!(
            source.fetch_flight_info("Taernyl").await.unwrap(),
            "FW-9,A,B,Canceled,10"
        );
        assert_eq!(
            source.fetch_loyalty_info("Taernyl").await,
            Err(DataSourceError::Timeout)
        );

        source.clear_failures().await;
        assert!(source.fetch_loyalty_info("Taernyl").await.is_ok());
    }
}

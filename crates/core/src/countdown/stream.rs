//! Countdown stream implementation.

use std::collections::HashSet;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use async_stream::try_stream;
use futures::{Stream, StreamExt};
use thiserror::Error;

use crate::flight::{BoardingState, FlightStatus};

/// Errors raised while watching a flight.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CountdownError {
    #[error("Cannot track {0}'s flight. They are banned from the airport.")]
    BannedPassenger(String),
}

/// Boxed countdown stream returned by [`FlightCountdown::watch`].
pub type CountdownStream =
    Pin<Box<dyn Stream<Item = Result<FlightStatus, CountdownError>> + Send + 'static>>;

/// Builds countdown streams with a shared tick interval and deny-list.
#[derive(Debug, Clone)]
pub struct FlightCountdown {
    tick_interval: Duration,
    banned_passengers: Arc<HashSet<String>>,
}

impl FlightCountdown {
    pub fn new<I, S>(tick_interval: Duration, banned_passengers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tick_interval,
            banned_passengers: Arc::new(banned_passengers.into_iter().map(Into::into).collect()),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn is_banned(&self, passenger_name: &str) -> bool {
        self.banned_passengers.contains(passenger_name)
    }

    /// Watch a flight until it departs or is canceled.
    ///
    /// Emits the current snapshot, waits one tick, then advances one minute.
    /// A banned passenger yields a single `Err` and nothing else.
    pub fn watch(&self, flight: FlightStatus) -> CountdownStream {
        let banned_passengers = Arc::clone(&self.banned_passengers);
        let tick_interval = self.tick_interval;

        Box::pin(try_stream! {
            if banned_passengers.contains(flight.passenger_name()) {
                Err::<(), _>(CountdownError::BannedPassenger(
                    flight.passenger_name().to_string(),
                ))?;
            }

            let mut flight = flight;
            while flight.departure_time_in_minutes() >= 0 && !flight.is_flight_canceled() {
                yield flight.clone();
                tokio::time::sleep(tick_interval).await;
                flight = flight.tick();
            }
        })
    }

    /// Watch a flight, rendering each snapshot as a boarding message.
    pub fn watch_messages(
        &self,
        flight: FlightStatus,
    ) -> impl Stream<Item = Result<String, CountdownError>> + Send + 'static {
        self.watch(flight)
            .map(|result| result.map(|flight| boarding_message(&flight)))
    }
}

/// Human-readable boarding message for a snapshot.
pub fn boarding_message(flight: &FlightStatus) -> String {
    let message = match flight.boarding_status() {
        BoardingState::FlightCanceled => "Your flight was canceled",
        BoardingState::BoardingNotStarted => "Boarding will start soon",
        BoardingState::WaitingToBoard => "Other passengers are boarding",
        BoardingState::Boarding => "You can now board the plane",
        BoardingState::BoardingEnded => "The boarding doors have closed",
    };
    format!(
        "{} (Flight departs in {} minutes)",
        message,
        flight.departure_time_in_minutes()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::LoyaltyTier;
    use crate::testing::fixtures;
    use tokio::time::Instant;

    fn countdown() -> FlightCountdown {
        FlightCountdown::new(Duration::from_millis(400), ["Nogartse"])
    }

    #[tokio::test(start_paused = true)]
    async fn test_emits_until_departure() {
        let emitted: Vec<FlightStatus> = countdown()
            .watch(fixtures::flight("Madrigal", 2))
            .map(|r| r.unwrap())
            .collect()
            .await;

        let minutes: Vec<i32> = emitted.iter().map(|f| f.departure_time_in_minutes()).collect();
        assert_eq!(minutes, vec![2, 1, 0]);
        assert!(emitted.iter().all(|f| f.passenger_name() == "Madrigal"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_minutes_strictly_decrease() {
        let emitted: Vec<i32> = countdown()
            .watch(fixtures::flight("Polarcubis", 20))
            .map(|r| r.unwrap().departure_time_in_minutes())
            .collect()
            .await;

        assert_eq!(emitted.len(), 21);
        assert!(emitted.windows(2).all(|w| w[1] == w[0] - 1));
        assert_eq!(emitted.last(), Some(&0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_are_spaced_by_interval() {
        let started = Instant::now();
        let mut stream = countdown().watch(fixtures::flight("Madrigal", 1));

        stream.next().await.unwrap().unwrap();
        assert!(started.elapsed() < Duration::from_millis(400));

        stream.next().await.unwrap().unwrap();
        assert!(started.elapsed() >= Duration::from_millis(400));

        assert!(stream.next().await.is_none());
        assert!(started.elapsed() >= Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_banned_passenger_fails_without_emitting() {
        let results: Vec<_> = countdown()
            .watch(fixtures::flight("Nogartse", 5))
            .collect()
            .await;

        assert_eq!(
            results,
            vec![Err(CountdownError::BannedPassenger("Nogartse".to_string()))]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_canceled_flight_emits_nothing() {
        let results: Vec<_> = countdown()
            .watch(fixtures::canceled_flight("Estragon", 30))
            .collect()
            .await;
        assert!(results.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_departed_flight_emits_nothing() {
        let results: Vec<_> = countdown()
            .watch(fixtures::flight("Estragon", -1))
            .collect()
            .await;
        assert!(results.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_watch_is_independent() {
        let countdown = countdown();
        let flight = fixtures::flight("Taernyl", 1);

        let first: Vec<_> = countdown.watch(flight.clone()).collect().await;
        let second: Vec<_> = countdown.watch(flight).collect().await;
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_early_drop_stops_countdown() {
        let mut stream = countdown().watch(fixtures::flight("Madrigal", 100));
        assert!(stream.next().await.is_some());
        drop(stream);

        // Nothing keeps ticking after the consumer goes away.
        tokio::time::sleep(Duration::from_secs(60)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_messages() {
        let flight = FlightStatus::new(
            "Madrigal",
            "FW-1",
            LoyaltyTier::Bronze,
            "KSEA",
            "KLAX",
            "On Time",
            15,
        );
        let messages: Vec<String> = countdown()
            .watch_messages(flight)
            .map(|r| r.unwrap())
            .take(2)
            .collect()
            .await;

        assert_eq!(
            messages,
            vec![
                "You can now board the plane (Flight departs in 15 minutes)",
                "The boarding doors have closed (Flight departs in 14 minutes)",
            ]
        );
    }

    #[test]
    fn test_boarding_message_covers_every_state() {
        let cases = [
            ("Canceled", 10, "Your flight was canceled (Flight departs in 10 minutes)"),
            ("On Time", 90, "Boarding will start soon (Flight departs in 90 minutes)"),
            ("On Time", 50, "Other passengers are boarding (Flight departs in 50 minutes)"),
            ("On Time", 20, "You can now board the plane (Flight departs in 20 minutes)"),
            ("On Time", 3, "The boarding doors have closed (Flight departs in 3 minutes)"),
        ];
        for (status, minutes, expected) in cases {
            let flight =
                FlightStatus::new("Madrigal", "FW-1", LoyaltyTier::Gold, "A", "B", status, minutes);
            assert_eq!(boarding_message(&flight), expected);
        }
    }

    #[test]
    fn test_banned_error_message() {
        let err = CountdownError::BannedPassenger("Nogartse".to_string());
        assert_eq!(
            err.to_string(),
            "Cannot track Nogartse's flight. They are banned from the airport."
        );
    }
}

use serde::{Deserialize, Serialize};

use crate::flight::BoardingState;
use crate::source::SourceKind;

/// Lifecycle and status notifications emitted while tracking flights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrackerEvent {
    // Fetching
    FetchStarted {
        passenger: String,
        source: SourceKind,
    },
    FetchFinished {
        passenger: String,
        source: SourceKind,
    },
    FlightFetched {
        passenger: String,
        flight_number: String,
        worker_id: usize,
    },
    FlightsFound {
        /// "Passenger (FLIGHT)" descriptions in fetch order.
        flights: Vec<String>,
    },

    // Countdown
    TrackingStarted {
        passenger: String,
    },
    BoardingUpdate {
        passenger: String,
        boarding_status: BoardingState,
        departure_time_in_minutes: i32,
        message: String,
    },
    TrackingFailed {
        passenger: String,
        reason: String,
    },
    TrackingFinished {
        passenger: String,
    },

    // Gate
    FlightsRemaining {
        count: i64,
    },
    AllFlightsFinished,
}

impl TrackerEvent {
    /// Passenger this event is about, if any.
    pub fn passenger(&self) -> Option<&str> {
        match self {
            TrackerEvent::FetchStarted { passenger, .. }
            | TrackerEvent::FetchFinished { passenger, .. }
            | TrackerEvent::FlightFetched { passenger, .. }
            | TrackerEvent::TrackingStarted { passenger }
            | TrackerEvent::BoardingUpdate { passenger, .. }
            | TrackerEvent::TrackingFailed { passenger, .. }
            | TrackerEvent::TrackingFinished { passenger } => Some(passenger),
            TrackerEvent::FlightsFound { .. }
            | TrackerEvent::FlightsRemaining { .. }
            | TrackerEvent::AllFlightsFinished => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = TrackerEvent::FetchStarted {
            passenger: "Madrigal".to_string(),
            source: SourceKind::FlightInfo,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "fetch_started");
        assert_eq!(json["source"], "flight_info");

        let parsed: TrackerEvent = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_passenger_accessor() {
        let event = TrackerEvent::TrackingFinished {
            passenger: "Estragon".to_string(),
        };
        assert_eq!(event.passenger(), Some("Estragon"));
        assert_eq!(TrackerEvent::FlightsRemaining { count: 2 }.passenger(), None);
    }
}

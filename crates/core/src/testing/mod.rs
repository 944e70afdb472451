//! Testing utilities and mock implementations.
//!
//! This module provides a mock implementation of the flight data source
//! trait, allowing the fetcher, pool, and tracker to be exercised without a
//! network.
//!
//! # Example
//!
//! ```rust,ignore
//! use flightwatch_core::testing::{fixtures, MockFlightDataSource};
//!
//! let source = MockFlightDataSource::new();
//! source
//!     .set_flight("Madrigal", &fixtures::flight_payload("FW-6112", "On Time", 3))
//!     .await;
//! ```

mod mock_source;

pub use mock_source::{MockFlightDataSource, RecordedCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::flight::{FlightStatus, LoyaltyTier};

    /// Loyalty payload returned when none is configured.
    pub const DEFAULT_LOYALTY_PAYLOAD: &str = "Gold";

    /// Departure time used by default flight payloads.
    pub const DEFAULT_DEPARTURE_MINUTES: i32 = 3;

    /// Build a raw flight payload.
    pub fn flight_payload(flight_number: &str, status: &str, minutes: i32) -> String {
        format!("{},KSEA,KLAX,{},{}", flight_number, status, minutes)
    }

    /// Flight number derived from the passenger name.
    pub fn flight_number_for(passenger: &str) -> String {
        let code: String = passenger
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .take(3)
            .collect();
        format!("FW-{}", code.to_ascii_uppercase())
    }

    /// Flight payload returned when none is configured.
    pub fn default_flight_payload(passenger: &str) -> String {
        flight_payload(
            &flight_number_for(passenger),
            "On Time",
            DEFAULT_DEPARTURE_MINUTES,
        )
    }

    /// Create a test flight with reasonable defaults.
    pub fn flight(passenger: &str, minutes: i32) -> FlightStatus {
        FlightStatus::new(
            passenger,
            flight_number_for(passenger),
            LoyaltyTier::Gold,
            "KSEA",
            "KLAX",
            "On Time",
            minutes,
        )
    }

    /// Create a canceled test flight.
    pub fn canceled_flight(passenger: &str, minutes: i32) -> FlightStatus {
        FlightStatus::new(
            passenger,
            flight_number_for(passenger),
            LoyaltyTier::Gold,
            "KSEA",
            "KLAX",
            "Canceled",
            minutes,
        )
    }
}

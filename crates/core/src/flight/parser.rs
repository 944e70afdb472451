//! Parsing of raw upstream payloads into a [`FlightStatus`].
//!
//! Flight payload: `FLIGHT_NUMBER,ORIGIN,DESTINATION,STATUS,DEPARTURE_MINUTES`.
//! Loyalty payload: tier name as the first comma-separated field.

use thiserror::Error;

use super::types::{FlightStatus, LoyaltyTier};

/// Errors produced when an upstream payload is malformed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("{payload} payload is empty")]
    Empty { payload: &'static str },

    #[error("flight payload is missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid departure time: {0:?}")]
    InvalidMinutes(String),

    #[error("unknown loyalty tier: {0:?}")]
    UnknownLoyaltyTier(String),
}

const FLIGHT_FIELDS: [&str; 5] = [
    "flight_number",
    "origin_airport",
    "destination_airport",
    "status",
    "departure_time_in_minutes",
];

impl FlightStatus {
    /// Merge the two upstream payloads into one snapshot.
    pub fn parse(
        passenger_name: &str,
        flight_payload: &str,
        loyalty_payload: &str,
    ) -> Result<Self, ParseError> {
        let flight_payload = flight_payload.trim();
        if flight_payload.is_empty() {
            return Err(ParseError::Empty { payload: "flight" });
        }

        let fields: Vec<&str> = flight_payload.split(',').map(str::trim).collect();
        if let Some(missing) = FLIGHT_FIELDS.get(fields.len()) {
            return Err(ParseError::MissingField(missing));
        }
        let [flight_number, origin, destination, status, minutes] = [
            fields[0], fields[1], fields[2], fields[3], fields[4],
        ];

        let departure_time_in_minutes: i32 = minutes
            .parse()
            .map_err(|_| ParseError::InvalidMinutes(minutes.to_string()))?;
        if departure_time_in_minutes < -1 {
            return Err(ParseError::InvalidMinutes(minutes.to_string()));
        }

        let loyalty_tier = parse_loyalty_tier(loyalty_payload)?;

        Ok(FlightStatus::new(
            passenger_name,
            flight_number,
            loyalty_tier,
            origin,
            destination,
            status,
            departure_time_in_minutes,
        ))
    }
}

fn parse_loyalty_tier(payload: &str) -> Result<LoyaltyTier, ParseError> {
    let name = payload.split(',').next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(ParseError::Empty { payload: "loyalty" });
    }
    LoyaltyTier::from_name(name).ok_or_else(|| ParseError::UnknownLoyaltyTier(name.to_string()))
}

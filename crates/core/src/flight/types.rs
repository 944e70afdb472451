//! Types for the flight status model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Departure times below this many minutes mean the boarding doors are closed.
const BOARDING_CLOSES_AT: i32 = 15;

/// Departure times at or below this many minutes mean boarding has started.
const BOARDING_OPENS_AT: i32 = 60;

/// Boarding phase of a flight, derived from its status and departure time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BoardingState {
    FlightCanceled,
    BoardingNotStarted,
    WaitingToBoard,
    Boarding,
    BoardingEnded,
}

/// Passenger loyalty tier. Higher tiers may board earlier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LoyaltyTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Titanium,
    Diamond,
}

impl LoyaltyTier {
    /// All tiers, lowest first.
    pub const ALL: [LoyaltyTier; 6] = [
        LoyaltyTier::Bronze,
        LoyaltyTier::Silver,
        LoyaltyTier::Gold,
        LoyaltyTier::Platinum,
        LoyaltyTier::Titanium,
        LoyaltyTier::Diamond,
    ];

    /// Tier name as sent by the loyalty service.
    pub fn name(&self) -> &'static str {
        match self {
            LoyaltyTier::Bronze => "Bronze",
            LoyaltyTier::Silver => "Silver",
            LoyaltyTier::Gold => "Gold",
            LoyaltyTier::Platinum => "Platinum",
            LoyaltyTier::Titanium => "Titanium",
            LoyaltyTier::Diamond => "Diamond",
        }
    }

    /// Minutes before departure at which this tier may board.
    pub fn boarding_window_start(&self) -> i32 {
        match self {
            LoyaltyTier::Bronze => 25,
            LoyaltyTier::Silver => 25,
            LoyaltyTier::Gold => 30,
            LoyaltyTier::Platinum => 35,
            LoyaltyTier::Titanium => 40,
            LoyaltyTier::Diamond => 45,
        }
    }

    /// Look up a tier by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable snapshot of a passenger's flight.
///
/// Fields are private so a snapshot can only be produced by parsing or by
/// [`FlightStatus::tick`]; `boarding_status` and `is_flight_canceled` are always
/// derived from the stored fields and therefore stay consistent.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FlightStatus {
    passenger_name: String,
    flight_number: String,
    loyalty_tier: LoyaltyTier,
    origin_airport: String,
    destination_airport: String,
    status: String,
    departure_time_in_minutes: i32,
}

impl FlightStatus {
    /// Build a snapshot from already-validated parts.
    ///
    /// Departure times below -1 are clamped to -1.
    pub fn new(
        passenger_name: impl Into<String>,
        flight_number: impl Into<String>,
        loyalty_tier: LoyaltyTier,
        origin_airport: impl Into<String>,
        destination_airport: impl Into<String>,
        status: impl Into<String>,
        departure_time_in_minutes: i32,
    ) -> Self {
        Self {
            passenger_name: passenger_name.into(),
            flight_number: flight_number.into(),
            loyalty_tier,
            origin_airport: origin_airport.into(),
            destination_airport: destination_airport.into(),
            status: status.into(),
            departure_time_in_minutes: departure_time_in_minutes.max(-1),
        }
    }

    pub fn passenger_name(&self) -> &str {
        &self.passenger_name
    }

    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    pub fn loyalty_tier(&self) -> LoyaltyTier {
        self.loyalty_tier
    }

    pub fn origin_airport(&self) -> &str {
        &self.origin_airport
    }

    pub fn destination_airport(&self) -> &str {
        &self.destination_airport
    }

    /// Raw flight status as reported upstream (e.g. "On Time").
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn departure_time_in_minutes(&self) -> i32 {
        self.departure_time_in_minutes
    }

    pub fn is_flight_canceled(&self) -> bool {
        self.status.eq_ignore_ascii_case("canceled")
    }

    /// Whether the passenger's tier allows boarding at the current time.
    pub fn is_eligible_to_board(&self) -> bool {
        (BOARDING_CLOSES_AT..=self.loyalty_tier.boarding_window_start())
            .contains(&self.departure_time_in_minutes)
    }

    pub fn has_boarding_started(&self) -> bool {
        (BOARDING_CLOSES_AT..=BOARDING_OPENS_AT).contains(&self.departure_time_in_minutes)
    }

    pub fn is_boarding_over(&self) -> bool {
        self.departure_time_in_minutes < BOARDING_CLOSES_AT
    }

    pub fn boarding_status(&self) -> BoardingState {
        if self.is_flight_canceled() {
            BoardingState::FlightCanceled
        } else if self.is_boarding_over() {
            BoardingState::BoardingEnded
        } else if self.is_eligible_to_board() {
            BoardingState::Boarding
        } else if self.has_boarding_started() {
            BoardingState::WaitingToBoard
        } else {
            BoardingState::BoardingNotStarted
        }
    }

    /// The snapshot one minute later. Never goes below -1.
    pub fn tick(&self) -> Self {
        Self {
            departure_time_in_minutes: (self.departure_time_in_minutes - 1).max(-1),
            ..self.clone()
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {} -> {} [{}], departs in {} minutes, {:?}",
            self.passenger_name,
            self.flight_number,
            self.origin_airport,
            self.destination_airport,
            self.loyalty_tier,
            self.departure_time_in_minutes,
            self.boarding_status()
        )
    }
}

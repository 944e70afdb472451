//! Flight status model.
//!
//! A [`FlightStatus`] is an immutable snapshot of one passenger's flight. It is
//! built once by [`FlightStatus::parse`] from the two raw upstream payloads and
//! advanced only by [`FlightStatus::tick`], which returns a new copy.

mod parser;
mod types;

pub use parser::ParseError;
pub use types::{BoardingState, FlightStatus, LoyaltyTier};

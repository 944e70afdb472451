//! Per-flight boarding countdown.
//!
//! [`FlightCountdown::watch`] returns a lazy, finite stream of flight snapshots,
//! one per tick, until the flight departs or is canceled. Every call yields a
//! fresh countdown. Passengers on the deny-list fail at the first poll.

mod stream;

pub use stream::{boarding_message, CountdownError, CountdownStream, FlightCountdown};

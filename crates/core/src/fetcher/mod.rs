//! Per-passenger flight fetching.
//!
//! [`ParallelFetcher`] issues the flight and loyalty requests concurrently,
//! waits at least the configured settle delay, and merges both payloads into a
//! single [`FlightStatus`](crate::flight::FlightStatus).

mod parallel;

pub use parallel::{FetchError, ParallelFetcher};

//! Flight tracker orchestration.
//!
//! The tracker drives flights through two phases:
//! - **Fetch**: Concurrent (bounded worker pool) - IO-bound
//! - **Track**: a gate-counter reporter running alongside a countdown driver
//!   that watches one flight at a time and decrements the gate after each

mod runner;
mod types;

pub use runner::FlightTracker;
pub use types::{FlightOutcome, TrackedFlight, TrackerError, TrackingReport};

//! Upstream flight data sources.
//!
//! This module provides the `FlightDataSource` trait consumed by the fetcher,
//! and an HTTP implementation that talks to the flight and loyalty endpoints.

mod http;
mod types;

pub use http::HttpFlightDataSource;
pub use types::*;

//! Types for the flight data source abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which of the two upstream payloads a call fetches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    FlightInfo,
    LoyaltyInfo,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::FlightInfo => f.write_str("flight info"),
            SourceKind::LoyaltyInfo => f.write_str("loyalty info"),
        }
    }
}

/// Errors that can occur while fetching from an upstream source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DataSourceError {
    #[error("data source connection failed: {0}")]
    ConnectionFailed(String),

    #[error("data source request timed out")]
    Timeout,

    #[error("data source returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("data source unavailable: {0}")]
    Unavailable(String),
}

/// Source of raw flight and loyalty payloads.
#[async_trait]
pub trait FlightDataSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &str;

    /// Fetch the raw flight payload for a passenger.
    async fn fetch_flight_info(&self, passenger_name: &str) -> Result<String, DataSourceError>;

    /// Fetch the raw loyalty payload for a passenger.
    async fn fetch_loyalty_info(&self, passenger_name: &str) -> Result<String, DataSourceError>;

    /// Fetch one of the two payloads by kind.
    async fn fetch(&self, kind: SourceKind, passenger_name: &str) -> Result<String, DataSourceError> {
        match kind {
            SourceKind::FlightInfo => self.fetch_flight_info(passenger_name).await,
            SourceKind::LoyaltyInfo => self.fetch_loyalty_info(passenger_name).await,
        }
    }
}

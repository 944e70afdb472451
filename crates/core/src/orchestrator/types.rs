//! Types for the flight tracker.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pool::PoolError;

/// Errors that abort a tracking run.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Fetching flights failed.
    #[error("failed to fetch flights: {0}")]
    Pool(#[from] PoolError),

    /// A tracking task panicked or was aborted unexpectedly.
    #[error("tracker task failed: {0}")]
    TaskFailed(String),

    /// The run was cancelled.
    #[error("tracking was cancelled")]
    Cancelled,
}

/// How a flight's countdown ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FlightOutcome {
    /// Counted down to departure.
    Departed,
    /// Stopped because the flight was canceled.
    Canceled,
    /// Tracking was refused before any update.
    Rejected { reason: String },
}

/// Result of tracking a single flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedFlight {
    pub passenger: String,
    pub flight_number: String,
    /// Number of boarding updates emitted.
    pub updates: usize,
    pub outcome: FlightOutcome,
}

/// Summary of a completed tracking run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingReport {
    /// Tracked flights, in tracking order.
    pub flights: Vec<TrackedFlight>,
    /// Gate counts observed by the reporter, in order.
    pub gate_counts: Vec<i64>,
}

impl TrackingReport {
    /// Flights whose tracking was refused.
    pub fn rejected(&self) -> impl Iterator<Item = &TrackedFlight> {
        self.flights
            .iter()
            .filter(|f| matches!(f.outcome, FlightOutcome::Rejected { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serialization() {
        let report = TrackingReport {
            flights: vec![TrackedFlight {
                passenger: "Nogartse".to_string(),
                flight_number: "FW-NOG".to_string(),
                updates: 0,
                outcome: FlightOutcome::Rejected {
                    reason: "banned".to_string(),
                },
            }],
            gate_counts: vec![1],
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["flights"][0]["outcome"]["outcome"], "rejected");

        let parsed: TrackingReport = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, report);
        assert_eq!(parsed.rejected().count(), 1);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(TrackerError::Cancelled.to_string(), "tracking was cancelled");
        let err = TrackerError::from(PoolError::NoWorkers);
        assert_eq!(
            err.to_string(),
            "failed to fetch flights: worker count must be at least 1"
        );
    }
}

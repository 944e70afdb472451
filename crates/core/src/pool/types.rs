//! Types for the worker pool.

use thiserror::Error;

use crate::fetcher::FetchError;

/// Errors that fail a whole `fetch_all` call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PoolError {
    /// A worker could not fetch a passenger's flight.
    #[error("failed to fetch flight for {passenger}: {source}")]
    Fetch {
        passenger: String,
        #[source]
        source: FetchError,
    },

    /// A pool task panicked or was aborted unexpectedly.
    #[error("pool task failed: {0}")]
    TaskFailed(String),

    /// The pool was configured without workers.
    #[error("worker count must be at least 1")]
    NoWorkers,

    /// The caller cancelled the fetch.
    #[error("flight fetch was cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DataSourceError;

    #[test]
    fn test_error_display() {
        let err = PoolError::Fetch {
            passenger: "Madrigal".to_string(),
            source: FetchError::DataSource(DataSourceError::Timeout),
        };
        assert_eq!(
            err.to_string(),
            "failed to fetch flight for Madrigal: data source request timed out"
        );
        assert_eq!(PoolError::NoWorkers.to_string(), "worker count must be at least 1");
    }

    #[test]
    fn test_fetch_error_is_source() {
        use std::error::Error as _;

        let err = PoolError::Fetch {
            passenger: "Madrigal".to_string(),
            source: FetchError::DataSource(DataSourceError::Timeout),
        };
        assert!(err.source().is_some());
    }
}

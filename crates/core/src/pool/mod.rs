//! Bounded fan-out/fan-in worker pool for fetching flights.
//!
//! One producer feeds passenger names into a small work queue; a fixed number
//! of workers drain it through a shared receiver, fetch each flight with the
//! [`ParallelFetcher`](crate::fetcher::ParallelFetcher), and push results into
//! a result queue. The result queue closes once every worker has dropped its
//! sender, and all tasks live in one `JoinSet` so the first failure aborts the
//! rest.
//!
//! # Example
//!
//! ```ignore
//! use flightwatch_core::{ParallelFetcher, WorkerPool};
//!
//! let fetcher = Arc::new(ParallelFetcher::new(source, Duration::from_millis(500)));
//! let pool = WorkerPool::new(fetcher, 2);
//!
//! let flights = pool
//!     .fetch_all(vec!["Madrigal".into(), "Polarcubis".into()], &CancellationToken::new())
//!     .await?;
//! ```

mod types;
mod workers;

pub use types::PoolError;
pub use workers::WorkerPool;

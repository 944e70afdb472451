pub mod config;
pub mod countdown;
pub mod events;
pub mod fetcher;
pub mod flight;
pub mod gate;
pub mod orchestrator;
pub mod pool;
pub mod source;
pub mod stream;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, Config,
    ConfigError, EventsConfig, SourceConfig, TrackerConfig,
};
pub use countdown::{boarding_message, CountdownError, CountdownStream, FlightCountdown};
pub use events::{create_event_channel, EventHandle, TrackerEvent, TrackerEventEnvelope};
pub use fetcher::{FetchError, ParallelFetcher};
pub use flight::{BoardingState, FlightStatus, LoyaltyTier, ParseError};
pub use gate::{GateCounter, GateWriter};
pub use orchestrator::{FlightOutcome, FlightTracker, TrackedFlight, TrackerError, TrackingReport};
pub use pool::{PoolError, WorkerPool};
pub use source::{DataSourceError, FlightDataSource, HttpFlightDataSource, SourceKind};
pub use stream::{CompletionExt, OnCompletion};

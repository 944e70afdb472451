use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub events: EventsConfig,
}

/// Flight tracking configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackerConfig {
    /// Passengers whose flights are fetched and tracked, in submission order.
    #[serde(default = "default_passengers")]
    pub passengers: Vec<String>,
    /// Number of concurrent fetch workers.
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,
    /// Passengers whose flights may not be tracked.
    #[serde(default = "default_banned_passengers")]
    pub banned_passengers: Vec<String>,
    /// Minimum time a single fetch takes (milliseconds).
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
    /// Time between countdown emissions (milliseconds).
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Capacity of the fetched-flight result queue.
    #[serde(default = "default_result_buffer")]
    pub result_buffer: usize,
}

impl TrackerConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            passengers: default_passengers(),
            worker_count: default_worker_count(),
            banned_passengers: default_banned_passengers(),
            settle_delay_ms: default_settle_delay(),
            tick_interval_ms: default_tick_interval(),
            result_buffer: default_result_buffer(),
        }
    }
}

fn default_passengers() -> Vec<String> {
    ["Madrigal", "Polarcubis", "Estragon", "Taernyl"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_worker_count() -> usize {
    2
}

fn default_banned_passengers() -> Vec<String> {
    vec!["Nogartse".to_string()]
}

fn default_settle_delay() -> u64 {
    500
}

fn default_tick_interval() -> u64 {
    400
}

fn default_result_buffer() -> usize {
    16
}

/// Upstream HTTP source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Base URL; `/flight` and `/loyalty` are appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://kotlin-book.bignerdranch.com/2e".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Event channel configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventsConfig {
    #[serde(default = "default_event_buffer")]
    pub buffer_size: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_event_buffer(),
        }
    }
}

fn default_event_buffer() -> usize {
    256
}

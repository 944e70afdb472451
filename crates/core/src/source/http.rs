//! HTTP flight data source.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::SourceConfig;

use super::{DataSourceError, FlightDataSource, SourceKind};

/// Fetches payloads with a plain `GET` against `{base_url}/flight` and
/// `{base_url}/loyalty`.
pub struct HttpFlightDataSource {
    client: Client,
    config: SourceConfig,
}

impl HttpFlightDataSource {
    /// Create a new HttpFlightDataSource with the given configuration.
    pub fn new(config: SourceConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    fn endpoint(&self, kind: SourceKind) -> String {
        let path = match kind {
            SourceKind::FlightInfo => "flight",
            SourceKind::LoyaltyInfo => "loyalty",
        };
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get(&self, kind: SourceKind, passenger_name: &str) -> Result<String, DataSourceError> {
        let url = self.endpoint(kind);
        debug!(passenger = passenger_name, url = %url, "Fetching {}", kind);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                DataSourceError::Timeout
            } else if e.is_connect() {
                DataSourceError::ConnectionFailed(e.to_string())
            } else {
                DataSourceError::Unavailable(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataSourceError::Http {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| DataSourceError::Unavailable(format!("Failed to read response: {}", e)))
    }
}

#[async_trait]
impl FlightDataSource for HttpFlightDataSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_flight_info(&self, passenger_name: &str) -> Result<String, DataSourceError> {
        self.get(SourceKind::FlightInfo, passenger_name).await
    }

    async fn fetch_loyalty_info(&self, passenger_name: &str) -> Result<String, DataSourceError> {
        self.get(SourceKind::LoyaltyInfo, passenger_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base_url: &str) -> HttpFlightDataSource {
        HttpFlightDataSource::new(SourceConfig {
            base_url: base_url.to_string(),
            timeout_secs: 1,
        })
    }

    #[test]
    fn test_endpoints() {
        let source = source("http://example.test/2e/");
        assert_eq!(
            source.endpoint(SourceKind::FlightInfo),
            "http://example.test/2e/flight"
        );
        assert_eq!(
            source.endpoint(SourceKind::LoyaltyInfo),
            "http://example.test/2e/loyalty"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_data_source_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let source = source("http://127.0.0.1:9");
        let result = source.fetch_flight_info("Madrigal").await;
        assert!(matches!(
            result,
            Err(DataSourceError::ConnectionFailed(_))
                | Err(DataSourceError::Timeout)
                | Err(DataSourceError::Unavailable(_))
        ));
    }
}

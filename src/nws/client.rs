//! HTTP client for the NWS API

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::WeatherSource;
use super::types::{AlertCollection, ForecastResponse, PointsResponse};
use crate::config::UpstreamConfig;
use crate::{Result, WeatherProxyError};

const GEO_JSON: &str = "application/geo+json";

/// NWS API client. Cheap to share, the inner `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct NwsClient {
    client: Client,
    base_url: String,
}

impl NwsClient {
    /// Create a new NWS client
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|e| {
            WeatherProxyError::config(format!("Invalid upstream user agent: {e}"))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GEO_JSON));
        headers.insert(USER_AGENT, user_agent);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .default_headers(headers)
            .build()
            .map_err(|e| WeatherProxyError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let start_time = Instant::now();
        debug!("NWS request: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("NWS request to {} failed: {}", url, e);
            WeatherProxyError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("NWS returned {} for {}", status, url);
            return Err(WeatherProxyError::upstream_status(status.as_u16(), url));
        }

        let body = response.json::<T>().await.map_err(|e| {
            warn!("Failed to decode NWS response from {}: {}", url, e);
            WeatherProxyError::from(e)
        })?;

        debug!(
            "NWS response from {} in {:.3}s",
            url,
            start_time.elapsed().as_secs_f64()
        );
        Ok(body)
    }
}

#[async_trait]
impl WeatherSource for NwsClient {
    #[instrument(skip(self))]
    async fn points(&self, lat: f64, lon: f64) -> Result<PointsResponse> {
        let url = format!("{}/points/{lat},{lon}", self.base_url);
        match self.get_json(&url).await {
            Err(WeatherProxyError::UpstreamStatus { status: 404, .. }) => {
                Err(WeatherProxyError::LocationUnsupported)
            }
            other => other,
        }
    }

    #[instrument(skip(self))]
    async fn forecast(&self, url: &str) -> Result<ForecastResponse> {
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    async fn active_alerts(&self, zone_id: &str) -> Result<AlertCollection> {
        let url = format!("{}/alerts/active/zone/{zone_id}", self.base_url);
        self.get_json(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> NwsClient {
        let config = UpstreamConfig {
            base_url: server.uri(),
            ..UpstreamConfig::default()
        };
        NwsClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_points_sends_identifying_headers() {
        let mock_server = MockServer::start().await;
        let config = UpstreamConfig {
            base_url: mock_server.uri(),
            user_agent: "weather-proxy-test (ops@example.com)".to_string(),
            ..UpstreamConfig::default()
        };

        Mock::given(method("GET"))
            .and(path("/points/38.8894,-77.0352"))
            .and(header("accept", GEO_JSON))
            .and(header("user-agent", "weather-proxy-test (ops@example.com)"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "properties": {"gridId": "LWX", "forecastZone": "https://x/zones/forecast/DCZ001"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let points = NwsClient::new(&config)
            .unwrap()
            .points(38.8894, -77.0352)
            .await
            .unwrap();
        assert_eq!(points.properties.grid_id.as_deref(), Some("LWX"));
        assert_eq!(points.properties.zone_id(), Some("DCZ001"));
    }

    #[tokio::test]
    async fn test_points_404_is_location_unsupported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/points/51.5,-0.12"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "title": "Data Unavailable For Requested Point"
            })))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).points(51.5, -0.12).await;
        assert!(matches!(result, Err(WeatherProxyError::LocationUnsupported)));
    }

    #[tokio::test]
    async fn test_forecast_server_error_keeps_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/gridpoints/LWX/97,71/forecast"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let url = format!("{}/gridpoints/LWX/97,71/forecast", mock_server.uri());
        let result = client_for(&mock_server).forecast(&url).await;
        assert!(matches!(
            result,
            Err(WeatherProxyError::UpstreamStatus { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_forecast_garbage_body_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/gridpoints/LWX/97,71/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&mock_server)
            .await;

        let url = format!("{}/gridpoints/LWX/97,71/forecast", mock_server.uri());
        let result = client_for(&mock_server).forecast(&url).await;
        assert!(matches!(result, Err(WeatherProxyError::InvalidResponse { .. })));
    }

    #[tokio::test]
    async fn test_active_alerts_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/alerts/active/zone/DCZ001"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "features": [{"properties": {"event": "Wind Advisory"}}]
            })))
            .mount(&mock_server)
            .await;

        let alerts = client_for(&mock_server)
            .active_alerts("DCZ001")
            .await
            .unwrap();
        assert_eq!(alerts.features.len(), 1);
        assert_eq!(
            alerts.features[0].properties.event.as_deref(),
            Some("Wind Advisory")
        );
    }

    #[tokio::test]
    async fn test_unreachable_upstream() {
        let config = UpstreamConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_seconds: 2,
            ..UpstreamConfig::default()
        };
        let client = NwsClient::new(&config).unwrap();

        let result = client.points(38.9, -77.0).await;
        assert!(matches!(
            result,
            Err(WeatherProxyError::UpstreamUnavailable { .. })
        ));
    }
}

//! National Weather Service API access
//!
//! The proxy talks to NWS through [`WeatherSource`] so the request
//! orchestration can run against [`NwsClient`] in production and an
//! in-process fake in tests.

use async_trait::async_trait;

use crate::Result;

pub mod client;
pub mod types;

pub use client::NwsClient;
pub use types::{AlertCollection, ForecastResponse, PointProperties, PointsResponse};

#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Grid point metadata for a coordinate
    async fn points(&self, lat: f64, lon: f64) -> Result<PointsResponse>;

    /// Period forecast from the absolute URL handed out by `points`
    async fn forecast(&self, url: &str) -> Result<ForecastResponse>;

    /// Hourly forecast from the absolute URL handed out by `points`
    async fn hourly(&self, url: &str) -> Result<ForecastResponse> {
        self.forecast(url).await
    }

    /// Active alerts for a public forecast zone
    async fn active_alerts(&self, zone_id: &str) -> Result<AlertCollection>;
}

/// Last non-empty path segment of a zone URL,
/// `https://api.weather.gov/zones/forecast/DCZ001` -> `DCZ001`
#[must_use]
pub fn zone_id(zone_url: &str) -> Option<&str> {
    zone_url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://api.weather.gov/zones/forecast/DCZ001", Some("DCZ001"))]
    #[case("https://api.weather.gov/zones/forecast/NYZ072/", Some("NYZ072"))]
    #[case("CAZ006", Some("CAZ006"))]
    #[case("", None)]
    #[case("/", None)]
    fn test_zone_id(#[case] url: &str, #[case] expected: Option<&str>) {
        assert_eq!(zone_id(url), expected);
    }
}

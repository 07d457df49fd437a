//! `nws-weather-proxy` - backend for the weather website
//!
//! Forwards coordinates to the National Weather Service API, reshapes the
//! grid, forecast, hourly and alert documents into one simplified payload
//! and serves the static frontend.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod nws;
pub mod service;
pub mod web;

// Re-export core types for public API
pub use config::WeatherProxyConfig;
pub use error::WeatherProxyError;
pub use models::{Alert, AlertDetail, AlertsReport, ForecastPeriod, Location, WeatherReport};
pub use nws::{NwsClient, WeatherSource};
pub use service::WeatherService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

//! Response models for the weather proxy
//!
//! These are the shapes the API hands to the frontend:
//! - Location: the queried coordinate plus what NWS knows about it
//! - Forecast: forecast periods passed through from NWS
//! - Alert: active alert summaries
//! - Report: the assembled endpoint payloads

pub mod alert;
pub mod forecast;
pub mod location;
pub mod report;

// Re-export all public types for convenient access
pub use alert::{Alert, AlertDetail};
pub use forecast::{ForecastPeriod, QuantitativeValue, Temperature};
pub use location::Location;
pub use report::{AlertsReport, WeatherReport};

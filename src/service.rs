//! Weather report assembly
//!
//! Runs the NWS call sequence for one coordinate (grid lookup, forecast,
//! hourly forecast, zone alerts) and reshapes the results into the payloads
//! served by the API. Hourly and alert data are optional: when fetching them
//! fails the report is still produced with empty lists.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::config::LimitsConfig;
use crate::models::{Alert, AlertDetail, AlertsReport, ForecastPeriod, WeatherReport};
use crate::nws::{PointProperties, WeatherSource};
use crate::{Result, WeatherProxyError};

/// Builds weather and alert reports from a [`WeatherSource`]
#[derive(Clone)]
pub struct WeatherService {
    source: Arc<dyn WeatherSource>,
    limits: LimitsConfig,
}

impl WeatherService {
    pub fn new(source: Arc<dyn WeatherSource>, limits: LimitsConfig) -> Self {
        Self { source, limits }
    }

    /// Location, current conditions, forecast, hourly forecast and alerts for a coordinate
    #[instrument(skip(self))]
    pub async fn weather(&self, lat: f64, lon: f64) -> Result<WeatherReport> {
        let start_time = Instant::now();

        let points = self.source.points(lat, lon).await?;
        let properties = points.properties;

        let forecast_url = properties
            .forecast
            .as_deref()
            .ok_or(WeatherProxyError::MissingForecastUrl)?;
        let forecast = self.source.forecast(forecast_url).await?.properties;

        let hourly = self.hourly_periods(&properties).await;
        let alerts = self.zone_alerts(&properties).await;

        let mut periods = forecast.periods;
        periods.truncate(self.limits.forecast_periods);
        let current = periods.first().cloned();
        let location = properties.to_location(lat, lon);

        info!(
            "Weather for {}: {} periods, {} hourly, {} alerts in {:.3}s",
            location.display_name(),
            periods.len(),
            hourly.len(),
            alerts.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(WeatherReport {
            success: true,
            location,
            current,
            forecast: periods,
            hourly,
            alerts,
            updated: forecast.update_time,
        })
    }

    /// Every active alert for the coordinate's forecast zone
    #[instrument(skip(self))]
    pub async fn alerts(&self, lat: f64, lon: f64) -> Result<AlertsReport> {
        let points = self.source.points(lat, lon).await?;

        let Some(zone_id) = points.properties.zone_id() else {
            debug!("No forecast zone for {:.4}, {:.4}", lat, lon);
            return Ok(AlertsReport::empty());
        };

        let collection = self.source.active_alerts(zone_id).await?;
        let alerts: Vec<AlertDetail> = collection
            .features
            .into_iter()
            .map(|feature| feature.properties.into())
            .collect();

        info!("{} active alerts for zone {}", alerts.len(), zone_id);
        Ok(AlertsReport::new(alerts))
    }

    async fn hourly_periods(&self, properties: &PointProperties) -> Vec<ForecastPeriod> {
        let Some(url) = properties.forecast_hourly.as_deref() else {
            return Vec::new();
        };

        match self.source.hourly(url).await {
            Ok(response) => {
                let mut periods = response.properties.periods;
                periods.truncate(self.limits.hourly_periods);
                periods
            }
            Err(e) => {
                warn!("Hourly forecast unavailable, continuing without it: {}", e);
                Vec::new()
            }
        }
    }

    async fn zone_alerts(&self, properties: &PointProperties) -> Vec<Alert> {
        let Some(zone_id) = properties.zone_id() else {
            return Vec::new();
        };

        match self.source.active_alerts(zone_id).await {
            Ok(collection) => collection
                .features
                .into_iter()
                .take(self.limits.weather_alerts)
                .map(|feature| feature.properties.into())
                .collect(),
            Err(e) => {
                warn!("Alerts unavailable for zone {}, continuing without them: {}", zone_id, e);
                Vec::new()
            }
        }
    }
}

//! NWS API response structures
//!
//! Only the parts of the GeoJSON documents the proxy reads are modelled.
//! Every field is optional so a sparse upstream document never fails a request.

use serde::Deserialize;

use crate::models::{Alert, AlertDetail, ForecastPeriod, Location};

/// `GET /points/{lat},{lon}`
#[derive(Debug, Deserialize, Default)]
pub struct PointsResponse {
    #[serde(default)]
    pub properties: PointProperties,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PointProperties {
    /// Absolute URL of the 12-hour period forecast
    pub forecast: Option<String>,
    /// Absolute URL of the hourly forecast
    pub forecast_hourly: Option<String>,
    pub forecast_office: Option<String>,
    pub grid_id: Option<String>,
    pub grid_x: Option<i64>,
    pub grid_y: Option<i64>,
    /// Absolute URL of the public forecast zone, ends with the zone id
    pub forecast_zone: Option<String>,
    pub relative_location: Option<RelativeLocation>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RelativeLocation {
    #[serde(default)]
    pub properties: RelativeLocationProperties,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RelativeLocationProperties {
    pub city: Option<String>,
    pub state: Option<String>,
}

impl PointProperties {
    /// Location payload for the queried coordinate
    #[must_use]
    pub fn to_location(&self, lat: f64, lon: f64) -> Location {
        let relative = self.relative_location.as_ref().map(|r| &r.properties);
        Location {
            lat,
            lon,
            city: relative.and_then(|p| p.city.clone()),
            state: relative.and_then(|p| p.state.clone()),
            grid_id: self.grid_id.clone(),
        }
    }

    /// Zone id of the forecast zone, if the grid point has one
    #[must_use]
    pub fn zone_id(&self) -> Option<&str> {
        self.forecast_zone.as_deref().and_then(super::zone_id)
    }
}

/// Forecast and hourly forecast documents share one shape
#[derive(Debug, Deserialize, Default)]
pub struct ForecastResponse {
    #[serde(default)]
    pub properties: ForecastProperties,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ForecastProperties {
    pub update_time: Option<String>,
    pub periods: Vec<ForecastPeriod>,
}

/// `GET /alerts/active/zone/{zoneId}`
#[derive(Debug, Deserialize, Default)]
pub struct AlertCollection {
    #[serde(default)]
    pub features: Vec<AlertFeature>,
}

#[derive(Debug, Deserialize, Default)]
pub struct AlertFeature {
    #[serde(default)]
    pub properties: AlertProperties,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct AlertProperties {
    pub event: Option<String>,
    pub headline: Option<String>,
    pub severity: Option<String>,
    pub urgency: Option<String>,
    pub certainty: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
    pub onset: Option<String>,
    pub expires: Option<String>,
}

impl From<AlertProperties> for Alert {
    fn from(props: AlertProperties) -> Self {
        Self {
            event: props.event,
            headline: props.headline,
            severity: props.severity,
            urgency: props.urgency,
            description: props.description,
            instruction: props.instruction,
        }
    }
}

impl From<AlertProperties> for AlertDetail {
    fn from(props: AlertProperties) -> Self {
        let certainty = props.certainty.clone();
        let onset = props.onset.clone();
        let expires = props.expires.clone();
        Self {
            summary: props.into(),
            certainty,
            onset,
            expires,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_points_response_parsing() {
        let doc = json!({
            "@context": [],
            "id": "https://api.weather.gov/points/38.8894,-77.0352",
            "type": "Feature",
            "properties": {
                "gridId": "LWX",
                "gridX": 97,
                "gridY": 71,
                "forecastOffice": "https://api.weather.gov/offices/LWX",
                "forecast": "https://api.weather.gov/gridpoints/LWX/97,71/forecast",
                "forecastHourly": "https://api.weather.gov/gridpoints/LWX/97,71/forecast/hourly",
                "forecastZone": "https://api.weather.gov/zones/forecast/DCZ001",
                "relativeLocation": {
                    "type": "Feature",
                    "properties": {"city": "Washington", "state": "DC"}
                }
            }
        });

        let points: PointsResponse = serde_json::from_value(doc).unwrap();
        let props = &points.properties;
        assert_eq!(props.grid_x, Some(97));
        assert_eq!(props.zone_id(), Some("DCZ001"));

        let location = props.to_location(38.8894, -77.0352);
        assert_eq!(location.city.as_deref(), Some("Washington"));
        assert_eq!(location.state.as_deref(), Some("DC"));
        assert_eq!(location.grid_id.as_deref(), Some("LWX"));
    }

    #[test]
    fn test_sparse_documents_parse() {
        let points: PointsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(points.properties.forecast.is_none());
        assert!(points.properties.zone_id().is_none());
        assert_eq!(points.properties.to_location(1.0, 2.0), Location::new(1.0, 2.0));

        let forecast: ForecastResponse =
            serde_json::from_value(json!({"properties": {}})).unwrap();
        assert!(forecast.properties.periods.is_empty());

        let alerts: AlertCollection =
            serde_json::from_value(json!({"type": "FeatureCollection"})).unwrap();
        assert!(alerts.features.is_empty());
    }

    #[test]
    fn test_alert_conversions() {
        let props = AlertProperties {
            event: Some("Heat Advisory".to_string()),
            certainty: Some("Likely".to_string()),
            onset: Some("2026-07-01T11:00:00-04:00".to_string()),
            ..AlertProperties::default()
        };

        let detail = AlertDetail::from(props.clone());
        assert_eq!(detail.summary.event.as_deref(), Some("Heat Advisory"));
        assert_eq!(detail.certainty.as_deref(), Some("Likely"));

        let summary = Alert::from(props);
        assert_eq!(summary.event.as_deref(), Some("Heat Advisory"));
    }
}

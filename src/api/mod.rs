//! JSON API: `/weather` and `/alerts`, nested under `/api` by the web layer

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use crate::models::{AlertsReport, WeatherReport};
use crate::service::WeatherService;
use crate::{Result, WeatherProxyError};

#[derive(Clone)]
pub struct AppState {
    pub service: WeatherService,
}

/// Raw `?lat=&lon=` query, both required
#[derive(Debug, Deserialize)]
pub struct CoordinateQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl CoordinateQuery {
    /// Checked `(lat, lon)` pair
    pub fn validate(&self) -> Result<(f64, f64)> {
        let lat = self
            .lat
            .ok_or_else(|| WeatherProxyError::validation("Query parameter 'lat' is required"))?;
        let lon = self
            .lon
            .ok_or_else(|| WeatherProxyError::validation("Query parameter 'lon' is required"))?;

        if !(-90.0..=90.0).contains(&lat) {
            return Err(WeatherProxyError::validation(format!(
                "Latitude must be between -90 and 90, got: {lat}"
            )));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(WeatherProxyError::validation(format!(
                "Longitude must be between -180 and 180, got: {lon}"
            )));
        }

        Ok((lat, lon))
    }
}

type CoordinateExtract = std::result::Result<Query<CoordinateQuery>, QueryRejection>;

fn coordinates(query: CoordinateExtract) -> Result<(f64, f64)> {
    let Query(query) =
        query.map_err(|rejection| WeatherProxyError::validation(rejection.body_text()))?;
    query.validate()
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/alerts", get(get_alerts))
        .with_state(state)
}

async fn get_weather(
    State(state): State<AppState>,
    query: CoordinateExtract,
) -> Result<Json<WeatherReport>> {
    let (lat, lon) = coordinates(query)?;
    let report = state.service.weather(lat, lon).await?;
    Ok(Json(report))
}

async fn get_alerts(
    State(state): State<AppState>,
    query: CoordinateExtract,
) -> Result<Json<AlertsReport>> {
    let (lat, lon) = coordinates(query)?;
    let report = state.service.alerts(lat, lon).await?;
    Ok(Json(report))
}

impl IntoResponse for WeatherProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed with {}: {}", status, self);
        } else {
            warn!("Request rejected with {}: {}", status, self);
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(38.8894), Some(-77.0352), true)]
    #[case(Some(90.0), Some(180.0), true)]
    #[case(Some(-90.0), Some(-180.0), true)]
    #[case(Some(90.5), Some(0.0), false)]
    #[case(Some(0.0), Some(-180.1), false)]
    #[case(Some(f64::NAN), Some(0.0), false)]
    #[case(None, Some(0.0), false)]
    #[case(Some(0.0), None, false)]
    fn test_coordinate_validation(
        #[case] lat: Option<f64>,
        #[case] lon: Option<f64>,
        #[case] valid: bool,
    ) {
        let query = CoordinateQuery { lat, lon };
        assert_eq!(query.validate().is_ok(), valid);
    }

    #[test]
    fn test_validation_message_names_parameter() {
        let err = CoordinateQuery { lat: None, lon: Some(1.0) }
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("'lat'"));

        let err = CoordinateQuery { lat: Some(95.0), lon: Some(1.0) }
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("Latitude must be between -90 and 90"));
    }
}

//! Forecast period model
//!
//! NWS periods are handed to the frontend exactly as they arrive. The period
//! keeps the raw JSON object; typed views are read from it on demand, so a
//! field with an unexpected shape never fails the forecast decode.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A value with a WMO unit code, e.g. `{"unitCode": "wmoUnit:percent", "value": 40}`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuantitativeValue {
    #[serde(default)]
    pub unit_code: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
}

/// NWS sends a bare number by default and a quantitative value when asked for units
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Temperature {
    Scalar(f64),
    Quantity(QuantitativeValue),
}

impl Temperature {
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Temperature::Scalar(v) => Some(*v),
            Temperature::Quantity(q) => q.value,
        }
    }
}

/// One forecast period (a half day, or an hour for the hourly forecast)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct ForecastPeriod(Map<String, Value>);

impl ForecastPeriod {
    /// The period as NWS sent it
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    fn quantity(&self, key: &str) -> Option<QuantitativeValue> {
        QuantitativeValue::deserialize(self.0.get(key)?).ok()
    }

    #[must_use]
    pub fn number(&self) -> Option<u64> {
        self.0.get("number").and_then(Value::as_u64)
    }

    /// "Tonight", "Monday", ... (empty for hourly periods)
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    #[must_use]
    pub fn start_time(&self) -> Option<&str> {
        self.str_field("startTime")
    }

    #[must_use]
    pub fn is_daytime(&self) -> Option<bool> {
        self.0.get("isDaytime").and_then(Value::as_bool)
    }

    #[must_use]
    pub fn temperature(&self) -> Option<Temperature> {
        Temperature::deserialize(self.0.get("temperature")?).ok()
    }

    #[must_use]
    pub fn temperature_unit(&self) -> Option<&str> {
        self.str_field("temperatureUnit")
    }

    #[must_use]
    pub fn relative_humidity(&self) -> Option<QuantitativeValue> {
        self.quantity("relativeHumidity")
    }

    #[must_use]
    pub fn probability_of_precipitation(&self) -> Option<QuantitativeValue> {
        self.quantity("probabilityOfPrecipitation")
    }

    /// Human text such as "5 to 10 mph"
    #[must_use]
    pub fn wind_speed(&self) -> Option<&str> {
        self.str_field("windSpeed")
    }

    #[must_use]
    pub fn wind_direction(&self) -> Option<&str> {
        self.str_field("windDirection")
    }

    #[must_use]
    pub fn short_forecast(&self) -> Option<&str> {
        self.str_field("shortForecast")
    }

    /// Temperature with its unit, e.g. "72°F"
    #[must_use]
    pub fn format_temperature(&self) -> Option<String> {
        let value = self.temperature()?.value()?;
        let unit = self.temperature_unit().unwrap_or("");
        Some(format!("{value:.0}°{unit}"))
    }
}

impl From<Map<String, Value>> for ForecastPeriod {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

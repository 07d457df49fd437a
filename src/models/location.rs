//! Location model for the queried coordinate

use serde::{Deserialize, Serialize};

/// The queried coordinate and the NWS metadata attached to it
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
    /// Nearest city reported by NWS
    pub city: Option<String>,
    /// Two-letter state of the nearest city
    pub state: Option<String>,
    /// Forecast office id (e.g. "LWX")
    pub grid_id: Option<String>,
}

impl Location {
    /// Create a location without NWS metadata
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            city: None,
            state: None,
            grid_id: None,
        }
    }

    /// "City, ST" when NWS named the place, the coordinates otherwise
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.city, &self.state) {
            (Some(city), Some(state)) => format!("{city}, {state}"),
            _ => self.format_coordinates(),
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lon)
    }
}

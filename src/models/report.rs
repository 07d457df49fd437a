//! Assembled endpoint payloads

use serde::{Deserialize, Serialize};

use super::{Alert, AlertDetail, ForecastPeriod, Location};

/// Payload of `GET /api/weather`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeatherReport {
    pub success: bool,
    pub location: Location,
    /// First forecast period, if NWS returned any
    pub current: Option<ForecastPeriod>,
    pub forecast: Vec<ForecastPeriod>,
    pub hourly: Vec<ForecastPeriod>,
    pub alerts: Vec<Alert>,
    /// `updateTime` of the forecast
    pub updated: Option<String>,
}

/// Payload of `GET /api/alerts`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AlertsReport {
    pub success: bool,
    pub count: usize,
    pub alerts: Vec<AlertDetail>,
}

impl AlertsReport {
    #[must_use]
    pub fn new(alerts: Vec<AlertDetail>) -> Self {
        Self {
            success: true,
            count: alerts.len(),
            alerts,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alerts_report_count_matches() {
        let report = AlertsReport::new(vec![AlertDetail::default(), AlertDetail::default()]);
        assert!(report.success);
        assert_eq!(report.count, 2);

        let empty = AlertsReport::empty();
        assert_eq!(empty.count, 0);
        assert!(empty.alerts.is_empty());
    }
}

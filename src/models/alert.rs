//! Active alert models

use serde::{Deserialize, Serialize};

/// Alert summary embedded in the weather payload
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Alert {
    /// e.g. "Winter Storm Warning"
    pub event: Option<String>,
    pub headline: Option<String>,
    /// Extreme, Severe, Moderate, Minor, Unknown
    pub severity: Option<String>,
    /// Immediate, Expected, Future, Past, Unknown
    pub urgency: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
}

/// Alert as returned by the alerts endpoint
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AlertDetail {
    #[serde(flatten)]
    pub summary: Alert,
    pub certainty: Option<String>,
    /// RFC 3339 timestamps, passed through as sent
    pub onset: Option<String>,
    pub expires: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_flattens_summary() {
        let detail = AlertDetail {
            summary: Alert {
                event: Some("Flood Watch".to_string()),
                severity: Some("Severe".to_string()),
                ..Alert::default()
            },
            certainty: Some("Possible".to_string()),
            onset: None,
            expires: Some("2026-10-18T06:00:00-04:00".to_string()),
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["event"], "Flood Watch");
        assert_eq!(json["certainty"], "Possible");
        assert!(json["onset"].is_null());
        assert!(json.get("summary").is_none());
    }

    #[test]
    fn test_summary_keeps_missing_fields_as_null() {
        let json = serde_json::to_value(Alert::default()).unwrap();
        for key in ["event", "headline", "severity", "urgency", "description", "instruction"] {
            assert!(json[key].is_null(), "{key} should be null");
        }
    }
}

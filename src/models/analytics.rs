use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::validation::{FieldErrors, Validate};

pub const ANALYTICS_METRICS: &[&str] = &["revenue", "clients", "projects", "appointments"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsRequest {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default = "default_metrics")]
    pub metrics: Vec<String>,
}

fn default_metrics() -> Vec<String> {
    ANALYTICS_METRICS.iter().map(|m| m.to_string()).collect()
}

impl AnalyticsRequest {
    pub fn wants(&self, metric: &str) -> bool {
        self.metrics.iter().any(|m| m == metric)
    }
}

impl Validate for AnalyticsRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        for metric in &self.metrics {
            if !ANALYTICS_METRICS.contains(&metric.as_str()) {
                errors.push(
                    "metrics",
                    format!("unknown metric '{}', expected one of: {}", metric,
                        ANALYTICS_METRICS.join(", ")),
                );
            }
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_to_all_metrics() {
        let req: AnalyticsRequest = serde_json::from_value(json!({
            "start_date": "2025-01-01T00:00:00Z",
            "end_date": "2025-01-31T23:59:59Z"
        }))
        .expect("deserialize");
        assert_eq!(req.metrics.len(), 4);
        assert!(req.wants("revenue"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_metric() {
        let req: AnalyticsRequest = serde_json::from_value(json!({
            "start_date": "2025-01-01T00:00:00Z",
            "end_date": "2025-01-31T23:59:59Z",
            "metrics": ["revenue", "weather"]
        }))
        .expect("deserialize");
        assert!(req.validate().is_err());
    }
}

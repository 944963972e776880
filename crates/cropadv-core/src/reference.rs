//! Reference data and health responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of `GET /states/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatesResponse {
    #[serde(default)]
    pub states: Vec<String>,
}

/// Response of `GET /districts/{state}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictsResponse {
    /// Normalized state name echoed by the server, when it sends one.
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub districts: Vec<String>,
}

/// Response of `GET /months/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthsResponse {
    #[serde(default)]
    pub months: Vec<String>,
}

/// Response of `GET /health`. The shape belongs to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthStatus(Value);

impl HealthStatus {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// The top-level `status` string, if the server reports one.
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    pub fn is_healthy(&self) -> bool {
        self.status() == Some("healthy")
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_lists_default_to_empty() {
        let states: StatesResponse = serde_json::from_value(json!({})).unwrap();
        let districts: DistrictsResponse =
            serde_json::from_value(json!({"state": "PUNJAB"})).unwrap();

        assert!(states.states.is_empty());
        assert!(districts.districts.is_empty());
        assert_eq!(districts.state.as_deref(), Some("PUNJAB"));
    }

    #[test]
    fn health_status_reads_status_field() {
        let health = HealthStatus::new(json!({"status": "healthy", "services": {"weather": "ok"}}));
        assert!(health.is_healthy());
        assert_eq!(health.raw()["services"]["weather"], json!("ok"));

        let odd = HealthStatus::new(json!("up"));
        assert_eq!(odd.status(), None);
        assert!(!odd.is_healthy());
    }
}

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::{SharedState, StatsSnapshot};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub service_name: String,
    pub api_key_configured: bool,
    pub stats: StatsSnapshot,
}

/// Determine the overall health status string.
/// Without an API key every test plan webhook is answered with 500.
pub fn determine_overall_status(api_key_configured: bool) -> &'static str {
    if api_key_configured {
        "healthy"
    } else {
        "degraded"
    }
}

pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(build_health_response(&state))
}

pub fn build_health_response(state: &SharedState) -> HealthResponse {
    let api_key_configured = state.config.api_key_configured();

    HealthResponse {
        status: determine_overall_status(api_key_configured).to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        service_name: state.config.service_name.clone(),
        api_key_configured,
        stats: state.stats.snapshot(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_healthy_when_api_key_configured() {
        assert_eq!(determine_overall_status(true), "healthy");
    }

    #[test]
    fn test_degraded_without_api_key() {
        assert_eq!(determine_overall_status(false), "degraded");
    }

    #[test]
    fn test_health_response_serializes_to_json() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            service_name: "web".to_string(),
            api_key_configured: true,
            stats: StatsSnapshot {
                events_received: 3,
                events_rejected: 1,
                metrics_posted: 2,
                delivery_failures: 0,
            },
        };

        let json = serde_json::to_string(&response).expect("should serialize");
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"service_name\":\"web\""));
        assert!(json.contains("\"api_key_configured\":true"));
        assert!(json.contains("\"events_received\":3"));
        assert!(json.contains("\"metrics_posted\":2"));
    }
}

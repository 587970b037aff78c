use axum::extract::State;
use axum::http::StatusCode;
use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};

use crate::error::WebhookError;
use crate::metrics::{build_metric_values, ScenarioTally};
use crate::models::TestPlanWebhook;
use crate::state::SharedState;

/// Receives an Autify test plan webhook and posts the pass/fail counts to
/// Mackerel.
///
/// Mackerel failures are logged and counted but still answered with 200.
pub async fn receive_test_plan(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<StatusCode, WebhookError> {
    state.stats.record_received();

    let result = forward_test_plan(&state, &body).await;
    if result.is_err() {
        state.stats.record_rejected();
    }
    result
}

async fn forward_test_plan(state: &SharedState, body: &[u8]) -> Result<StatusCode, WebhookError> {
    let event: TestPlanWebhook = serde_json::from_slice(body).map_err(|e| {
        warn!(
            "Malformed webhook payload ({}). detail: {}",
            e,
            String::from_utf8_lossy(body)
        );
        WebhookError::MalformedPayload(e)
    })?;

    let Some(scenarios) = event.scenarios.as_deref() else {
        warn!(
            "Received a webhook without scenarios, ignoring. detail: {}",
            String::from_utf8_lossy(body)
        );
        return Err(WebhookError::NotTestPlanEvent);
    };

    let tally = ScenarioTally::from_scenarios(scenarios);

    let Some(sink) = state.sink.as_ref() else {
        warn!("Mackerel API key is required");
        return Err(WebhookError::MissingApiKey);
    };

    let service_name = &state.config.service_name;
    let values = build_metric_values(service_name, tally, Utc::now().timestamp());

    info!(
        test_plan_id = event.test_plan.id,
        result_id = event.id,
        passed = tally.passed,
        not_passed = tally.not_passed,
        "Posting test plan result to Mackerel service {}",
        service_name
    );

    match sink.post_service_metric_values(service_name, &values).await {
        Ok(()) => state.stats.record_posted(),
        Err(e) => {
            warn!("Failed to post metrics to Mackerel: {}", e);
            state.stats.record_delivery_failure();
        }
    }

    Ok(StatusCode::OK)
}

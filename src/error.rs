use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Malformed webhook payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Not a test plan webhook (no scenarios)")]
    NotTestPlanEvent,

    #[error("Mackerel API key is required")]
    MissingApiKey,
}

impl WebhookError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebhookError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            WebhookError::NotTestPlanEvent => StatusCode::BAD_REQUEST,
            WebhookError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Autify only looks at the status code, so no body is sent.
impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        self.status().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            WebhookError::MalformedPayload(parse_err).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(WebhookError::NotTestPlanEvent.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            WebhookError::MissingApiKey.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_response_has_status_only() {
        let resp = WebhookError::MissingApiKey.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.headers().get(axum::http::header::CONTENT_TYPE).is_none());
    }
}

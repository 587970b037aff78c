use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::config::WEBHOOK_PATH;
use crate::state::SharedState;

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        // Health
        .route("/health", get(crate::routes::health::health))
        // Autify webhook
        .route(WEBHOOK_PATH, post(crate::routes::webhook::receive_test_plan))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::WebhookConfig;
use crate::mackerel::MetricsSink;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: WebhookConfig,
    /// `None` when no Mackerel API key is configured.
    pub sink: Option<Arc<dyn MetricsSink>>,
    pub stats: WebhookStats,
}

impl AppState {
    pub fn new(config: WebhookConfig, sink: Option<Arc<dyn MetricsSink>>) -> Self {
        Self {
            config,
            sink,
            stats: WebhookStats::default(),
        }
    }
}

#[derive(Default)]
pub struct WebhookStats {
    events_received: AtomicU64,
    events_rejected: AtomicU64,
    metrics_posted: AtomicU64,
    delivery_failures: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub events_received: u64,
    pub events_rejected: u64,
    pub metrics_posted: u64,
    pub delivery_failures: u64,
}

impl WebhookStats {
    pub fn record_received(&self) {
        self.events_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.events_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_posted(&self) {
        self.metrics_posted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivery_failure(&self) {
        self.delivery_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            events_received: self.events_received.load(Ordering::Relaxed),
            events_rejected: self.events_rejected.load(Ordering::Relaxed),
            metrics_posted: self.metrics_posted.load(Ordering::Relaxed),
            delivery_failures: self.delivery_failures.load(Ordering::Relaxed),
        }
    }
}

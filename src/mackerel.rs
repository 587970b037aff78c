//! Mackerel service metric submission.
//!
//! The webhook handler only sees [`MetricsSink`]; [`MackerelClient`] is the
//! production implementation.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::config::{WebhookConfig, MACKEREL_API_KEY_HEADER};
use crate::metrics::MetricValue;

#[derive(Debug, thiserror::Error)]
pub enum MackerelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Mackerel rejected metrics ({status}): {body}")]
    Rejected { status: StatusCode, body: String },
}

#[async_trait]
pub trait MetricsSink: Send + Sync {
    /// Posts a batch of metric values under `service_name`.
    async fn post_service_metric_values(
        &self,
        service_name: &str,
        values: &[MetricValue],
    ) -> Result<(), MackerelError>;
}

pub struct MackerelClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MackerelClient {
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Builds a client from config. Returns `Ok(None)` when no API key is
    /// configured.
    pub fn from_config(config: &WebhookConfig) -> Result<Option<Self>, MackerelError> {
        let Some(api_key) = config.mackerel_api_key.as_deref() else {
            return Ok(None);
        };
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(4)
            .build()?;
        Ok(Some(Self::new(
            http_client,
            config.mackerel_base_url.clone(),
            api_key,
        )))
    }

    pub fn service_metrics_url(&self, service_name: &str) -> String {
        format!("{}/api/v0/services/{}/tsdb", self.base_url, service_name)
    }
}

#[async_trait]
impl MetricsSink for MackerelClient {
    async fn post_service_metric_values(
        &self,
        service_name: &str,
        values: &[MetricValue],
    ) -> Result<(), MackerelError> {
        let url = self.service_metrics_url(service_name);
        let resp = self
            .http_client
            .post(&url)
            .header(MACKEREL_API_KEY_HEADER, &self.api_key)
            .json(values)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MackerelError::Rejected { status, body });
        }

        debug!("Posted {} metric values to {}", values.len(), url);
        Ok(())
    }
}

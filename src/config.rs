use clap::Parser;
use std::time::Duration;

/// autify2mackerel — forwards Autify test plan results to Mackerel service metrics.
#[derive(Parser, Debug, Clone)]
#[command(name = "autify2mackerel")]
pub struct CliArgs {
    /// HTTP listen port
    #[arg(long = "port", env = "PORT")]
    pub port: Option<u16>,

    /// Mackerel API key used to post service metrics
    #[arg(long = "mackerel-api-key", env = "MACKEREL_APIKEY", hide_env_values = true)]
    pub mackerel_api_key: Option<String>,

    /// Mackerel service the metrics are posted under (also the metric name prefix)
    #[arg(long = "service-name", env = "SERVICE_NAME")]
    pub service_name: Option<String>,

    /// Mackerel API base URL
    #[arg(long = "mackerel-base-url", env = "MACKEREL_BASE_URL", default_value = MACKEREL_API_BASE)]
    pub mackerel_base_url: String,

    /// Timeout for the outbound Mackerel request, in seconds
    #[arg(long = "timeout-secs", env = "MACKEREL_TIMEOUT_SECS", default_value_t = MACKEREL_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub port: u16,
    pub mackerel_api_key: Option<String>,
    pub service_name: String,
    pub mackerel_base_url: String,
    pub timeout: Duration,
}

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SERVICE_NAME: &str = "hoge";
pub const WEBHOOK_PATH: &str = "/autify2mackerel";

// Mackerel
pub const MACKEREL_API_BASE: &str = "https://api.mackerelio.com";
pub const MACKEREL_API_KEY_HEADER: &str = "X-Api-Key";
pub const MACKEREL_TIMEOUT_SECS: u64 = 10;

impl WebhookConfig {
    pub fn from_args(args: CliArgs) -> Self {
        // Empty env values count as unset.
        let mackerel_api_key = args.mackerel_api_key.filter(|k| !k.is_empty());
        let service_name = args
            .service_name
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());

        WebhookConfig {
            port: args.port.unwrap_or(DEFAULT_PORT),
            mackerel_api_key,
            service_name,
            mackerel_base_url: args.mackerel_base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(args.timeout_secs),
        }
    }

    pub fn api_key_configured(&self) -> bool {
        self.mackerel_api_key.is_some()
    }
}

//! Runtime configuration
//!
//! All configuration is read once at startup and carried in an explicit
//! struct; nothing in this crate consults the environment after that.
//!
//! Environment variables:
//! - `CVWATCH_WEBHOOK_URL`: outbound chat-webhook endpoint. Alerting is
//!   permanently disabled for the process when unset or empty.
//! - `CVWATCH_METRICS_ENABLED`: "true" or "1" to attach HTTP instrumentation
//!   and the `/metrics` scrape route (default: disabled).

/// Monitoring configuration, populated once at service startup
#[derive(Debug, Clone, Default)]
pub struct MonitorConfig {
    /// Outbound webhook endpoint; `None` disables alert delivery entirely
    pub webhook_url: Option<String>,
    /// Whether to expose request instrumentation and the scrape endpoint
    pub metrics_enabled: bool,
}

impl MonitorConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Self {
        let webhook_url = std::env::var("CVWATCH_WEBHOOK_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let metrics_enabled = std::env::var("CVWATCH_METRICS_ENABLED")
            .map(|v| truthy(&v))
            .unwrap_or(false);

        Self {
            webhook_url,
            metrics_enabled,
        }
    }
}

fn truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1")
}

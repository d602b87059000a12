//! Alert dispatch with fail-open delivery

use std::str::FromStr;

use chrono::Utc;

use super::embed::{Embed, EmbedField, EmbedFooter, WebhookPayload, FOOTER_TEXT, SENDER_NAME};
use crate::config::MonitorConfig;

/// Alert severity, in increasing order of urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// Sidebar color shown by the remote chat service
    pub fn color(&self) -> u32 {
        match self {
            Self::Info => 3_447_003,      // blue #3498db
            Self::Warning => 16_776_960,  // yellow #ffff00
            Self::Error => 15_158_332,    // red #e74c3c
            Self::Critical => 10_038_562, // dark red #992d22
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for Severity {
    type Err = std::convert::Infallible;

    /// Unrecognized names fall back to `Info` rather than failing
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "warning" => Self::Warning,
            "error" => Self::Error,
            "critical" => Self::Critical,
            _ => Self::Info,
        })
    }
}

/// Sends rich webhook alerts for service incidents.
///
/// The endpoint is captured once at construction; when none is configured
/// the dispatcher stays disabled for its whole lifetime and every send is a
/// silent no-op.
pub struct AlertDispatcher {
    endpoint: Option<String>,
    client: reqwest::Client,
}

impl AlertDispatcher {
    /// Create a dispatcher from the startup configuration
    pub fn new(config: &MonitorConfig) -> Self {
        let endpoint = config
            .webhook_url
            .clone()
            .filter(|url| !url.trim().is_empty());

        if endpoint.is_none() {
            tracing::info!("No webhook endpoint configured, alerting disabled");
        }

        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    /// Whether a webhook endpoint was configured at construction
    pub fn enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Send one alert to the configured endpoint.
    ///
    /// Never fails the caller: with no endpoint configured it returns
    /// immediately, and any transport failure (connection error, timeout,
    /// non-2xx status) is logged at warn level and dropped. One outbound
    /// request per call, no retries, no queuing.
    ///
    /// `fields` is an ordered list of metric name/value pairs displayed
    /// inside the embed; the remote caps embeds at 25 fields, which is not
    /// validated here.
    pub async fn send_alert(
        &self,
        title: &str,
        message: &str,
        severity: Severity,
        fields: &[(&str, String)],
    ) {
        let Some(endpoint) = self.endpoint.as_deref() else {
            return;
        };

        let payload = build_payload(title, message, severity, fields);

        match self.post(endpoint, &payload).await {
            Ok(()) => {
                tracing::debug!(title = %title, severity = %severity.as_str(), "Alert delivered");
            }
            Err(e) => {
                tracing::warn!(
                    title = %title,
                    severity = %severity.as_str(),
                    error = %e,
                    "Failed to deliver alert"
                );
            }
        }
    }

    async fn post(&self, endpoint: &str, payload: &WebhookPayload) -> Result<(), AlertError> {
        let response = self.client.post(endpoint).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AlertError::Status(status.as_u16()));
        }

        Ok(())
    }
}

fn build_payload(
    title: &str,
    message: &str,
    severity: Severity,
    fields: &[(&str, String)],
) -> WebhookPayload {
    let fields = fields
        .iter()
        .map(|(name, value)| EmbedField {
            name: (*name).to_string(),
            value: value.clone(),
            inline: true,
        })
        .collect();

    WebhookPayload {
        username: SENDER_NAME,
        embeds: vec![Embed {
            title: format!("🚨 {}", title),
            description: message.to_string(),
            color: severity.color(),
            timestamp: Utc::now().to_rfc3339(),
            footer: EmbedFooter { text: FOOTER_TEXT },
            fields,
        }],
    }
}

/// Alert delivery errors; logged and swallowed inside `send_alert`
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("Webhook request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Webhook returned status {0}")]
    Status(u16),
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn dispatcher_for(url: Option<String>) -> AlertDispatcher {
        AlertDispatcher::new(&MonitorConfig {
            webhook_url: url,
            metrics_enabled: false,
        })
    }

    #[test]
    fn test_severity_colors() {
        assert_eq!(Severity::Info.color(), 3_447_003);
        assert_eq!(Severity::Warning.color(), 16_776_960);
        assert_eq!(Severity::Error.color(), 15_158_332);
        assert_eq!(Severity::Critical.color(), 10_038_562);
    }

    #[test]
    fn test_severity_parse_fallback() {
        assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("CRITICAL".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!("error".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!("info".parse::<Severity>().unwrap(), Severity::Info);

        // Anything unrecognized maps to Info instead of failing
        assert_eq!("fatal".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!("".parse::<Severity>().unwrap(), Severity::Info);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::Error);
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn test_build_payload_shape() {
        let payload = build_payload(
            "Database Connection Lost",
            "PostgreSQL unreachable",
            Severity::Critical,
            &[("Service", "PostgreSQL".to_string())],
        );

        assert_eq!(payload.username, "MLOps Bot");
        assert_eq!(payload.embeds.len(), 1);

        let embed = &payload.embeds[0];
        assert_eq!(embed.title, "🚨 Database Connection Lost");
        assert_eq!(embed.color, Severity::Critical.color());
        assert_eq!(embed.fields.len(), 1);
        assert_eq!(embed.fields[0].name, "Service");
        assert!(embed.fields[0].inline);
    }

    #[tokio::test]
    async fn test_disabled_dispatcher_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let dispatcher = dispatcher_for(None);
        assert!(!dispatcher.enabled());

        // Empty inputs included; must return without any observable effect
        dispatcher.send_alert("", "", Severity::Info, &[]).await;
        dispatcher
            .send_alert("Title", "Message", Severity::Critical, &[])
            .await;
    }

    #[tokio::test]
    async fn test_send_posts_one_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = dispatcher_for(Some(format!("{}/hook", server.uri())));
        assert!(dispatcher.enabled());

        dispatcher
            .send_alert(
                "High Inference Latency",
                "Inference taking 3000ms",
                Severity::Error,
                &[("Latency", "3000ms".to_string())],
            )
            .await;

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);

        let body: serde_json::Value = requests[0].body_json().unwrap();
        assert_eq!(body["username"], "MLOps Bot");
        assert_eq!(body["embeds"][0]["color"], Severity::Error.color());
        assert_eq!(body["embeds"][0]["fields"][0]["value"], "3000ms");
    }

    #[tokio::test]
    async fn test_remote_failure_is_swallowed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = dispatcher_for(Some(server.uri()));

        // Must return normally despite the 500
        dispatcher
            .send_alert("Title", "Message", Severity::Warning, &[])
            .await;
    }

    #[tokio::test]
    async fn test_connection_refused_is_swallowed() {
        // Nothing listens on this port
        let dispatcher = dispatcher_for(Some("http://127.0.0.1:1/hook".to_string()));

        dispatcher
            .send_alert("Title", "Message", Severity::Critical, &[])
            .await;
    }
}

//! Predefined incident notices
//!
//! Thin policy wrappers over `send_alert`: each checks its trigger condition,
//! formats the metric fields as display strings and fires at most one alert
//! per call. The remote display does no numeric formatting of its own, so
//! values are rendered here (percentages, "x1.5" ratios) before sending.

use chrono::Local;

use super::dispatcher::{AlertDispatcher, Severity};

/// Minimum acceptable rolling accuracy before a degradation alert fires
pub const DEFAULT_ACCURACY_THRESHOLD: f64 = 0.85;

/// Maximum tolerable inference latency in milliseconds
pub const DEFAULT_LATENCY_THRESHOLD_MS: f64 = 2000.0;

impl AlertDispatcher {
    /// Warn when rolling model accuracy drops below the threshold.
    ///
    /// Fires exactly one warning when `accuracy < threshold`, nothing
    /// otherwise. The gap field is signed, so a firing alert always shows a
    /// negative percentage.
    pub async fn alert_model_degradation(&self, accuracy: f64, threshold: f64) {
        if accuracy >= threshold {
            return;
        }

        self.send_alert(
            "Model Performance Degradation",
            &format!(
                "Model accuracy ({}) dropped below threshold ({})",
                percent(accuracy),
                percent(threshold)
            ),
            Severity::Warning,
            &[
                ("Current Accuracy", percent(accuracy)),
                ("Threshold", percent(threshold)),
                ("Gap", percent(accuracy - threshold)),
            ],
        )
        .await;
    }

    /// Alert when inference latency exceeds the threshold.
    ///
    /// Fires exactly one error alert when `latency_ms > threshold_ms`. The
    /// slowdown field is the latency/threshold ratio, e.g. "x1.5".
    pub async fn alert_high_latency(&self, latency_ms: f64, threshold_ms: f64) {
        if latency_ms <= threshold_ms {
            return;
        }

        self.send_alert(
            "High Inference Latency",
            &format!(
                "Inference taking {:.0}ms (threshold: {:.0}ms)",
                latency_ms, threshold_ms
            ),
            Severity::Error,
            &[
                ("Latency", format!("{:.0}ms", latency_ms)),
                ("Threshold", format!("{:.0}ms", threshold_ms)),
                ("Slowdown", format!("x{:.1}", latency_ms / threshold_ms)),
            ],
        )
        .await;
    }

    /// Critical notice that the feedback database became unreachable.
    /// Always fires when called.
    pub async fn alert_database_disconnected(&self) {
        self.send_alert(
            "Database Connection Lost",
            "PostgreSQL database is unreachable. All feedback storage is currently disabled.",
            Severity::Critical,
            &[
                ("Service", "PostgreSQL".to_string()),
                ("Impact", "❌ Feedback storage offline".to_string()),
                ("Action", "Check docker logs cv_postgres".to_string()),
            ],
        )
        .await;
    }

    /// Informational notice that a new version finished deploying.
    /// Always fires when called.
    pub async fn alert_deployment_success(&self, version: &str) {
        self.send_alert(
            "Deployment Successful",
            &format!("Version {} deployed successfully to production", version),
            Severity::Info,
            &[
                ("Version", version.to_string()),
                ("Status", "✅ Running".to_string()),
                ("Timestamp", Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
            ],
        )
        .await;
    }

    /// Informational notice that the model served a prediction.
    /// Always fires when called.
    pub async fn alert_new_prediction(&self) {
        self.send_alert(
            "New Prediction",
            "The model served a new prediction",
            Severity::Info,
            &[],
        )
        .await;
    }
}

/// Render a ratio as a signed percentage with two decimals, e.g. "-7.00%"
fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

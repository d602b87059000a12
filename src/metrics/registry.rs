//! Named metric instruments
//!
//! One `prometheus::Registry` per instance holds every instrument the
//! service exports: the model-level family (predictions, latency, feedback,
//! database reachability) and the HTTP family the router layer feeds.

use std::sync::Arc;

use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};

/// Inference latency histogram buckets in seconds
const LATENCY_BUCKETS: &[f64] = &[0.05, 0.1, 0.2, 0.5, 1.0, 2.0, 5.0];

/// Central registry for all service instruments.
///
/// Instruments are created and registered once per instance and are safe to
/// increment, observe and set from any number of concurrent callers. Clones
/// share the same underlying instruments.
#[derive(Clone)]
pub struct MetricRegistry {
    registry: Arc<Registry>,
    model: Arc<ModelMetrics>,
    http: Arc<HttpMetrics>,
}

impl MetricRegistry {
    /// Create a registry with every instrument family registered
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Arc::new(Registry::new());

        let model = Arc::new(ModelMetrics::new(&registry)?);
        let http = Arc::new(HttpMetrics::new(&registry)?);

        Ok(Self {
            registry,
            model,
            http,
        })
    }

    /// The underlying Prometheus registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Model-level instruments
    pub fn model(&self) -> &ModelMetrics {
        &self.model
    }

    /// HTTP request instruments
    pub fn http(&self) -> &HttpMetrics {
        &self.http
    }

    /// Record one served prediction with its outcome class (cat/dog/error)
    pub fn record_prediction(&self, class: &str) {
        self.model.predictions_total.inc();
        self.model
            .predictions_by_class
            .with_label_values(&[class])
            .inc();
    }

    /// Record one inference duration in seconds
    pub fn observe_latency(&self, seconds: f64) {
        self.model.prediction_latency.observe(seconds);
    }

    /// Record one negative feedback against the predicted class
    pub fn record_negative_feedback(&self, class: &str) {
        self.model
            .feedback_negative
            .with_label_values(&[class])
            .inc();
    }

    /// Set last-known database reachability. Last write wins; setting a
    /// gauge cannot fail.
    pub fn update_db_status(&self, is_connected: bool) {
        self.model
            .database_connected
            .set(if is_connected { 1 } else { 0 });
    }

    /// Render all instruments in the Prometheus text exposition format
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

/// Instruments tracking the model's business metrics
pub struct ModelMetrics {
    /// Total predictions served, all classes
    pub predictions_total: IntCounter,
    /// Predictions per outcome class, `label` in {cat, dog, error}
    pub predictions_by_class: IntCounterVec,
    /// Inference latency distribution
    pub prediction_latency: Histogram,
    /// Negative feedback per predicted class, `label` in {cat, dog}
    pub feedback_negative: IntCounterVec,
    /// Database reachability, 1=connected 0=disconnected
    pub database_connected: IntGauge,
}

impl ModelMetrics {
    fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let predictions_total = IntCounter::new(
            "cv_predictions_total",
            "Total number of predictions served",
        )?;
        registry.register(Box::new(predictions_total.clone()))?;

        let predictions_by_class = IntCounterVec::new(
            Opts::new(
                "cv_predictions_by_class_total",
                "Number of predictions per outcome class",
            ),
            &["label"],
        )?;
        registry.register(Box::new(predictions_by_class.clone()))?;

        let prediction_latency = Histogram::with_opts(
            HistogramOpts::new(
                "cv_prediction_latency_seconds",
                "Model inference time in seconds",
            )
            .buckets(LATENCY_BUCKETS.to_vec()),
        )?;
        registry.register(Box::new(prediction_latency.clone()))?;

        let feedback_negative = IntCounterVec::new(
            Opts::new(
                "cv_feedback_negative_total",
                "Number of negative feedbacks per predicted class",
            ),
            &["label"],
        )?;
        registry.register(Box::new(feedback_negative.clone()))?;

        let database_connected = IntGauge::new(
            "cv_database_connected",
            "Database connection status (1=connected, 0=disconnected)",
        )?;
        registry.register(Box::new(database_connected.clone()))?;

        Ok(Self {
            predictions_total,
            predictions_by_class,
            prediction_latency,
            feedback_negative,
            database_connected,
        })
    }
}

/// Per-request instruments fed by the router instrumentation layer
pub struct HttpMetrics {
    /// Completed requests by method, path and status code
    pub requests_total: IntCounterVec,
    /// Request duration by method and path
    pub request_duration: HistogramVec,
    /// Requests currently in flight
    pub in_progress: IntGauge,
}

impl HttpMetrics {
    fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let requests_total = IntCounterVec::new(
            Opts::new(
                "http_requests_total",
                "HTTP requests by method, path and status code",
            ),
            &["method", "path", "status"],
        )?;
        registry.register(Box::new(requests_total.clone()))?;

        let request_duration = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            ),
            &["method", "path"],
        )?;
        registry.register(Box::new(request_duration.clone()))?;

        let in_progress = IntGauge::new(
            "http_requests_in_progress",
            "HTTP requests currently being served",
        )?;
        registry.register(Box::new(in_progress.clone()))?;

        Ok(Self {
            requests_total,
            request_duration,
            in_progress,
        })
    }
}

/// Metric exposition errors
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("Failed to encode metrics: {0}")]
    Encode(#[from] prometheus::Error),

    #[error("Metrics output was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

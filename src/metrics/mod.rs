//! Prometheus instrumentation
//!
//! Process-wide named instruments for the inference service plus an axum
//! integration layer: automatic per-request metrics and a plain-text scrape
//! endpoint for a pull-based collector.

pub mod http;
pub mod registry;

pub use http::instrument_router;
pub use registry::{HttpMetrics, MetricRegistry, MetricsError, ModelMetrics};

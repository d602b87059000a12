//! Cvwatch: Monitoring for a CV Inference Service
//!
//! Operational monitoring for a computer-vision cat/dog classification
//! service: chat-webhook alerting for incidents and Prometheus instruments
//! for a pull-based scraper.
//!
//! # Features
//!
//! - **Webhook Alerts**: rich notifications (severity color, metric fields,
//!   UTC timestamp) pushed to a configured endpoint
//! - **Fail-Open Delivery**: an unconfigured or unreachable endpoint never
//!   fails the caller
//! - **Incident Notices**: threshold-gated checks for model degradation and
//!   inference latency, plus database/deployment/prediction notices
//! - **Prometheus Instruments**: prediction counters, latency histogram,
//!   database gauge, registered once per registry
//! - **Axum Integration**: automatic request instrumentation and a
//!   `GET /metrics` scrape route wired onto the host router
//!
//! # Example
//!
//! ```no_run
//! use axum::Router;
//! use cvwatch::{AlertDispatcher, MetricRegistry, MonitorConfig};
//! use cvwatch::metrics::instrument_router;
//!
//! # async fn setup() -> Result<(), prometheus::Error> {
//! let config = MonitorConfig::from_env();
//!
//! let alerts = AlertDispatcher::new(&config);
//! let registry = MetricRegistry::new()?;
//!
//! // Wire instrumentation and the scrape route onto the service router
//! let app = instrument_router(Router::new(), registry.clone(), &config);
//!
//! // At the relevant call sites:
//! registry.record_prediction("cat");
//! registry.observe_latency(0.12);
//! alerts
//!     .alert_model_degradation(0.78, cvwatch::alerts::DEFAULT_ACCURACY_THRESHOLD)
//!     .await;
//! # Ok(())
//! # }
//! ```

pub mod alerts;
pub mod config;
pub mod metrics;

// Re-export commonly used types
pub use alerts::{AlertDispatcher, AlertError, Severity};
pub use config::MonitorConfig;
pub use metrics::{MetricRegistry, MetricsError};

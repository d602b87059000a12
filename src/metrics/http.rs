//! Axum integration: request instrumentation and the scrape endpoint

use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use super::registry::MetricRegistry;
use crate::config::MonitorConfig;

/// Content type of the Prometheus text exposition format
const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Attach request instrumentation and the `GET /metrics` scrape route to a
/// host router.
///
/// Gated on `config.metrics_enabled`: when disabled the router is returned
/// unchanged and the scrape route does not exist. Expected to run once
/// during service startup; instruments belong to the given registry, so
/// wiring a fresh registry is always well-defined.
pub fn instrument_router(
    router: Router,
    registry: MetricRegistry,
    config: &MonitorConfig,
) -> Router {
    if !config.metrics_enabled {
        tracing::info!("Metrics disabled, scrape endpoint not registered");
        return router;
    }

    tracing::info!("Metrics enabled at /metrics");

    let scrape_route = Router::new()
        .route("/metrics", get(scrape))
        .with_state(registry.clone());

    router
        .merge(scrape_route)
        .layer(middleware::from_fn_with_state(registry, track_request))
}

/// Serve the current value of every instrument as plain text
async fn scrape(State(registry): State<MetricRegistry>) -> Response {
    match registry.encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", e)).into_response()
        }
    }
}

/// Record duration, status and in-flight count for every request
async fn track_request(
    State(registry): State<MetricRegistry>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    registry.http().in_progress.inc();
    let start = Instant::now();
    let response = next.run(req).await;
    registry.http().in_progress.dec();

    registry
        .http()
        .request_duration
        .with_label_values(&[&method, &path])
        .observe(start.elapsed().as_secs_f64());
    registry
        .http()
        .requests_total
        .with_label_values(&[&method, &path, response.status().as_str()])
        .inc();

    response
}

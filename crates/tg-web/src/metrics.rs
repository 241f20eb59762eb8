//! Prometheus metrics for request handling and upstream photo fetches.

use std::{sync::LazyLock, time::Instant};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use regex::Regex;

use crate::topic::Topic;

const DURATION_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

static SEARCH_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/search/[^/]+").expect("search path pattern is valid"));

/// Initialize Prometheus metrics exporter
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            DURATION_BUCKETS,
        )?
        .set_buckets_for_metric(
            Matcher::Full("photo_fetch_duration_seconds".to_string()),
            DURATION_BUCKETS,
        )?
        .install_recorder()?;

    Ok(handle)
}

/// Middleware to record HTTP request metrics
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = normalize_path(req.uri().path());

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(duration);

    response
}

/// Collapse user-chosen search topics so each one doesn't become its own series.
fn normalize_path(path: &str) -> String {
    SEARCH_PATH.replace(path, "/search/:topic").into_owned()
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (StatusCode::OK, handle.render())
}

/// Record one upstream photo fetch.
///
/// `outcome` is `ok`, `stale`, or the error kind of a failed fetch.
pub fn record_photo_fetch(topic: Topic, outcome: &'static str, duration_secs: f64) {
    counter!(
        "photo_fetches_total",
        "topic" => topic.as_str(),
        "outcome" => outcome
    )
    .increment(1);

    histogram!(
        "photo_fetch_duration_seconds",
        "topic" => topic.as_str()
    )
    .record(duration_secs);
}

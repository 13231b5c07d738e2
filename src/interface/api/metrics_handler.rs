//! Prometheus metrics handler

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Initialize the Prometheus metrics exporter
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();

    let handle = builder
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
        )
        .unwrap()
        .install_recorder()
        .unwrap();

    // Describe metrics
    describe_counter!(
        "http_requests_total",
        "Total number of HTTP requests received"
    );
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "voice_tokens_issued_total",
        "Total number of capability tokens issued"
    );
    describe_counter!(
        "voice_calls_initiated_total",
        "Total number of calls created through the provider"
    );
    describe_counter!(
        "voice_call_commands_total",
        "Total number of in-call control commands accepted"
    );
    describe_counter!(
        "voice_call_failures_total",
        "Total number of call operations that failed"
    );

    handle
}

/// HTTP metrics handler
pub async fn metrics_handler(
    axum::extract::State(prometheus_handle): axum::extract::State<PrometheusHandle>,
) -> Response {
    let metrics = prometheus_handle.render();
    (StatusCode::OK, metrics).into_response()
}

/// Record HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: std::time::Duration) {
    counter!("http_requests_total", "method" => method.to_string(), "path" => path.to_string(), "status" => status.to_string())
        .increment(1);
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Record capability token issuance
pub fn record_token_issued() {
    counter!("voice_tokens_issued_total").increment(1);
}

/// Record call creation
pub fn record_call_initiated(direction: &str) {
    counter!("voice_calls_initiated_total", "direction" => direction.to_string()).increment(1);
}

/// Record an accepted in-call command
pub fn record_call_command(command: &str) {
    counter!("voice_call_commands_total", "command" => command.to_string()).increment(1);
}

/// Record a failed call operation
pub fn record_call_failed(operation: &str) {
    counter!("voice_call_failures_total", "operation" => operation.to_string()).increment(1);
}

/// Timer for measuring durations
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

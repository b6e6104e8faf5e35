//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - HTTP request counts and latency by method, route, and status
//! - Active realtime sessions
//! - Realtime admission outcomes
//! - Relayed realtime events by type

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request counter - tracks total requests by method, path, and status code
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests")
            .namespace("presence_chat"),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

/// HTTP request latency histogram - tracks request duration in seconds
pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];
    HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .namespace("presence_chat")
        .buckets(buckets),
        &["method", "path"],
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric")
});

/// Sessions currently held by the presence registry
pub static REALTIME_SESSIONS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::with_opts(
        Opts::new("realtime_sessions_active", "Number of admitted realtime sessions")
            .namespace("presence_chat"),
    )
    .expect("Failed to create REALTIME_SESSIONS_ACTIVE metric")
});

/// Handshake outcomes: admitted, authentication_failed, duplicate_session, conflict
pub static REALTIME_ADMISSIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("realtime_admissions_total", "Realtime handshake outcomes")
            .namespace("presence_chat"),
        &["outcome"],
    )
    .expect("Failed to create REALTIME_ADMISSIONS_TOTAL metric")
});

/// Client events relayed to peers
pub static REALTIME_EVENTS_RELAYED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("realtime_events_relayed_total", "Client events relayed to peers")
            .namespace("presence_chat"),
        &["event"],
    )
    .expect("Failed to create REALTIME_EVENTS_RELAYED_TOTAL metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("Failed to register HTTP_REQUESTS_TOTAL");
    registry
        .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
        .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");
    registry
        .register(Box::new(REALTIME_SESSIONS_ACTIVE.clone()))
        .expect("Failed to register REALTIME_SESSIONS_ACTIVE");
    registry
        .register(Box::new(REALTIME_ADMISSIONS_TOTAL.clone()))
        .expect("Failed to register REALTIME_ADMISSIONS_TOTAL");
    registry
        .register(Box::new(REALTIME_EVENTS_RELAYED_TOTAL.clone()))
        .expect("Failed to register REALTIME_EVENTS_RELAYED_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Helper to record HTTP request metrics
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status = status.to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, status.as_str()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

/// Helper to publish the current presence registry size
pub fn set_active_sessions(count: usize) {
    REALTIME_SESSIONS_ACTIVE.set(count as i64);
}

/// Helper to count a handshake outcome
pub fn record_admission(outcome: &str) {
    REALTIME_ADMISSIONS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Helper to count a relayed client event
pub fn record_relayed_event(event: &str) {
    REALTIME_EVENTS_RELAYED_TOTAL.with_label_values(&[event]).inc();
}

//! Prometheus metrics for the filegate server.
//!
//! Exposes counters for relayed operations, fan-out uploads and upstream
//! failures.
//!
//! # Security Note
//!
//! The `/metrics` endpoint is unauthenticated to allow Prometheus scraping
//! and carries no per-user data, but it does expose aggregate usage. It MUST
//! be network-restricted to authorized scraper IPs at the infrastructure
//! level; disable it via `server.metrics_enabled` otherwise.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::{LazyLock, Once};

/// Global Prometheus registry for all metrics.
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Relayed file operations by kind (list, upload, update, delete, storage).
pub static RELAYED_REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "filegate_relayed_requests_total",
            "Total file operations relayed to the downstream service",
        ),
        &["operation"],
    )
    .expect("metric creation failed")
});

/// Upstream failures by error code.
pub static UPSTREAM_FAILURES: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "filegate_upstream_failures_total",
            "Total downstream service failures by error kind",
        ),
        &["kind"],
    )
    .expect("metric creation failed")
});

// Fan-out metrics
pub static FANOUT_TARGETS: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "filegate_fanout_targets_total",
        "Total per-target uploads attempted during fan-out",
    )
    .expect("metric creation failed")
});

pub static FANOUT_TARGET_FAILURES: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "filegate_fanout_target_failures_total",
        "Total per-target uploads that failed during fan-out",
    )
    .expect("metric creation failed")
});

/// Guard to ensure metrics are only registered once.
static REGISTER_ONCE: Once = Once::new();

/// Register all metrics with the global registry.
///
/// This function is idempotent - subsequent calls after the first are no-ops.
/// This allows safe use in integration tests or when embedding multiple routers.
pub fn register_metrics() {
    REGISTER_ONCE.call_once(|| {
        REGISTRY
            .register(Box::new(RELAYED_REQUESTS.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(UPSTREAM_FAILURES.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(FANOUT_TARGETS.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(FANOUT_TARGET_FAILURES.clone()))
            .expect("metric registration failed");
    });
}

/// Helper to record a relayed operation by kind.
pub fn record_relayed(operation: &str) {
    RELAYED_REQUESTS.with_label_values(&[operation]).inc();
}

/// Helper to record an upstream failure by error code.
pub fn record_upstream_failure(kind: &str) {
    UPSTREAM_FAILURES.with_label_values(&[kind]).inc();
}

/// GET /metrics - Prometheus metrics endpoint.
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}").into_bytes(),
        ),
    }
}

//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Webhook notifications (delivery outcome and latency)
//! - Metrics artifact reads

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Notification Metrics
// =============================================================================

/// Webhook notifications by outcome.
pub static WEBHOOK_NOTIFICATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "inbox_webhook_notifications_total",
            "Ticket update notifications sent to the webhook",
        ),
        &["outcome"], // "delivered", "failed"
    )
    .unwrap()
});

/// Webhook call duration in seconds.
pub static WEBHOOK_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "inbox_webhook_duration_seconds",
            "Duration of webhook notification calls",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
        &["outcome"],
    )
    .unwrap()
});

// =============================================================================
// Metrics Artifact
// =============================================================================

/// Metrics artifact reads by result.
pub static METRICS_ARTIFACT_READS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "inbox_metrics_artifact_reads_total",
            "Reads of the precomputed metrics artifact",
        ),
        &["result"], // "ok", "missing", "corrupt", "unreadable"
    )
    .unwrap()
});

/// All core metrics, for registration in the server registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(WEBHOOK_NOTIFICATIONS.clone()),
        Box::new(WEBHOOK_DURATION.clone()),
        Box::new(METRICS_ARTIFACT_READS.clone()),
    ]
}

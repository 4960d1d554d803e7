//! Prometheus metrics for the careday submission service
//!
//! Provides centralized metrics collection for monitoring:
//! - Submission outcomes per message type
//! - Kafka produce results and latency
//! - Attachment store retries

use anyhow::Result;
use once_cell::sync::Lazy;
use prometheus::{
    Encoder, Histogram, IntCounter, IntCounterVec, TextEncoder, opts, register_histogram,
    register_int_counter, register_int_counter_vec,
};

// ============================================================================
// Submission Metrics
// ============================================================================

/// Submissions received, labeled by message type
pub static SUBMISSIONS_RECEIVED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        opts!(
            "careday_submissions_received_total",
            "Submissions received, labeled by message type"
        ),
        &["message_type"]
    )
    .expect("Failed to register SUBMISSIONS_RECEIVED_TOTAL metric")
});

/// Submissions published to the durable log, labeled by message type
pub static SUBMISSIONS_PUBLISHED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        opts!(
            "careday_submissions_published_total",
            "Submissions published to the durable log, labeled by message type"
        ),
        &["message_type"]
    )
    .expect("Failed to register SUBMISSIONS_PUBLISHED_TOTAL metric")
});

/// Submissions rejected by validation
pub static SUBMISSIONS_REJECTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(opts!(
        "careday_submissions_rejected_total",
        "Submissions rejected by validation"
    ))
    .expect("Failed to register SUBMISSIONS_REJECTED_TOTAL metric")
});

/// Compensating attachment deletions performed after a failed publish
pub static COMPENSATING_DELETES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(opts!(
        "careday_compensating_deletes_total",
        "Compensating attachment deletions performed after a failed publish"
    ))
    .expect("Failed to register COMPENSATING_DELETES_TOTAL metric")
});

// ============================================================================
// Kafka Metrics
// ============================================================================

/// Successful Kafka produce operations
pub static KAFKA_PRODUCE_SUCCESS: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(opts!(
        "careday_kafka_produce_success_total",
        "Successful Kafka produce operations"
    ))
    .expect("Failed to register KAFKA_PRODUCE_SUCCESS metric")
});

/// Failed Kafka produce operations
pub static KAFKA_PRODUCE_FAILURE: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(opts!(
        "careday_kafka_produce_failure_total",
        "Failed Kafka produce operations"
    ))
    .expect("Failed to register KAFKA_PRODUCE_FAILURE metric")
});

/// Histogram of Kafka produce latencies
pub static KAFKA_PRODUCE_LATENCY: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "careday_kafka_produce_latency_seconds",
        "Histogram of Kafka produce latencies"
    )
    .expect("Failed to register KAFKA_PRODUCE_LATENCY metric")
});

// ============================================================================
// Attachment Store Metrics
// ============================================================================

/// Attachment store retries, labeled by operation
pub static ATTACHMENT_RETRIES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        opts!(
            "careday_attachment_retries_total",
            "Attachment store retries, labeled by operation"
        ),
        &["operation"]
    )
    .expect("Failed to register ATTACHMENT_RETRIES_TOTAL metric")
});

/// Render all registered metrics in the Prometheus text exposition format
pub fn gather_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_register_and_increment() {
        SUBMISSIONS_RECEIVED_TOTAL
            .with_label_values(&["coronaTransfer"])
            .inc();
        KAFKA_PRODUCE_SUCCESS.inc();
        let rendered = gather_metrics().unwrap();
        assert!(rendered.contains("careday_submissions_received_total"));
        assert!(rendered.contains("careday_kafka_produce_success_total"));
    }
}

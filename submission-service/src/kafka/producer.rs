// ============================================================================
// Submission Producer
// ============================================================================
//
// Publishes completed records to the submission topic and waits for broker
// acknowledgment before reporting success. The envelope version is checked
// locally before any I/O; a version drift is a programming error upstream,
// not something to send to the broker.
//
// ============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use careday_config::KafkaConfig;
use careday_error::{AppError, AppResult};
use careday_metrics::{KAFKA_PRODUCE_FAILURE, KAFKA_PRODUCE_LATENCY, KAFKA_PRODUCE_SUCCESS};
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use tracing::{error, info};

use super::types::{Metadata, TopicEntry};
use super::RecordPublisher;
use crate::message::CompletedRecord;

/// Queue timeout for one send; overall delivery is bounded by
/// `delivery.timeout.ms`.
const SEND_TIMEOUT: Duration = Duration::from_secs(2);

pub struct SubmissionProducer {
    producer: FutureProducer,
    topic: String,
}

impl SubmissionProducer {
    /// Create the producer from configuration.
    ///
    /// `acks=all` and idempotence keep one accepted submission from ever
    /// turning into two records within a producer session.
    pub fn new(config: &KafkaConfig) -> Result<Self> {
        let mut client_config = ClientConfig::new();
        client_config
            .set("bootstrap.servers", &config.brokers)
            .set("acks", &config.producer_acks)
            .set(
                "enable.idempotence",
                if config.producer_enable_idempotence {
                    "true"
                } else {
                    "false"
                },
            )
            .set(
                "request.timeout.ms",
                config.producer_request_timeout_ms.to_string(),
            )
            .set(
                "delivery.timeout.ms",
                config.producer_delivery_timeout_ms.to_string(),
            );

        if config.ssl_enabled {
            client_config.set("security.protocol", "ssl");
            if let Some(ca_location) = &config.ssl_ca_location {
                client_config.set("ssl.ca.location", ca_location);
            }
        }

        let producer: FutureProducer = client_config
            .create()
            .context("Failed to create Kafka producer")?;

        info!(topic = %config.topic, "Kafka submission producer initialized");

        Ok(Self {
            producer,
            topic: config.topic.clone(),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

#[async_trait]
impl RecordPublisher for SubmissionProducer {
    async fn publish(
        &self,
        record: &CompletedRecord,
        metadata: &Metadata,
    ) -> AppResult<(i32, i64)> {
        if metadata.version != Metadata::CURRENT_VERSION {
            return Err(AppError::PublishRejected(format!(
                "cannot publish a record with envelope version {}",
                metadata.version
            )));
        }

        let entry = TopicEntry {
            metadata: metadata.clone(),
            data: record,
        };
        let payload = serde_json::to_vec(&entry)?;

        let kafka_record = FutureRecord::to(&self.topic)
            .key(record.submission_id())
            .payload(&payload);

        let start = std::time::Instant::now();

        match self
            .producer
            .send(kafka_record, Timeout::After(SEND_TIMEOUT))
            .await
        {
            Ok((partition, offset)) => {
                let latency = start.elapsed();
                KAFKA_PRODUCE_SUCCESS.inc();
                KAFKA_PRODUCE_LATENCY.observe(latency.as_secs_f64());

                info!(
                    submission_id = %record.submission_id(),
                    topic = %self.topic,
                    partition = partition,
                    offset = offset,
                    latency_ms = latency.as_millis() as u64,
                    "Submission persisted to the durable log"
                );

                Ok((partition, offset))
            }
            Err((kafka_err, _)) => {
                KAFKA_PRODUCE_FAILURE.inc();

                error!(
                    submission_id = %record.submission_id(),
                    topic = %self.topic,
                    error = %kafka_err,
                    "Failed to publish submission to the durable log"
                );

                Err(AppError::kafka(format!(
                    "publish to '{}' failed: {}",
                    self.topic, kafka_err
                )))
            }
        }
    }
}

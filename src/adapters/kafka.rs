//! Kafka producer for outbound notification events
//!
//! Publishes JSON envelopes to the emails topic. A separate consumer
//! service turns them into emails; this side only sees accept/reject at
//! publish time.

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::KafkaConfig;
use crate::domain::{NotificationEvent, EMAILS_TOPIC};
use crate::error::{LotoError, Result};
use crate::services::traits::Notifier;

/// Kafka-backed notification dispatcher
#[derive(Clone)]
pub struct KafkaNotifier {
    producer: FutureProducer,
    topic: String,
    timeout: Duration,
}

impl KafkaNotifier {
    /// Create a producer for the configured brokers
    pub fn new(config: &KafkaConfig) -> Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("client.id", &config.client_id)
            .set("message.timeout.ms", config.send_timeout_ms.to_string())
            .create()
            .map_err(|e| {
                LotoError::NotificationFailed(format!("failed to create producer: {e}"))
            })?;

        info!(brokers = %config.brokers, topic = EMAILS_TOPIC, "Kafka producer created");

        Ok(Self {
            producer,
            topic: EMAILS_TOPIC.to_string(),
            timeout: Duration::from_millis(config.send_timeout_ms),
        })
    }
}

#[async_trait]
impl Notifier for KafkaNotifier {
    async fn publish(&self, event: &NotificationEvent) -> Result<()> {
        let payload = serde_json::to_vec(event)?;

        // Key by recipient so one user's notifications stay ordered
        // within a partition.
        let key = event.user.email.clone();
        let record = FutureRecord::to(&self.topic).payload(&payload).key(&key);

        match self.producer.send(record, Timeout::After(self.timeout)).await {
            Ok((partition, offset)) => {
                debug!(
                    topic = %self.topic,
                    partition,
                    offset,
                    subject = %event.subject,
                    "Notification event published"
                );
                Ok(())
            }
            Err((kafka_error, _)) => {
                error!(topic = %self.topic, error = %kafka_error, "Failed to publish notification event");
                Err(LotoError::NotificationFailed(kafka_error.to_string()))
            }
        }
    }
}

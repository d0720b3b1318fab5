//! # Kafka Producer
//!
//! A process-wide producer handle. Only one `rdkafka::FutureProducer` is
//! ever created per process; `init` must run once before `produce` is
//! reachable, mirroring the lifecycle the supervisor enforces for the HTTP
//! listener.

use std::sync::OnceLock;
use std::time::Duration;

use rdkafka::producer::{FutureProducer, FutureRecord, Producer as RdProducer};
use tracing::{info, warn};

use crate::kafka::config::KafkaClientConfig;
use crate::kafka::error::{KafkaError, KafkaResult};

static PRODUCER: OnceLock<FutureProducer> = OnceLock::new();

/// How long `shutdown` waits for in-flight sends to land before giving up.
const SHUTDOWN_FLUSH: Duration = Duration::from_secs(10);

/// Process-wide Kafka producer handle.
pub struct Producer;

impl Producer {
    /// Creates the singleton producer from `config`. Returns
    /// `KafkaError::AlreadyInitialized` if called more than once.
    pub fn init(config: &KafkaClientConfig) -> KafkaResult<()> {
        if PRODUCER.get().is_some() {
            return Err(KafkaError::AlreadyInitialized);
        }

        let mut client_config = config.to_client_config();
        config.apply_producer_settings(&mut client_config);

        let producer: FutureProducer = client_config
            .create()
            .map_err(|e| KafkaError::ConfigRejected(e.to_string()))?;

        PRODUCER
            .set(producer)
            .map_err(|_| KafkaError::AlreadyInitialized)?;

        info!("kafka producer initialized");
        Ok(())
    }

    fn handle() -> KafkaResult<&'static FutureProducer> {
        PRODUCER.get().ok_or(KafkaError::NotInitialized)
    }

    /// Publishes `payload` to `topic`, optionally keyed, waiting up to 5
    /// seconds for the broker to acknowledge.
    pub async fn produce(topic: &str, key: Option<&str>, payload: &str) -> KafkaResult<()> {
        let producer = Self::handle()?;

        let mut record = FutureRecord::<str, str>::to(topic).payload(payload);
        if let Some(key) = key {
            record = record.key(key);
        }

        match producer.send(record, Duration::from_secs(5)).await {
            Ok(_) => Ok(()),
            Err((error, _)) => {
                warn!("failed to produce to topic {}: {}", topic, error);
                Err(KafkaError::Broker(error))
            }
        }
    }

    /// Flushes outstanding sends with a 10-second cap, then drops whatever
    /// is left, logging how many messages were abandoned if any.
    pub async fn shutdown() {
        let Some(producer) = PRODUCER.get() else {
            return;
        };

        match producer.flush(SHUTDOWN_FLUSH) {
            Ok(()) => info!("kafka producer flushed cleanly on shutdown"),
            Err(error) => {
                let outstanding = producer.in_flight_count();
                warn!(
                    "kafka producer flush timed out after {:?}, {} message(s) dropped: {}",
                    SHUTDOWN_FLUSH, outstanding, error
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produce_before_init_is_not_initialized() {
        // The singleton producer is process-wide, so this only asserts the
        // handle lookup path returns the right error shape before any
        // `init` call has happened to elsewhere in the test binary.
        let result = Producer::handle();
        if result.is_err() {
            assert!(matches!(result, Err(KafkaError::NotInitialized)));
        }
    }
}

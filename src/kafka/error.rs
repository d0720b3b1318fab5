//! # Kafka Error Taxonomy
//!
//! Domain errors raised by the producer, consumer registrations, and the
//! worker pool. Broker-level failures are wrapped rather than flattened so
//! callers can still inspect the underlying `rdkafka` error.

/// Errors raised while configuring, producing to, or consuming from Kafka.
#[derive(thiserror::Error, Debug)]
pub enum KafkaError {
    /// A client configuration option was rejected by `rdkafka` before any
    /// network activity occurred (e.g. an unset `bootstrap.servers`).
    #[error("Kafka configuration rejected: {0}")]
    ConfigRejected(String),

    /// `Producer::init` was called a second time; the producer is a
    /// process-wide singleton and only initializes once.
    #[error("Kafka producer already initialized")]
    AlreadyInitialized,

    /// The producer handle was requested before `Producer::init` ran.
    #[error("Kafka producer not initialized")]
    NotInitialized,

    /// A message payload could not be deserialized into the expected shape.
    #[error("Failed to deserialize Kafka message payload: {0}")]
    Deserialize(String),

    /// A message payload could not be serialized before producing.
    #[error("Failed to serialize Kafka message payload: {0}")]
    Serialize(String),

    /// A transient or fatal error surfaced by the underlying broker client.
    #[error("Kafka broker error: {0}")]
    Broker(#[from] rdkafka::error::KafkaError),
}

pub type KafkaResult<T> = Result<T, KafkaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejected_message() {
        let error = KafkaError::ConfigRejected("missing bootstrap.servers".to_string());
        assert_eq!(
            error.to_string(),
            "Kafka configuration rejected: missing bootstrap.servers"
        );
    }

    #[test]
    fn already_initialized_message() {
        let error = KafkaError::AlreadyInitialized;
        assert_eq!(error.to_string(), "Kafka producer already initialized");
    }

    #[test]
    fn not_initialized_message() {
        let error = KafkaError::NotInitialized;
        assert_eq!(error.to_string(), "Kafka producer not initialized");
    }
}

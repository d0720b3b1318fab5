//! # Kafka Worker Module
//!
//! Configuration, error taxonomy, message wrapper, producer singleton,
//! per-registration consumer workers, and the pool that starts/stops all
//! registrations together.

pub mod config;
pub mod consumer;
pub mod error;
pub mod message;
pub mod pool;
pub mod producer;

pub use config::{AuthMode, KafkaClientConfig, OffsetReset, SaslCredentials, TlsConfig};
pub use consumer::{ConsumerRegistration, MessageHandler};
pub use error::{KafkaError, KafkaResult};
pub use message::{KafkaMessage, MessageLatency};
pub use pool::KafkaWorkerPool;
pub use producer::Producer;

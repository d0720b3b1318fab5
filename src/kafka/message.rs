//! # Kafka Message Types
//!
//! A borrowed-to-owned message wrapper handed to consumer registration
//! callbacks, plus the latency extension used for per-message tracing.

use rdkafka::message::OwnedMessage;
use rdkafka::{Message, Timestamp};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::kafka::error::{KafkaError, KafkaResult};

/// Extends a raw broker message with an age-since-produced calculation.
pub trait MessageLatency {
    /// Milliseconds since the message was produced, or `0` when the broker
    /// did not attach a timestamp.
    fn latency_ms(&self) -> i64;

    fn latency_formatted(&self) -> String {
        match self.latency_ms() {
            0 => "n/a".to_string(),
            ms => format!("{ms}ms"),
        }
    }
}

impl MessageLatency for OwnedMessage {
    fn latency_ms(&self) -> i64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64;

        match self.timestamp() {
            Timestamp::CreateTime(ts) => now - ts,
            Timestamp::LogAppendTime(ts) => now - ts,
            Timestamp::NotAvailable => 0,
        }
    }
}

/// A message handed to a consumer registration's callback: topic/partition
/// coordinates plus a UTF-8 payload already extracted from the broker record.
#[derive(Debug, Clone)]
pub struct KafkaMessage {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    pub key: Option<String>,
    pub payload: String,
    pub latency_ms: i64,
}

impl KafkaMessage {
    /// Builds a `KafkaMessage` from a detached broker record, rejecting
    /// records with no payload or a non-UTF-8 payload.
    pub fn from_owned(message: OwnedMessage) -> KafkaResult<Self> {
        let payload = match message.payload_view::<str>() {
            Some(Ok(payload)) => payload.to_string(),
            Some(Err(_)) => {
                return Err(KafkaError::Deserialize(format!(
                    "non-utf8 payload on topic {}",
                    message.topic()
                )))
            }
            None => {
                return Err(KafkaError::Deserialize(format!(
                    "empty payload on topic {}",
                    message.topic()
                )))
            }
        };

        let key = message
            .key_view::<str>()
            .and_then(|view| view.ok())
            .map(str::to_string);

        Ok(Self {
            topic: message.topic().to_string(),
            partition: message.partition(),
            offset: message.offset(),
            key,
            latency_ms: message.latency_ms(),
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latency_formatted_zero_is_na() {
        struct Zero;
        impl MessageLatency for Zero {
            fn latency_ms(&self) -> i64 {
                0
            }
        }
        assert_eq!(Zero.latency_formatted(), "n/a");
    }

    #[test]
    fn latency_formatted_nonzero() {
        struct Fixed(i64);
        impl MessageLatency for Fixed {
            fn latency_ms(&self) -> i64 {
                self.0
            }
        }
        assert_eq!(Fixed(42).latency_formatted(), "42ms");
    }
}

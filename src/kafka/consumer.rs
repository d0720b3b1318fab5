//! # Kafka Consumer Registration
//!
//! A registration binds a set of topics under one consumer group to an
//! async callback. Each registration runs as its own tokio task, but
//! within that task messages are handled one at a time, in offset order
//! per partition — the broker guarantees per-partition order, and this
//! loop preserves it by never starting a handler before the previous one
//! returns.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use futures::StreamExt;
use rdkafka::consumer::{BaseConsumer, Consumer, ConsumerContext, Rebalance, StreamConsumer};
use rdkafka::{ClientContext, Message};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::kafka::config::KafkaClientConfig;
use crate::kafka::error::{KafkaError, KafkaResult};
use crate::kafka::message::KafkaMessage;

struct RegistrationContext {
    name: String,
}

impl ClientContext for RegistrationContext {}

impl ConsumerContext for RegistrationContext {
    fn pre_rebalance(&self, _: &BaseConsumer<Self>, rebalance: &Rebalance) {
        info!("consumer '{}' entering rebalance: {:?}", self.name, rebalance);
    }

    fn post_rebalance(&self, _: &BaseConsumer<Self>, rebalance: &Rebalance) {
        info!("consumer '{}' completed rebalance: {:?}", self.name, rebalance);
    }
}

type RegistrationConsumer = StreamConsumer<RegistrationContext>;

/// An async callback invoked once per message on a registration's topics.
pub type MessageHandler = Arc<
    dyn Fn(KafkaMessage) -> Pin<Box<dyn Future<Output = KafkaResult<()>> + Send>> + Send + Sync,
>;

/// One subscription: a name (for logging), the topics it reads, and the
/// handler every message on those topics is passed to.
pub struct ConsumerRegistration {
    name: String,
    topics: Vec<String>,
    config: KafkaClientConfig,
    handler: MessageHandler,
    stop_tx: Option<watch::Sender<bool>>,
}

impl ConsumerRegistration {
    pub fn new<F, Fut>(
        name: impl Into<String>,
        topics: Vec<String>,
        config: KafkaClientConfig,
        handler: F,
    ) -> Self
    where
        F: Fn(KafkaMessage) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = KafkaResult<()>> + Send + 'static,
    {
        let handler: MessageHandler = Arc::new(move |msg| Box::pin(handler(msg)));

        Self {
            name: name.into(),
            topics,
            config,
            handler,
            stop_tx: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subscribes to `self.topics` and spawns the worker task. Returns the
    /// join handle so the pool can await a clean stop.
    pub fn start(&mut self) -> KafkaResult<tokio::task::JoinHandle<()>> {
        let context = RegistrationContext {
            name: self.name.clone(),
        };

        let mut client_config = self.config.to_client_config();
        self.config.apply_consumer_settings(&mut client_config);

        let consumer: RegistrationConsumer = client_config
            .create_with_context(context)
            .map_err(|e| KafkaError::ConfigRejected(e.to_string()))?;

        let topics: Vec<&str> = self.topics.iter().map(String::as_str).collect();
        consumer
            .subscribe(&topics)
            .map_err(|e| KafkaError::ConfigRejected(e.to_string()))?;

        let (stop_tx, mut stop_rx) = watch::channel(false);
        self.stop_tx = Some(stop_tx);

        let name = self.name.clone();
        let handler = Arc::clone(&self.handler);

        let join_handle = tokio::spawn(async move {
            info!("consumer '{}' starting, topics: {:?}", name, topics_owned(&consumer));

            let stream = consumer.stream().take_until(async {
                let _ = stop_rx.changed().await;
            });
            tokio::pin!(stream);

            while let Some(msg) = stream.next().await {
                let Ok(borrowed) = msg else { continue };
                let owned = borrowed.detach();

                if let Err(error) = process_one(Arc::clone(&handler), owned).await {
                    warn!("consumer message handling failed: {}", error);
                }
            }

            info!("consumer '{}' stopped", name);
        });

        Ok(join_handle)
    }

    /// Signals the worker task to stop consuming after its current batch.
    pub fn stop(&self) {
        if let Some(tx) = &self.stop_tx {
            let _ = tx.send(true);
        }
    }
}

fn topics_owned(consumer: &RegistrationConsumer) -> Vec<String> {
    consumer
        .subscription()
        .map(|list| {
            list.elements()
                .iter()
                .map(|el| el.topic().to_string())
                .collect()
        })
        .unwrap_or_default()
}

async fn process_one(
    handler: MessageHandler,
    message: rdkafka::message::OwnedMessage,
) -> KafkaResult<()> {
    let topic = message.topic().to_string();
    let parsed = match KafkaMessage::from_owned(message) {
        Ok(parsed) => parsed,
        Err(error) => {
            warn!("dropping unparseable message on topic {}: {}", topic, error);
            return Ok(());
        }
    };

    debug!(
        "consuming message on {}[{}]@{} latency={}ms",
        parsed.topic, parsed.partition, parsed.offset, parsed.latency_ms
    );

    handler(parsed).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kafka::config::KafkaClientConfig;

    #[test]
    fn registration_carries_its_name_and_topics() {
        let config = KafkaClientConfig::new("group", "localhost:9092");
        let registration = ConsumerRegistration::new("test", vec!["topic".into()], config, |_| {
            async { Ok(()) }
        });
        assert_eq!(registration.name(), "test");
        assert_eq!(registration.topics, vec!["topic".to_string()]);
    }
}

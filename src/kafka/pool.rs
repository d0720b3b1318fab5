//! # Kafka Worker Pool
//!
//! Owns every `ConsumerRegistration` the application configured and starts
//! or stops all of them together. The supervisor treats the pool as a
//! single unit: Kafka starts before the HTTP listener and stops after it.

use tokio::task::JoinHandle;
use tracing::info;

use crate::kafka::consumer::ConsumerRegistration;
use crate::kafka::error::KafkaResult;

pub struct KafkaWorkerPool {
    registrations: Vec<ConsumerRegistration>,
    handles: Vec<JoinHandle<()>>,
}

impl KafkaWorkerPool {
    pub fn new(registrations: Vec<ConsumerRegistration>) -> Self {
        Self {
            registrations,
            handles: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Starts every registration. Idempotent: a second call while already
    /// running is a no-op, since `handles` is only populated once.
    pub fn start(&mut self) -> KafkaResult<()> {
        if !self.handles.is_empty() {
            return Ok(());
        }

        for registration in &mut self.registrations {
            let handle = registration.start()?;
            info!("kafka worker pool started registration '{}'", registration.name());
            self.handles.push(handle);
        }

        Ok(())
    }

    /// Signals every registration to stop and waits for its worker task to
    /// exit. Idempotent: calling `stop` with no running workers is a no-op.
    pub async fn stop(&mut self) {
        for registration in &self.registrations {
            registration.stop();
        }

        for handle in self.handles.drain(..) {
            let _ = handle.await;
        }

        info!("kafka worker pool stopped");
    }
}

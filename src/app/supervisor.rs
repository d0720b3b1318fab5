//! # Supervisor
//!
//! Binds the HTTP server and the Kafka worker pool into one foreground
//! process and owns their startup/shutdown order: Kafka starts before
//! HTTP so inbound requests never race ahead of the producer/consumers
//! they may depend on; HTTP stops before Kafka so the listening surface
//! closes before the system underneath starts draining.

use thiserror::Error;
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

use crate::app::config::AppConfig;
use crate::http::HttpServer;
use crate::kafka::{KafkaWorkerPool, Producer};

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("application already running")]
    AlreadyRunning,
    #[error("no http server or kafka registration configured")]
    NothingConfigured,
    #[error(transparent)]
    Kafka(#[from] crate::kafka::KafkaError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type SupervisorResult<T> = Result<T, SupervisorError>;

/// Lifecycle coordinator for one application instance.
pub struct Application {
    http_server: Option<HttpServer>,
    kafka_pool: KafkaWorkerPool,
    producer_configured: bool,
    running: bool,
}

impl Application {
    pub fn new(mut config: AppConfig) -> SupervisorResult<Self> {
        if !config.has_http() && !config.has_kafka() {
            return Err(SupervisorError::NothingConfigured);
        }

        let http_server = config.take_http().map(|http| http.into_server());
        let producer_config = config.take_producer_config();
        let registrations = config
            .take_registrations()
            .into_iter()
            .map(|r| r.into_registration())
            .collect();

        if let Some(producer_config) = &producer_config {
            Producer::init(producer_config)?;
        }

        Ok(Self {
            http_server,
            kafka_pool: KafkaWorkerPool::new(registrations),
            producer_configured: producer_config.is_some(),
            running: false,
        })
    }

    /// Starts Kafka workers, then the HTTP listener, then blocks until a
    /// SIGINT/SIGTERM arrives, then stops HTTP before Kafka.
    pub async fn run(&mut self) -> SupervisorResult<()> {
        if self.running {
            return Err(SupervisorError::AlreadyRunning);
        }

        info!("application starting");
        self.kafka_pool.start()?;

        let http_handle = self.http_server.as_mut().map(|server| server.start());
        self.running = true;
        info!("application running, press Ctrl+C to stop");

        wait_for_shutdown_signal().await?;

        self.stop().await;

        if let Some(handle) = http_handle {
            let _ = handle.await;
        }

        Ok(())
    }

    /// Stops HTTP first, then Kafka. Idempotent: a second call while
    /// already stopped is a no-op.
    pub async fn stop(&mut self) {
        if !self.running {
            return;
        }

        info!("application stopping");

        if let Some(server) = &mut self.http_server {
            server.stop();
        }

        self.kafka_pool.stop().await;

        if self.producer_configured {
            Producer::shutdown().await;
        }

        self.running = false;
        info!("application stopped");
    }
}

async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = sigint.recv() => info!("received SIGINT"),
        _ = sigterm.recv() => info!("received SIGTERM"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::AppConfig;

    #[test]
    fn empty_config_is_rejected() {
        let result = Application::new(AppConfig::builder().build());
        assert!(matches!(result, Err(SupervisorError::NothingConfigured)));
    }

    #[tokio::test]
    async fn stop_before_run_is_a_noop() {
        let config = AppConfig::builder()
            .http(crate::app::config::HttpServerConfig::new("127.0.0.1", 0))
            .build();
        let mut app = Application::new(config).unwrap();
        app.stop().await;
        assert!(!app.running);
    }
}

//! Binds the HTTP server and Kafka worker pool into a single supervised
//! process: configuration types in [`config`], lifecycle and signal
//! handling in [`supervisor`].

pub mod config;
pub mod supervisor;

pub use config::{AppConfig, AppConfigBuilder, HttpServerConfig, KafkaRegistrationConfig};
pub use supervisor::{Application, SupervisorError, SupervisorResult};

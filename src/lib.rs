//! # Harbor Runtime
//!
//! A foreground server runtime combining a hand-rolled HTTP/1.1 listener
//! (with a minimal HTTP/2 preface handshake) and a Kafka consumer/producer
//! worker pool, bound together by a lifecycle supervisor.
//!
//! ## Modules
//!
//! - `http`: routing, static files, and the readiness-driven reactor
//! - `kafka`: consumer registrations, producer singleton, worker pool
//! - `app`: application configuration and the supervisor that owns startup
//!   and shutdown order
//! - `logger`: structured logging setup shared by every other module
//!
//! ## Usage
//!
//! ```rust,no_run
//! use harbor_runtime::app::{AppConfig, Application, HttpServerConfig};
//! use harbor_runtime::http::{Method, Response};
//!
//! # async fn run() -> anyhow::Result<()> {
//! harbor_runtime::logger::init_with_default()?;
//!
//! let http = HttpServerConfig::new("0.0.0.0", 8080)
//!     .route(Method::Get, "/healthz", |_req| Response::ok());
//!
//! let config = AppConfig::builder().http(http).build();
//! let mut app = Application::new(config)?;
//! app.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod http;
pub mod kafka;
pub mod logger;

/// Re-export of the most commonly used types, mirroring the per-module
/// public APIs above.
pub mod prelude {
    pub use crate::app::{AppConfig, Application, HttpServerConfig, SupervisorError};
    pub use crate::http::{Method, Request, Response};
    pub use crate::kafka::{KafkaClientConfig, KafkaError, KafkaMessage};
    pub use crate::logger::{init_with_default, LoggerConfig};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logger_module_is_accessible() {
        let config = logger::LoggerConfig::default();
        assert_eq!(config.log_dir(), "logs");
        assert_eq!(config.log_filename(), "application.log");
    }

    #[test]
    fn prelude_imports_resolve() {
        use crate::prelude::*;

        let config = LoggerConfig::default();
        assert!(config.enable_console());
    }
}

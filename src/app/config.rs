//! # Application Configuration
//!
//! Plain structs assembled with a builder, no env/file loader — the same
//! configuration idiom the logger module uses. `AppConfig` composes an
//! optional HTTP listener and a list of Kafka consumer registrations plus
//! an optional producer config.

use crate::http::{Method, Request, Response, StaticMapping};
use crate::kafka::KafkaClientConfig;

/// HTTP listener settings. `None` on `AppConfig` means the application
/// runs Kafka-only.
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    pub max_connections: usize,
    pub static_mapping: Option<StaticMapping>,
    routes: Vec<(Method, String, crate::http::route::Handler)>,
}

impl HttpServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            max_connections: 1000,
            static_mapping: None,
            routes: Vec::new(),
        }
    }

    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn with_static_mapping(mut self, mapping: StaticMapping) -> Self {
        self.static_mapping = Some(mapping);
        self
    }

    pub fn route<F>(mut self, method: Method, pattern: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.routes
            .push((method, pattern.into(), std::sync::Arc::new(handler)));
        self
    }

    pub(crate) fn into_server(self) -> crate::http::HttpServer {
        let mut server = crate::http::HttpServer::new(self.host, self.port)
            .with_max_connections(self.max_connections);

        if let Some(mapping) = self.static_mapping {
            server = server.with_static_mapping(mapping);
        }

        for (method, pattern, handler) in self.routes {
            server = server.route(method, pattern, move |req| handler(req));
        }

        server
    }
}

/// A Kafka consumer registration described declaratively, converted into a
/// live `ConsumerRegistration` when the application starts.
pub struct KafkaRegistrationConfig {
    pub name: String,
    pub topics: Vec<String>,
    pub client_config: KafkaClientConfig,
    handler: crate::kafka::consumer::MessageHandler,
}

impl KafkaRegistrationConfig {
    pub fn new<F, Fut>(
        name: impl Into<String>,
        topics: Vec<String>,
        client_config: KafkaClientConfig,
        handler: F,
    ) -> Self
    where
        F: Fn(crate::kafka::KafkaMessage) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = crate::kafka::KafkaResult<()>> + Send + 'static,
    {
        let handler: crate::kafka::consumer::MessageHandler =
            std::sync::Arc::new(move |msg| Box::pin(handler(msg)));
        Self {
            name: name.into(),
            topics,
            client_config,
            handler,
        }
    }

    pub(crate) fn into_registration(self) -> crate::kafka::ConsumerRegistration {
        let handler = self.handler;
        crate::kafka::ConsumerRegistration::new(
            self.name,
            self.topics,
            self.client_config,
            move |msg| {
                let handler = std::sync::Arc::clone(&handler);
                async move { handler(msg).await }
            },
        )
    }
}

/// Top-level application configuration: zero-or-one HTTP listener, an
/// optional producer, and zero-or-more Kafka consumer registrations.
#[derive(Default)]
pub struct AppConfig {
    http: Option<HttpServerConfig>,
    producer_config: Option<KafkaClientConfig>,
    registrations: Vec<KafkaRegistrationConfig>,
}

impl AppConfig {
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    pub fn has_http(&self) -> bool {
        self.http.is_some()
    }

    pub fn has_kafka(&self) -> bool {
        self.producer_config.is_some() || !self.registrations.is_empty()
    }
}

#[derive(Default)]
pub struct AppConfigBuilder {
    http: Option<HttpServerConfig>,
    producer_config: Option<KafkaClientConfig>,
    registrations: Vec<KafkaRegistrationConfig>,
}

impl AppConfigBuilder {
    pub fn http(mut self, config: HttpServerConfig) -> Self {
        self.http = Some(config);
        self
    }

    pub fn producer(mut self, config: KafkaClientConfig) -> Self {
        self.producer_config = Some(config);
        self
    }

    pub fn consumer(mut self, registration: KafkaRegistrationConfig) -> Self {
        self.registrations.push(registration);
        self
    }

    pub fn build(self) -> AppConfig {
        AppConfig {
            http: self.http,
            producer_config: self.producer_config,
            registrations: self.registrations,
        }
    }
}

impl AppConfig {
    pub(crate) fn take_http(&mut self) -> Option<HttpServerConfig> {
        self.http.take()
    }

    pub(crate) fn take_producer_config(&mut self) -> Option<KafkaClientConfig> {
        self.producer_config.take()
    }

    pub(crate) fn take_registrations(&mut self) -> Vec<KafkaRegistrationConfig> {
        std::mem::take(&mut self.registrations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_has_neither_surface() {
        let config = AppConfig::builder().build();
        assert!(!config.has_http());
        assert!(!config.has_kafka());
    }

    #[test]
    fn http_only_config_reports_http_surface() {
        let config = AppConfig::builder()
            .http(HttpServerConfig::new("127.0.0.1", 8080))
            .build();
        assert!(config.has_http());
        assert!(!config.has_kafka());
    }

    #[test]
    fn registration_config_reports_kafka_surface() {
        let client_config = KafkaClientConfig::new("group", "localhost:9092");
        let registration =
            KafkaRegistrationConfig::new("test", vec!["topic".into()], client_config, |_| async {
                Ok(())
            });
        let config = AppConfig::builder().consumer(registration).build();
        assert!(config.has_kafka());
    }
}

//! # HTTP Server
//!
//! Owns the route table and static file mapping at configuration time,
//! then hands both to a [`Reactor`] for the lifetime of the run. Start and
//! stop are driven by a `tokio::sync::watch` channel so the supervisor can
//! signal shutdown without aborting an in-flight response.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

use crate::http::message::{Request, Response};
use crate::http::method::Method;
use crate::http::reactor::Reactor;
use crate::http::route::RouteTable;
use crate::http::static_files::StaticMapping;

const DEFAULT_MAX_CONNECTIONS: usize = 1000;

/// Builds a [`RouteTable`] and static mapping, then runs them on a
/// [`Reactor`] until stopped.
pub struct HttpServer {
    host: String,
    port: u16,
    routes: RouteTable,
    static_mapping: Option<StaticMapping>,
    max_connections: usize,
    stop_tx: Option<watch::Sender<bool>>,
}

impl HttpServer {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            routes: RouteTable::new(),
            static_mapping: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            stop_tx: None,
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
        self.routes.register(method, pattern, handler);
        self
    }

    /// Spawns the reactor on its own task and returns a handle to it. Call
    /// [`HttpServer::stop`] to request a clean shutdown.
    pub fn start(&mut self) -> JoinHandle<()> {
        let (stop_tx, stop_rx) = watch::channel(false);
        self.stop_tx = Some(stop_tx);

        let reactor = Reactor::new(
            std::mem::replace(&mut self.routes, RouteTable::new()),
            self.static_mapping.take(),
            self.max_connections,
        );
        let host = self.host.clone();
        let port = self.port;

        tokio::spawn(async move {
            if let Err(error) = reactor.run(&host, port, stop_rx).await {
                tracing::error!("http reactor exited with error: {}", error);
            }
        })
    }

    /// Signals the reactor to stop. Idempotent; a second call is a no-op.
    pub fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            info!("http server stopping");
            let _ = stop_tx.send(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_server_defaults_max_connections() {
        let server = HttpServer::new("127.0.0.1", 0);
        assert_eq!(server.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn stop_before_start_is_a_noop() {
        let mut server = HttpServer::new("127.0.0.1", 0);
        server.stop();
        assert!(server.stop_tx.is_none());
    }
}

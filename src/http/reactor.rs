//! # Reactor
//!
//! A single-task readiness-driven accept/read loop. No connection is ever
//! handled on more than one task — spawning a task per connection would
//! break the "no two handlers execute concurrently" invariant this
//! component exists to provide. Readiness is observed through
//! `TcpStream::readable()`, the portable equivalent of the edge-triggered
//! notification facility the original uses: wake when a socket has bytes
//! to read, sleep at most 1000 ms, never block in the middle of a send.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use futures::future;
use futures::FutureExt;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::http::codec::{parse_request, serialize_response, ParseError, MAX_REQUEST_SIZE};
use crate::http::http2::{self, encode_settings, encode_settings_ack};
use crate::http::message::Response;
use crate::http::method::Method;
use crate::http::route::RouteTable;
use crate::http::static_files::StaticMapping;

/// Connections idle longer than this are closed during the periodic sweep.
const IDLE_TIMEOUT: Duration = Duration::from_secs(60);
/// Upper bound on how long the reactor waits for a readiness event.
const POLL_INTERVAL: Duration = Duration::from_millis(1000);

struct Connection {
    socket: TcpStream,
    buffer: Vec<u8>,
    last_activity: Instant,
}

enum ReadOutcome {
    Data,
    Closed,
    WouldBlock,
    Error,
}

enum HandleOutcome {
    Pending,
    Done,
    Errored,
}

/// Single-threaded cooperative HTTP/1.1 (plus HTTP/2 preface) reactor.
pub struct Reactor {
    routes: RouteTable,
    static_mapping: Option<StaticMapping>,
    max_connections: usize,
}

impl Reactor {
    pub fn new(
        routes: RouteTable,
        static_mapping: Option<StaticMapping>,
        max_connections: usize,
    ) -> Self {
        Self {
            routes,
            static_mapping,
            max_connections,
        }
    }

    /// Binds `(host, port)` and runs until `stop_rx` reports a stop
    /// signal. Backlog of 128, matching the original's listen queue depth.
    pub async fn run(
        &self,
        host: &str,
        port: u16,
        mut stop_rx: watch::Receiver<bool>,
    ) -> std::io::Result<()> {
        let listener = TcpListener::bind((host, port)).await?;
        info!("http reactor bound to {}:{}", host, port);

        let mut connections: HashMap<usize, Connection> = HashMap::new();
        let mut next_id: usize = 0;

        loop {
            if *stop_rx.borrow() {
                break;
            }

            tokio::select! {
                _ = stop_rx.changed() => {
                    if *stop_rx.borrow() {
                        break;
                    }
                }
                accept_result = listener.accept(), if connections.len() < self.max_connections => {
                    self.accept_all(&listener, &mut connections, &mut next_id, accept_result);
                }
                ready_id = self.wait_one_readable(&connections) => {
                    if let Some(id) = ready_id {
                        self.service_connection(id, &mut connections).await;
                    }
                }
                _ = tokio::time::sleep(POLL_INTERVAL) => {}
            }

            self.sweep_idle_connections(&mut connections);
        }

        info!("http reactor stopping, closing {} live connection(s)", connections.len());
        connections.clear();
        Ok(())
    }

    /// Resolves as soon as any open connection becomes readable, yielding
    /// that connection's id; never resolves (deferring to the select's
    /// other arms) if there are no open connections.
    async fn wait_one_readable(&self, connections: &HashMap<usize, Connection>) -> Option<usize> {
        if connections.is_empty() {
            future::pending::<()>().await;
            return None;
        }

        let ids: Vec<usize> = connections.keys().copied().collect();
        let futures: Vec<_> = ids
            .iter()
            .map(|id| Box::pin(connections[id].socket.readable()))
            .collect();

        let (result, index, _rest) = future::select_all(futures).await;
        if result.is_err() {
            return None;
        }
        Some(ids[index])
    }

    /// Drains the listening socket's accept backlog in a tight loop until
    /// it would block, matching the original's "accept until WouldBlock"
    /// behaviour rather than one accept per wakeup.
    fn accept_all(
        &self,
        listener: &TcpListener,
        connections: &mut HashMap<usize, Connection>,
        next_id: &mut usize,
        first: std::io::Result<(TcpStream, std::net::SocketAddr)>,
    ) {
        let mut next = Some(first);

        while let Some(result) = next.take() {
            match result {
                Ok((socket, addr)) => {
                    if connections.len() >= self.max_connections {
                        warn!("max_connections reached, rejecting {}", addr);
                        drop(socket);
                    } else {
                        debug!("accepted connection from {}", addr);
                        let id = *next_id;
                        *next_id += 1;
                        connections.insert(
                            id,
                            Connection {
                                socket,
                                buffer: Vec::new(),
                                last_activity: Instant::now(),
                            },
                        );
                    }
                }
                Err(error) => {
                    warn!("accept failed: {}", error);
                    break;
                }
            }

            if connections.len() >= self.max_connections {
                break;
            }

            match listener.accept().now_or_never() {
                Some(result) => next = Some(result),
                None => break,
            }
        }
    }

    /// Services the connection that `wait_one_readable` reported ready.
    /// Only one per wakeup is handled; the loop re-enters
    /// `wait_one_readable` immediately after, so no ready socket waits
    /// longer than one iteration behind whichever was serviced first.
    async fn service_connection(&self, id: usize, connections: &mut HashMap<usize, Connection>) {
        let Some(conn) = connections.get_mut(&id) else {
            return;
        };

        match read_available(conn) {
            ReadOutcome::Closed | ReadOutcome::Error => {
                connections.remove(&id);
                return;
            }
            ReadOutcome::WouldBlock => return,
            ReadOutcome::Data => {}
        }

        conn.last_activity = Instant::now();

        if http2::is_preface(&conn.buffer) {
            self.handle_http2_preface(conn).await;
            connections.remove(&id);
            return;
        }

        match self.try_handle_http1(conn).await {
            HandleOutcome::Pending => {}
            HandleOutcome::Done | HandleOutcome::Errored => {
                connections.remove(&id);
            }
        }
    }

    async fn handle_http2_preface(&self, conn: &mut Connection) {
        info!("http/2 preface detected, sending initial settings");
        let _ = conn.socket.write_all(&encode_settings()).await;
        let _ = conn.socket.write_all(&encode_settings_ack()).await;
    }

    async fn try_handle_http1(&self, conn: &mut Connection) -> HandleOutcome {
        match parse_request(&conn.buffer) {
            Ok((request, consumed)) => {
                conn.buffer.drain(..consumed);

                let response = match self.routes.find(request.method, &request.raw_path) {
                    Some((handler, path_params)) => {
                        let mut request = request;
                        request.path_params = path_params;
                        handler(&request)
                    }
                    None => match &self.static_mapping {
                        Some(mapping) => mapping
                            .try_serve(&request.raw_path)
                            .await
                            .unwrap_or_else(Response::not_found),
                        None if request.method == Method::Unknown => {
                            Response::new(501, "Not Implemented")
                        }
                        None => Response::not_found(),
                    },
                };

                let bytes = serialize_response(&response);
                let _ = conn.socket.write_all(&bytes).await;
                HandleOutcome::Done
            }
            Err(ParseError::Incomplete) => {
                if conn.buffer.len() >= MAX_REQUEST_SIZE {
                    warn!("request exceeded MAX_REQUEST_SIZE without a terminator");
                    HandleOutcome::Errored
                } else {
                    HandleOutcome::Pending
                }
            }
            Err(ParseError::Malformed(reason)) => {
                warn!("malformed request: {}", reason);
                HandleOutcome::Errored
            }
        }
    }

    fn sweep_idle_connections(&self, connections: &mut HashMap<usize, Connection>) {
        let now = Instant::now();
        connections.retain(|_, conn| now.duration_since(conn.last_activity) <= IDLE_TIMEOUT);
    }
}

fn read_available(conn: &mut Connection) -> ReadOutcome {
    let mut chunk = [0u8; 4096];
    match conn.socket.try_read(&mut chunk) {
        Ok(0) => ReadOutcome::Closed,
        Ok(n) => {
            conn.buffer.extend_from_slice(&chunk[..n]);
            ReadOutcome::Data
        }
        Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => ReadOutcome::WouldBlock,
        Err(_) => ReadOutcome::Error,
    }
}

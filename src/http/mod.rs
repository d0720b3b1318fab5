//! HTTP/1.1 server with a minimal HTTP/2 preface handshake: routing,
//! static files, and a single-task readiness-driven reactor, all
//! hand-rolled rather than layered on `hyper`.

pub mod codec;
pub mod http2;
pub mod message;
pub mod method;
pub mod reactor;
pub mod route;
pub mod server;
pub mod static_files;

pub use message::{Headers, Request, Response};
pub use method::Method;
pub use route::RouteTable;
pub use server::HttpServer;
pub use static_files::StaticMapping;

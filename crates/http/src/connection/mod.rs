//! HTTP connection handling module
//!
//! # Components
//!
//! - [`HttpConnection`]: drives a single connection through its states:
//!   - reads and validates the request line
//!   - reads the header block and the body
//!   - hands the request to a [`Handler`](crate::handler::Handler)
//!   - writes exactly one fully buffered response and releases the stream
//!
//! - [`ConnectionInfo`]: the local and peer addresses of the connection,
//!   used by handlers that must build absolute URLs

use std::net::SocketAddr;

mod http_connection;

pub use http_connection::HttpConnection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionInfo {
    local_addr: SocketAddr,
    peer_addr: SocketAddr,
}

impl ConnectionInfo {
    pub fn new(local_addr: SocketAddr, peer_addr: SocketAddr) -> Self {
        Self { local_addr, peer_addr }
    }

    /// The address the server side of this connection is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }
}

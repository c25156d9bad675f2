//! A strict, single-request HTTP/1.1 engine
//!
//! This crate reads exactly one request from a blocking stream, hands it to a
//! [`handler::Handler`] and writes exactly one response before the stream is
//! released. It never keeps connections alive and never streams bodies: the
//! request body is read whole under a size limit and the response is encoded
//! into a single buffer before anything is written.
//!
//! # Features
//!
//! - Strict request-line validation (`GET`/`POST`, origin-form target, `HTTP/1.1` only)
//! - Case-insensitive headers with last-wins semantics
//! - `Content-Length` framed bodies with partial-read handling
//! - `400 Bad Request` for every malformed request, produced by the engine itself
//! - Framing headers (`content-length`, `connection: close`) derived at encode time
//!
//! # Example
//!
//! ```no_run
//! use std::io::BufReader;
//! use std::net::TcpListener;
//!
//! use roster_http::connection::{ConnectionInfo, HttpConnection};
//! use roster_http::handler::make_handler;
//! use roster_http::protocol::{Request, response};
//! use tracing::{error, info};
//!
//! fn main() -> std::io::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080")?;
//!     let handler = make_handler(|request: &Request, _info: &ConnectionInfo| {
//!         info!(path = request.path(), "hello");
//!         response::ok("Hello World!\r\n", &mime::TEXT_PLAIN)
//!     });
//!
//!     for stream in listener.incoming() {
//!         let stream = stream?;
//!         let info = ConnectionInfo::new(stream.local_addr()?, stream.peer_addr()?);
//!         let connection = HttpConnection::new(BufReader::new(&stream), &stream);
//!         if let Err(e) = connection.process(&handler, &info) {
//!             error!(cause = %e, "can't send response");
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`connection`]: the per-connection state machine
//! - [`protocol`]: request, header, method and error types plus response builders
//! - [`codec`]: the parsing and encoding stages
//! - [`handler`]: the seam to the application
//!
//! # Limits
//!
//! - Maximum request-line or header-line length: 8 KiB
//! - Maximum number of headers: 64
//! - Maximum body size: 1 MiB, configurable through [`codec::Limits`]

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;

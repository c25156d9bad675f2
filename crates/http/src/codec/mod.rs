//! HTTP codec module for decoding requests and encoding responses
//!
//! Everything here works on blocking `std::io` readers and in-memory buffers,
//! so the whole protocol layer can be exercised without a socket.
//!
//! # Architecture
//!
//! - Request handling:
//!   - [`RequestLine`]: strict parser for `METHOD TARGET VERSION`
//!   - [`HeaderDecoder`]: reads the header block line by line
//!   - [`LengthDecoder`]: reads a `Content-Length` framed body
//!   - [`RequestDecoder`]: runs the three stages under the configured [`Limits`]
//!
//! - Response handling:
//!   - [`HeaderEncoder`]: status line and headers, with framing headers derived from the body
//!   - [`ResponseEncoder`]: head plus body into a single buffer
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use roster_http::codec::ResponseEncoder;
//! use roster_http::protocol::response;
//!
//! let mut buffer = BytesMut::new();
//! ResponseEncoder::new().encode(response::not_found(), &mut buffer).unwrap();
//! assert!(buffer.starts_with(b"HTTP/1.1 404 Not Found\r\n"));
//! ```

mod body;
mod header;
mod line;
mod request_decoder;
mod request_line;
mod response_encoder;

pub use body::LengthDecoder;
pub use header::{HeaderDecoder, HeaderEncoder, parse_header_line};
pub use request_decoder::{Limits, MAX_BODY_BYTES, MAX_HEADER_NUM, MAX_LINE_BYTES, RequestDecoder};
pub use request_line::RequestLine;
pub use response_encoder::ResponseEncoder;

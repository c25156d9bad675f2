//! HTTP header encoder implementation for serializing response heads
//!
//! Writes the status line and the header block of a response. The framing
//! headers are owned by the encoder: `content-length` is always the length of
//! the body that follows and `connection` is always `close`, whatever the
//! handler put in the response.

use std::fmt::Write;

use bytes::{BufMut, BytesMut};
use http::header::{CONNECTION, CONTENT_LENGTH};
use http::response::Parts;
use http::{HeaderValue, Version};
use tracing::error;

use crate::protocol::SendError;

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 1024;

const CLOSE: HeaderValue = HeaderValue::from_static("close");

/// Encoder for the status line and headers of a response.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderEncoder;

impl HeaderEncoder {
    /// Encodes the response head for a body of `body_length` bytes.
    ///
    /// # Errors
    ///
    /// Returns error if the response version is not HTTP/1.1.
    pub fn encode(&self, head: &mut Parts, body_length: usize, dst: &mut BytesMut) -> Result<(), SendError> {
        dst.reserve(INIT_HEADER_SIZE);
        match head.version {
            Version::HTTP_11 => {
                write!(dst, "HTTP/1.1 {} {}\r\n", head.status.as_str(), head.status.canonical_reason().unwrap_or_default())
                    .map_err(|e| SendError::invalid_response(format!("can't write status line: {e}")))?;
            }
            v => {
                error!(http_version = ?v, "unsupported http version");
                return Err(SendError::invalid_response(format!("unsupported http version {v:?}")));
            }
        }

        head.headers.insert(CONTENT_LENGTH, body_length.into());
        head.headers.insert(CONNECTION, CLOSE);

        for (header_name, header_value) in &head.headers {
            dst.put_slice(header_name.as_ref());
            dst.put_slice(b": ");
            dst.put_slice(header_value.as_ref());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

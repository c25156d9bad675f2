//! The parsed form of a single HTTP request.
//!
//! A [`Request`] is built once per connection, after the request line, the
//! header block and the body (if any) have been read. It is never mutated
//! afterwards.

use std::borrow::Cow;
use std::str::Utf8Error;

use bytes::Bytes;
use http::Version;
use percent_encoding::percent_decode_str;

use crate::codec::RequestLine;
use crate::protocol::{Headers, Method};

#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    target: String,
    version: Version,
    headers: Headers,
    body: Bytes,
}

impl Request {
    /// Creates a request for `HTTP/1.1`, the only version this engine accepts.
    pub fn new(method: Method, target: impl Into<String>, headers: Headers, body: impl Into<Bytes>) -> Self {
        Self { method, target: target.into(), version: Version::HTTP_11, headers, body: body.into() }
    }

    pub(crate) fn from_parts(line: RequestLine, headers: Headers, body: Bytes) -> Self {
        Self { method: line.method, target: line.target, version: line.version, headers, body }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// The request target exactly as it appeared on the request line.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The target up to the first `?`, still percent-encoded.
    pub fn path(&self) -> &str {
        self.target.split_once('?').map_or(self.target.as_str(), |(path, _)| path)
    }

    /// Everything after the first `?`, if the target has one.
    pub fn query(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, query)| query)
    }

    /// The percent-decoded path.
    ///
    /// # Errors
    ///
    /// Fails when the decoded bytes are not valid UTF-8.
    pub fn decoded_path(&self) -> Result<Cow<'_, str>, Utf8Error> {
        percent_decode_str(self.path()).decode_utf8()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

//! HTTP request decoder module
//!
//! Decodes a request off a blocking, buffered reader in three stages: the
//! request line, the header block and the `Content-Length` framed body. Each
//! stage is exposed on its own so the connection can track which one failed;
//! [`RequestDecoder::decode`] runs all of them.
//!
//! # Example
//!
//! ```
//! use roster_http::codec::RequestDecoder;
//! use std::io::Cursor;
//!
//! let mut reader = Cursor::new("POST /app-add HTTP/1.1\r\nContent-Length: 22\r\n\r\nfirst=Mick&last=Jagger");
//! let request = RequestDecoder::new().decode(&mut reader).unwrap();
//! assert_eq!(request.path(), "/app-add");
//! assert_eq!(&request.body()[..], b"first=Mick&last=Jagger");
//! ```

use std::io::BufRead;

use bytes::Bytes;

use crate::codec::body::LengthDecoder;
use crate::codec::header::HeaderDecoder;
use crate::codec::line::read_line;
use crate::codec::RequestLine;
use crate::ensure;
use crate::protocol::{Headers, ParseError, Request};

/// Maximum size in bytes of the request line or of a single header line
pub const MAX_LINE_BYTES: usize = 8 * 1024;

/// Maximum number of headers allowed in a request
pub const MAX_HEADER_NUM: usize = 64;

/// Maximum size in bytes of a request body
pub const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// Size limits applied while decoding a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_line_bytes: usize,
    pub max_headers: usize,
    pub max_body_bytes: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_line_bytes: MAX_LINE_BYTES, max_headers: MAX_HEADER_NUM, max_body_bytes: MAX_BODY_BYTES }
    }
}

/// A decoder for HTTP requests read from a blocking stream.
#[derive(Debug, Clone, Copy)]
pub struct RequestDecoder {
    limits: Limits,
    header_decoder: HeaderDecoder,
}

impl RequestDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self { limits, header_decoder: HeaderDecoder::new(limits.max_line_bytes, limits.max_headers) }
    }

    /// Reads and validates the request line.
    ///
    /// # Errors
    ///
    /// A stream that ends before the first line, a line that is not UTF-8 and
    /// any line rejected by [`RequestLine`] fail with
    /// [`ParseError::MalformedRequestLine`].
    pub fn decode_request_line<R: BufRead>(&self, reader: &mut R) -> Result<RequestLine, ParseError> {
        let raw_line = read_line(reader, self.limits.max_line_bytes)?
            .ok_or_else(|| ParseError::malformed_request_line("stream ended before the request line"))?;

        let line = std::str::from_utf8(&raw_line)
            .map_err(|e| ParseError::malformed_request_line(format!("request line is not utf-8: {e}")))?;

        line.parse()
    }

    /// Reads the header block up to and including its terminating blank line.
    ///
    /// # Errors
    ///
    /// See [`HeaderDecoder::decode`].
    pub fn decode_headers<R: BufRead>(&self, reader: &mut R) -> Result<Headers, ParseError> {
        self.header_decoder.decode(reader)
    }

    /// Reads exactly `Content-Length` bytes, or nothing when the header is absent.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the length is not a number, exceeds the body
    /// limit, or the stream ends before the whole body arrived.
    pub fn decode_body<R: BufRead>(&self, headers: &Headers, reader: &mut R) -> Result<Bytes, ParseError> {
        let Some(length) = headers.content_length()? else {
            return Ok(Bytes::new());
        };

        ensure!(length <= self.limits.max_body_bytes, ParseError::too_large_body(length, self.limits.max_body_bytes));
        LengthDecoder::new(length).decode(reader)
    }

    /// Runs every stage and assembles the [`Request`].
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that failed.
    pub fn decode<R: BufRead>(&self, reader: &mut R) -> Result<Request, ParseError> {
        let line = self.decode_request_line(reader)?;
        let headers = self.decode_headers(reader)?;
        let body = self.decode_body(&headers, reader)?;
        Ok(Request::from_parts(line, headers, body))
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self::with_limits(Limits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Method;
    use http::Version;
    use indoc::indoc;
    use std::io::Cursor;

    #[test]
    fn from_curl() {
        let str = indoc! {r##"
        GET /index.html HTTP/1.1
        Host: 127.0.0.1:8080
        User-Agent: curl/7.79.1
        Accept: */*

        "##};

        let request = RequestDecoder::new().decode(&mut Cursor::new(str)).unwrap();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.version(), Version::HTTP_11);
        assert_eq!(request.path(), "/index.html");
        assert_eq!(request.query(), None);
        assert_eq!(request.headers().len(), 3);
        assert_eq!(request.headers().get("host"), Some("127.0.0.1:8080"));
        assert!(request.body().is_empty());
    }

    #[test]
    fn from_form_post() {
        let str = "POST /app-add HTTP/1.1\r\n\
                   Host: localhost:8080\r\n\
                   Content-Type: application/x-www-form-urlencoded\r\n\
                   Content-Length: 22\r\n\
                   \r\n\
                   first=Mick&last=Jagger";

        let request = RequestDecoder::new().decode(&mut Cursor::new(str)).unwrap();

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.path(), "/app-add");
        assert_eq!(&request.body()[..], b"first=Mick&last=Jagger");
    }

    #[test]
    fn from_edge_with_query() {
        let str = indoc! {r##"
        GET /app-index?first=Mick&last= HTTP/1.1
        Host: 127.0.0.1:8080
        Connection: keep-alive
        Cache-Control: max-age=0
        sec-ch-ua: "#Not_A Brand";v="99", "Microsoft Edge";v="109", "Chromium";v="109"
        Accept-Language: zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7

        "##};

        let request = RequestDecoder::new().decode(&mut Cursor::new(str)).unwrap();

        assert_eq!(request.path(), "/app-index");
        assert_eq!(request.query(), Some("first=Mick&last="));
        assert_eq!(request.headers().len(), 5);
        assert_eq!(request.headers().get("sec-ch-ua"), Some(r##""#Not_A Brand";v="99", "Microsoft Edge";v="109", "Chromium";v="109""##));
    }

    #[test]
    fn empty_stream_is_malformed_request_line() {
        let result = RequestDecoder::new().decode(&mut Cursor::new(""));
        assert!(matches!(result, Err(ParseError::MalformedRequestLine { .. })));
    }

    #[test]
    fn non_utf8_request_line() {
        let result = RequestDecoder::new().decode(&mut Cursor::new(b"GET /\xff HTTP/1.1\r\n\r\n".to_vec()));
        assert!(matches!(result, Err(ParseError::MalformedRequestLine { .. })));
    }

    #[test]
    fn body_limit() {
        let limits = Limits { max_body_bytes: 4, ..Limits::default() };
        let str = "POST /app-add HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
        let result = RequestDecoder::with_limits(limits).decode(&mut Cursor::new(str));
        assert!(matches!(result, Err(ParseError::TooLargeBody { size: 5, max_size: 4 })));
    }

    #[test]
    fn invalid_content_length() {
        let str = "POST /app-add HTTP/1.1\r\nContent-Length: twelve\r\n\r\nhello";
        let result = RequestDecoder::new().decode(&mut Cursor::new(str));
        assert!(matches!(result, Err(ParseError::InvalidContentLength { .. })));
    }

    #[test]
    fn truncated_body() {
        let str = "POST /app-add HTTP/1.1\r\nContent-Length: 50\r\n\r\nfirst=Mick";
        let result = RequestDecoder::new().decode(&mut Cursor::new(str));
        assert!(matches!(result, Err(ParseError::IncompleteBody { expected: 50, actual: 10 })));
    }
}

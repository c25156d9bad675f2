//! HTTP header decoder implementation for parsing the request header block
//!
//! The decoder reads the connection one line at a time. Every non-blank line
//! is split on its first colon into a name and a value, both trimmed of
//! surrounding whitespace. Decoding stops at the first blank line or at the
//! end of the stream, leaving the reader positioned at the start of the body.
//!
//! # Limits
//!
//! - Maximum number of headers: 64 (configurable through [`Limits`](crate::codec::Limits))
//! - Maximum size of a single header line: 8KB

use std::io::BufRead;

use tracing::trace;

use crate::codec::line::read_line;
use crate::ensure;
use crate::protocol::{Headers, ParseError};

/// Decoder for the header block that follows the request line.
#[derive(Debug, Clone, Copy)]
pub struct HeaderDecoder {
    max_line_bytes: usize,
    max_headers: usize,
}

impl HeaderDecoder {
    pub fn new(max_line_bytes: usize, max_headers: usize) -> Self {
        Self { max_line_bytes, max_headers }
    }

    /// Reads header lines until a blank line or the end of the stream.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - a non-blank line has no colon or an empty name
    /// - a line is not valid UTF-8
    /// - a line exceeds the configured line size
    /// - the block holds more lines than the configured header count
    pub fn decode<R: BufRead>(&self, reader: &mut R) -> Result<Headers, ParseError> {
        let mut headers = Headers::new();
        let mut line_count = 0;

        while let Some(raw_line) = read_line(reader, self.max_line_bytes)? {
            let line = std::str::from_utf8(&raw_line).map_err(|e| ParseError::malformed_header(format!("header is not utf-8: {e}")))?;
            if line.trim().is_empty() {
                break;
            }

            line_count += 1;
            ensure!(line_count <= self.max_headers, ParseError::too_many_headers(self.max_headers));

            let (name, value) = parse_header_line(line)?;
            headers.insert(name, value);
        }

        trace!(header_count = headers.len(), "parsed header block");
        Ok(headers)
    }
}

/// Splits a single header line into its trimmed name and value.
pub fn parse_header_line(line: &str) -> Result<(&str, &str), ParseError> {
    let (name, value) =
        line.split_once(':').ok_or_else(|| ParseError::malformed_header(format!("missing ':' in {:?}", line.trim())))?;

    let name = name.trim();
    ensure!(!name.is_empty(), ParseError::malformed_header(format!("empty header name in {:?}", line.trim())));

    Ok((name, value.trim()))
}

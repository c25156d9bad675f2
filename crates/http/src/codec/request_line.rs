//! Parser for the first line of a request.
//!
//! The line is split on single spaces into exactly three tokens. Only `GET`
//! and `POST`, origin-form targets (starting with `/`) and `HTTP/1.1` are
//! accepted; everything else fails with [`ParseError::MalformedRequestLine`]
//! instead of being handled leniently.

use std::str::FromStr;

use http::Version;

use crate::ensure;
use crate::protocol::{Method, ParseError};

const HTTP_11: &str = "HTTP/1.1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    pub target: String,
    pub version: Version,
}

impl FromStr for RequestLine {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens = line.trim().split(' ').collect::<Vec<_>>();
        let [method, target, version] = tokens[..] else {
            return Err(ParseError::malformed_request_line(format!("expect 3 tokens but found {}", tokens.len())));
        };

        let method = Method::try_from(method)?;
        ensure!(target.starts_with('/'), ParseError::malformed_request_line(format!("target {target:?} must start with '/'")));
        ensure!(version == HTTP_11, ParseError::malformed_request_line(format!("unsupported version {version:?}")));

        Ok(Self { method, target: target.to_string(), version: Version::HTTP_11 })
    }
}

//! Request routing.
//!
//! [`Router::route`] turns a parsed request into a [`RouteDecision`] without
//! touching the record store or reading any file content; the application
//! handler acts on the decision afterwards.
//!
//! Decisions are taken in this order:
//! 1. a path naming a directory redirects to its `index.html`
//! 2. `/app-index` lists records (GET only)
//! 3. `/app-add` appends a record (POST only)
//! 4. anything else is served as a static file

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use roster_http::protocol::{Method, Request};
use thiserror::Error;

use crate::docroot::DocumentRoot;
use crate::records;
use crate::store::{Criteria, NewRecord};

pub const LIST_ENDPOINT: &str = "/app-index";
pub const ADD_ENDPOINT: &str = "/app-add";

/// Bytes escaped when a request path is copied into a `location` header.
/// `%` is left alone so escapes already in the target survive.
const LOCATION_PATH: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    StaticFile(PathBuf),
    DirectoryRedirect(String),
    DynamicList(Criteria),
    DynamicAdd(NewRecord),
    NotFound,
    BadRequest(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("bad request: {reason}")]
    BadRequest { reason: String },

    #[error("not found")]
    NotFound,
}

impl RouteError {
    pub fn bad_request<S: ToString>(str: S) -> Self {
        RouteError::BadRequest { reason: str.to_string() }
    }
}

impl From<RouteError> for RouteDecision {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::BadRequest { reason } => RouteDecision::BadRequest(reason),
            RouteError::NotFound => RouteDecision::NotFound,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    docroot: DocumentRoot,
}

impl Router {
    pub fn new(docroot: DocumentRoot) -> Self {
        Self { docroot }
    }

    pub fn docroot(&self) -> &DocumentRoot {
        &self.docroot
    }

    /// Decides how `request` is answered. `local_addr` is the address the
    /// connection was accepted on and becomes the host of redirect URLs.
    pub fn route(&self, request: &Request, local_addr: SocketAddr) -> RouteDecision {
        self.decide(request, local_addr).unwrap_or_else(RouteDecision::from)
    }

    fn decide(&self, request: &Request, local_addr: SocketAddr) -> Result<RouteDecision, RouteError> {
        let decoded = request.decoded_path().map_err(|e| RouteError::bad_request(format!("path is not utf-8: {e}")))?;
        let resolved = self.docroot.resolve(&decoded)?;

        if resolved.is_dir() {
            self.docroot.ensure_contained(&resolved)?;
            return Ok(RouteDecision::DirectoryRedirect(redirect_location(request.path(), local_addr)));
        }

        match request.path() {
            LIST_ENDPOINT => {
                if request.method() != Method::Get {
                    return Err(RouteError::bad_request(format!("{LIST_ENDPOINT} only accepts GET")));
                }
                Ok(RouteDecision::DynamicList(records::parse_criteria(request.query())?))
            }

            ADD_ENDPOINT => {
                if request.method() != Method::Post {
                    return Err(RouteError::bad_request(format!("{ADD_ENDPOINT} only accepts POST")));
                }
                if !request.headers().contains("content-length") {
                    return Err(RouteError::bad_request("missing content-length"));
                }
                Ok(RouteDecision::DynamicAdd(records::parse_new_record(request.body())?))
            }

            _ => {
                self.docroot.ensure_contained(&resolved)?;
                Ok(RouteDecision::StaticFile(resolved))
            }
        }
    }
}

/// Absolute URL of the `index.html` inside the directory named by `path`.
///
/// Loopback addresses are rendered as `localhost`. Non-ASCII bytes in `path`
/// are percent-encoded.
pub fn redirect_location(path: &str, local_addr: SocketAddr) -> String {
    let separator = if path.ends_with('/') { "" } else { "/" };
    let port = local_addr.port();
    let path = utf8_percent_encode(path, LOCATION_PATH);
    match local_addr.ip() {
        ip if ip.is_loopback() => format!("http://localhost:{port}{path}{separator}index.html"),
        IpAddr::V4(ip) => format!("http://{ip}:{port}{path}{separator}index.html"),
        IpAddr::V6(ip) => format!("http://[{ip}]:{port}{path}{separator}index.html"),
    }
}

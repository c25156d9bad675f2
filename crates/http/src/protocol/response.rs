//! Builders for every response this engine sends.
//!
//! Responses are plain `http::Response<Bytes>` values. Framing headers
//! (`content-length` and `connection`) are not set here: the
//! [`ResponseEncoder`](crate::codec::ResponseEncoder) always derives them from
//! the body it writes.

use std::borrow::Cow;

use bytes::Bytes;
use http::header::{CONTENT_TYPE, InvalidHeaderValue, LOCATION};
use http::{HeaderValue, Response, StatusCode};
use mime::Mime;

const TEXT_HTML: HeaderValue = HeaderValue::from_static("text/html");

const OCTET_STREAM: HeaderValue = HeaderValue::from_static("application/octet-stream");

pub const BAD_REQUEST_PAGE: &str = "<!doctype html>\n\
    <h1>400 Bad request</h1>\n\
    <p>Your browser sent a request that this server could not understand.</p>\n\
    <p>The request line or its parameters were malformed.</p>\n";

pub const NOT_FOUND_PAGE: &str = "<!doctype html>\n\
    <h1>404 Page not found</h1>\n\
    <p>Page cannot be found.</p>\n";

pub const INTERNAL_ERROR_PAGE: &str = "<!doctype html>\n\
    <h1>500 Internal server error</h1>\n\
    <p>The record could not be stored.</p>\n";

/// A `200 OK` response carrying `body` as `content_type`.
pub fn ok(body: impl Into<Bytes>, content_type: &Mime) -> Response<Bytes> {
    let content_type = HeaderValue::from_str(content_type.as_ref()).unwrap_or(OCTET_STREAM);
    with_content_type(StatusCode::OK, content_type, body.into())
}

/// A `301 Moved Permanently` response pointing at `location`.
///
/// # Errors
///
/// Fails when `location` contains bytes that are not allowed in a header value.
pub fn moved_permanently(location: &str) -> Result<Response<Bytes>, InvalidHeaderValue> {
    let location_value = HeaderValue::from_str(location)?;
    let body = format!(
        "<!doctype html>\n<h1>301 Moved Permanently</h1>\n<p>Location: {}</p>\n",
        escape_html(location)
    );

    let mut response = with_content_type(StatusCode::MOVED_PERMANENTLY, TEXT_HTML, body.into());
    response.headers_mut().insert(LOCATION, location_value);
    Ok(response)
}

pub fn bad_request() -> Response<Bytes> {
    with_content_type(StatusCode::BAD_REQUEST, TEXT_HTML, Bytes::from_static(BAD_REQUEST_PAGE.as_bytes()))
}

pub fn not_found() -> Response<Bytes> {
    with_content_type(StatusCode::NOT_FOUND, TEXT_HTML, Bytes::from_static(NOT_FOUND_PAGE.as_bytes()))
}

pub fn internal_error() -> Response<Bytes> {
    with_content_type(StatusCode::INTERNAL_SERVER_ERROR, TEXT_HTML, Bytes::from_static(INTERNAL_ERROR_PAGE.as_bytes()))
}

fn with_content_type(status: StatusCode, content_type: HeaderValue, body: Bytes) -> Response<Bytes> {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response.headers_mut().insert(CONTENT_TYPE, content_type);
    response
}

/// Guesses the media type from the file extension of `path`.
///
/// Unknown or missing extensions map to `application/octet-stream`.
pub fn guess_mime(path: &str) -> Mime {
    mime_guess::from_path(path).first_or_octet_stream()
}

/// Escapes the characters that would otherwise be interpreted as HTML markup.
pub fn escape_html(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(raw);
    }

    let mut escaped = String::with_capacity(raw.len() + 16);
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

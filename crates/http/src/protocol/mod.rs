//! Core HTTP protocol types.
//!
//! # Architecture
//!
//! - **Request Processing** (`request`): the immutable, fully parsed request
//!   - [`Request`]: method, raw target, version, headers and body
//!   - [`Method`]: the two supported request methods
//!   - [`Headers`]: case-insensitive, last-wins header storage
//!
//! - **Response Processing** ([`response`]): builders for every response the
//!   engine emits, from `200 OK` with a guessed content type to the fixed
//!   error pages
//!
//! - **Error Handling** (`error`): one error type per stage
//!   - [`HttpError`]: Top-level error type
//!   - [`ParseError`]: Request parsing errors, always answered with `400`
//!   - [`SendError`]: Response sending errors, the only ones that escape a connection

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;

mod header;
pub use header::Headers;

mod method;
pub use method::Method;

mod request;
pub use request::Request;

pub mod response;

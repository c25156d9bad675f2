//! HTTP header processing module for encoding and decoding headers
//!
//! # Components
//!
//! - [`HeaderDecoder`]: reads the request header block line by line
//!   - splits each line on its first colon
//!   - enforces line size and header count limits
//!
//! - [`HeaderEncoder`]: writes the response status line and headers
//!   - always derives `content-length` from the body
//!   - always announces `connection: close`

mod header_decoder;
mod header_encoder;

pub use header_decoder::HeaderDecoder;
pub use header_decoder::parse_header_line;
pub use header_encoder::HeaderEncoder;

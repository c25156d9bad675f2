//! Request body decoding.
//!
//! Only `Content-Length` framed bodies are supported; chunked transfer
//! encoding is never negotiated, so a request without a length has an empty
//! body.

mod length_decoder;

pub use length_decoder::LengthDecoder;

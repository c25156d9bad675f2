use bytes::{BufMut, Bytes, BytesMut};
use http::Response;

use crate::codec::header::HeaderEncoder;
use crate::protocol::SendError;

/// Encodes a whole response, head and body, into one buffer.
///
/// The connection writes nothing until encoding succeeded, so a response is
/// either sent completely or not at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseEncoder {
    header_encoder: HeaderEncoder,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// See [`HeaderEncoder::encode`].
    pub fn encode(&self, response: Response<Bytes>, dst: &mut BytesMut) -> Result<(), SendError> {
        let (mut head, body) = response.into_parts();
        self.header_encoder.encode(&mut head, body.len(), dst)?;
        dst.put(body);
        Ok(())
    }
}

use std::io::{ErrorKind, Read};

use bytes::{Bytes, BytesMut};
use tracing::trace;

use crate::protocol::ParseError;

/// Reads exactly `length` body bytes, tolerating short reads from the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthDecoder {
    length: u64,
}

impl LengthDecoder {
    pub fn new(length: u64) -> Self {
        Self { length }
    }

    /// # Errors
    ///
    /// Returns [`ParseError::IncompleteBody`] if the stream ends before `length`
    /// bytes arrived, or [`ParseError::Io`] if reading fails.
    pub fn decode<R: Read>(&self, reader: &mut R) -> Result<Bytes, ParseError> {
        let length = usize::try_from(self.length)
            .map_err(|e| ParseError::invalid_content_length(format!("{} does not fit in memory: {e}", self.length)))?;

        let mut buf = BytesMut::zeroed(length);
        let mut filled = 0;
        while filled < length {
            match reader.read(&mut buf[filled..]) {
                Ok(0) => return Err(ParseError::incomplete_body(self.length, filled as u64)),
                Ok(n) => {
                    filled += n;
                    trace!(read = n, filled, expected = length, "read body bytes");
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(buf.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    /// Hands out at most `step` bytes per read call.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let amt = self.step.min(buf.len()).min(self.data.len());
            buf[..amt].copy_from_slice(&self.data[..amt]);
            self.data = &self.data[amt..];
            Ok(amt)
        }
    }

    #[test]
    fn read_exact_length() {
        let mut reader = Cursor::new(b"first=Mick&last=Jaggerrest".to_vec());
        let body = LengthDecoder::new(22).decode(&mut reader).unwrap();
        assert_eq!(&body[..], b"first=Mick&last=Jagger");
        assert_eq!(reader.position(), 22);
    }

    #[test]
    fn read_across_partial_reads() {
        let mut reader = Trickle { data: b"first=Mick&last=Jagger", step: 3 };
        let body = LengthDecoder::new(22).decode(&mut reader).unwrap();
        assert_eq!(&body[..], b"first=Mick&last=Jagger");
    }

    #[test]
    fn empty_length() {
        let body = LengthDecoder::new(0).decode(&mut io::empty()).unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn stream_ends_early() {
        let mut reader = Cursor::new(b"first=Mick".to_vec());
        let result = LengthDecoder::new(22).decode(&mut reader);
        assert!(matches!(result, Err(ParseError::IncompleteBody { expected: 22, actual: 10 })));
    }
}

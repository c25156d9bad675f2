use std::io::{BufRead, Read};

use crate::ensure;
use crate::protocol::ParseError;

/// Reads one `\n` terminated line, keeping the terminator.
///
/// Returns `Ok(None)` when the stream is already at its end. A final line that
/// is not terminated before the end of the stream is returned as is.
pub(crate) fn read_line<R: BufRead>(reader: &mut R, max_bytes: usize) -> Result<Option<Vec<u8>>, ParseError> {
    let mut buf = Vec::with_capacity(128);
    let read = reader.by_ref().take(max_bytes as u64).read_until(b'\n', &mut buf)?;
    if read == 0 {
        return Ok(None);
    }

    ensure!(buf.last() == Some(&b'\n') || buf.len() < max_bytes, ParseError::too_large_header(buf.len(), max_bytes));
    Ok(Some(buf))
}

//! Exact-length and delimiter-bounded reads

use std::io::{ErrorKind, Read};

use crate::error::{self, Result};

/// Read exactly `count` bytes. A peer that closes early yields
/// `UnexpectedEof`; a short buffer is never returned.
pub fn read_exact<R: Read + ?Sized>(reader: &mut R, count: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; count];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Fixed-size variant of [`read_exact`] for protocol headers.
pub fn read_array<R: Read + ?Sized, const N: usize>(reader: &mut R) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Read one byte at a time until the buffer ends with `terminator`.
///
/// Never reads past the terminator, so whatever follows it stays in the
/// stream. Fails with `ResponseTooLarge` once `max_bytes` have been read
/// without seeing the terminator.
pub fn read_until<R: Read + ?Sized>(reader: &mut R, terminator: &[u8], max_bytes: usize) -> Result<Vec<u8>> {
    if terminator.is_empty() {
        return Ok(Vec::new());
    }

    let mut bytes = Vec::with_capacity(max_bytes.min(256));
    let mut byte = [0u8; 1];

    while bytes.len() < max_bytes {
        match reader.read(&mut byte) {
            Ok(0) => return Err(error::unexpected_eof()),
            Ok(_) => {
                bytes.push(byte[0]);
                if bytes.ends_with(terminator) {
                    return Ok(bytes);
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }

    Err(error::response_too_large(max_bytes))
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use super::*;
    use crate::error::Kind;

    /// Yields an endless stream of the same byte.
    struct Repeat(u8);

    impl Read for Repeat {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            buf.fill(self.0);
            Ok(buf.len())
        }
    }

    #[test]
    fn test_read_exact_short_stream_is_eof() {
        let mut reader = Cursor::new(vec![1u8, 2, 3]);
        let err = read_exact(&mut reader, 8).expect_err("only 3 of 8 bytes available");
        assert_eq!(err.kind(), &Kind::UnexpectedEof);
    }

    #[test]
    fn test_read_exact_full() {
        let mut reader = Cursor::new(vec![1u8, 2, 3, 4, 5]);
        assert_eq!(read_exact(&mut reader, 4).expect("4 bytes available"), vec![1, 2, 3, 4]);
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn test_read_until_stops_at_terminator() {
        let mut reader = Cursor::new(b"HTTP/1.1 200 OK\r\n\r\npayload".to_vec());
        let head = read_until(&mut reader, b"\r\n\r\n", 1024).expect("terminator present");
        assert_eq!(head, b"HTTP/1.1 200 OK\r\n\r\n");

        let mut rest = Vec::new();
        reader.read_to_end(&mut rest).expect("read remaining payload");
        assert_eq!(rest, b"payload");
    }

    #[test]
    fn test_read_until_bound_exhausted() {
        let err = read_until(&mut Repeat(b'a'), b"\r\n\r\n", 64).expect_err("terminator never arrives");
        assert_eq!(err.kind(), &Kind::ResponseTooLarge { limit: 64 });
    }

    #[test]
    fn test_read_until_terminator_at_exact_bound() {
        let mut reader = Cursor::new(b"ab\r\n".to_vec());
        let bytes = read_until(&mut reader, b"\r\n", 4).expect("terminator ends at the bound");
        assert_eq!(bytes.len(), 4);
    }

    #[test]
    fn test_read_until_eof_before_terminator() {
        let mut reader = Cursor::new(b"HTTP/1.1 200".to_vec());
        let err = read_until(&mut reader, b"\r\n\r\n", 1024).expect_err("stream ends first");
        assert_eq!(err.kind(), &Kind::UnexpectedEof);
    }
}

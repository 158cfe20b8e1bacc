//! In-memory transport for handshake tests

use std::io::{self, Cursor, Read, Write};

/// Replays scripted proxy bytes and records everything written.
pub(crate) struct MockStream {
    input: Cursor<Vec<u8>>,
    pub(crate) written: Vec<u8>,
}

impl MockStream {
    pub(crate) fn new(reply: &[u8]) -> Self {
        Self {
            input: Cursor::new(reply.to_vec()),
            written: Vec::new(),
        }
    }

    /// Bytes of the scripted reply the handshake did not consume.
    pub(crate) fn remaining(&self) -> &[u8] {
        let pos = usize::try_from(self.input.position()).unwrap_or(usize::MAX);
        self.input.get_ref().get(pos..).unwrap_or_default()
    }
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

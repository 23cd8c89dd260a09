//! Body stream contract.
//!
//! Messages only need read, write and seek on their body. Anything that
//! provides the three std traits can be plugged in; the default is an
//! in-memory buffer.

use std::fmt;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

pub trait BodyStream: Read + Write + Seek + Send {}

impl<T: Read + Write + Seek + Send> BodyStream for T {}

pub struct Body {
    stream: Box<dyn BodyStream>,
}

impl Body {
    pub fn new(stream: impl BodyStream + 'static) -> Self {
        Self {
            stream: Box::new(stream),
        }
    }

    pub fn empty() -> Self {
        Self::new(Cursor::new(Vec::new()))
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(Cursor::new(bytes.into()))
    }

    /// Rewinds and reads the whole stream, leaving the cursor at the end.
    pub fn read_all(&mut self) -> io::Result<Vec<u8>> {
        self.stream.seek(SeekFrom::Start(0))?;
        let mut buf = Vec::new();
        self.stream.read_to_end(&mut buf)?;
        Ok(buf)
    }

    pub fn stream_mut(&mut self) -> &mut dyn BodyStream {
        self.stream.as_mut()
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Body { .. }")
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl Write for Body {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

impl Seek for Body {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.stream.seek(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_all() {
        let mut body = Body::empty();
        body.write_all(b"hello ").unwrap();
        body.write_all(b"world").unwrap();
        assert_eq!(body.read_all().unwrap(), b"hello world");
        // repeatable
        assert_eq!(body.read_all().unwrap(), b"hello world");
    }
}

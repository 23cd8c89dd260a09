//! Outbound transmission of a message.
//!
//! Serializing is done by the message itself
//! ([`HttpMessage::build_headers`]); this module only pushes the rendered
//! head and the body stream into an async sink such as a `TcpStream`.
//!
//! The body is read from its start regardless of where its cursor was left.

use async_std::io::{Write, WriteExt};
use std::io::{Read, Seek, SeekFrom};

use crate::error::Result;
use crate::http::message::HttpMessage;

const CHUNK_SIZE: usize = 8192;

/// Writes the head, then the body in fixed-size chunks. Returns the number
/// of body bytes written.
pub async fn emit<M, W>(sink: &mut W, message: &mut M) -> Result<u64>
where
    M: HttpMessage,
    W: Write + Unpin,
{
    let head = message.build_headers();
    sink.write_all(head.as_bytes()).await?;

    let body = message.body_mut();
    body.seek(SeekFrom::Start(0))?;

    let mut chunk = vec![0; CHUNK_SIZE];
    let mut written = 0u64;
    loop {
        let n = match body.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        sink.write_all(&chunk[..n]).await?;
        written += n as u64;
    }

    sink.flush().await?;
    tracing::debug!(head = head.len(), body = written, "message emitted");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::HttpResponse;
    use std::io::Write as _;

    #[test]
    fn test_emit_response() {
        let mut res = HttpResponse::with_status(201).unwrap();
        res.headers.set("Content-Length", "4");
        res.body.write_all(b"done").unwrap();

        let mut sink: Vec<u8> = Vec::new();
        let written = async_std::task::block_on(emit(&mut sink, &mut res)).unwrap();
        assert_eq!(written, 4);
        assert_eq!(
            String::from_utf8(sink).unwrap(),
            "HTTP/1.1 201 Created\r\nContent-Length: 4\r\n\r\ndone"
        );
    }
}

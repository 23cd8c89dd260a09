//! Behaviour shared by requests and responses.
//!
//! Both own a header store, a body stream and a protocol version tag. The
//! cookie registry and the transport emitter only go through this trait.

use std::io;

use crate::http::HttpVersion;
use crate::http::body::Body;
use crate::http::headers::HttpHeaders;

pub trait HttpMessage {
    fn version(&self) -> HttpVersion;

    fn set_version(&mut self, version: HttpVersion);

    fn headers(&self) -> &HttpHeaders;

    fn headers_mut(&mut self) -> &mut HttpHeaders;

    fn body_mut(&mut self) -> &mut Body;

    fn set_body(&mut self, body: Body);

    /// Start line (or pseudo-headers) followed by the header lines and the
    /// blank separator line.
    fn build_headers(&self) -> String;

    /// Rendered head followed by the full body.
    fn to_wire(&mut self) -> io::Result<Vec<u8>> {
        let mut wire = self.build_headers().into_bytes();
        wire.extend(self.body_mut().read_all()?);
        Ok(wire)
    }
}

/// Regular header lines for HTTP/2 and HTTP/3 textual rendering, names
/// lowercased as those protocols require. Names in `skip` are already
/// carried by a pseudo-header.
pub(crate) fn stringify_lowercase(headers: &HttpHeaders, skip: &[&str]) -> String {
    let mut result = String::new();
    for (name, values) in headers.iter() {
        let name = name.to_ascii_lowercase();
        if skip.contains(&name.as_str()) {
            continue;
        }
        for value in values {
            result.push_str(&format!("{}: {}\r\n", name, value));
        }
    }
    result
}

//! Incremental HTTP/1.x request parser.
//!
//! Bytes are fed as they arrive from the transport. The parser walks
//! request line → headers → body and fills an [`HttpRequest`] in place:
//! the target becomes a [`Uri`], header lines go through the filtering
//! header store and a `Content-Length` body is written into the request's
//! body stream.

use std::io::Write;

use thiserror::Error;

use crate::config::MessageConfig;
use crate::http::headers::HttpHeaders;
use crate::http::request::HttpRequest;
use crate::http::status::HttpStatus;
use crate::http::uri::Uri;
use crate::http::{HttpMethod, HttpVersion};

const HTTP_METHOD_MAX_LEN: usize = 16;

#[derive(Debug, PartialEq, Eq)]
pub enum ParserOk {
    /// More bytes are needed.
    Incomplete,
    /// Request line and headers are in; the body may follow.
    HeadersDone,
    Done,
}

// To keep parser logic separate from HTTP status codes,
// errors are mapped to a status only at the edge.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParserError {
    #[error("malformed request")]
    Malformed,

    #[error("payload too large")]
    PayloadTooLarge,

    #[error("request target too long")]
    UriTooLong,

    #[error("request header fields too large")]
    HeaderTooLarge,

    #[error("HTTP version not supported")]
    HttpVersionNotSupported,

    #[error("body stream rejected the payload")]
    BodyStream,
}

impl ParserError {
    pub fn into_http_status(self) -> HttpStatus {
        match self {
            ParserError::Malformed => HttpStatus::BAD_REQUEST,
            ParserError::PayloadTooLarge => HttpStatus::PAYLOAD_TOO_LARGE,
            ParserError::UriTooLong => HttpStatus::URI_TOO_LONG,
            ParserError::HeaderTooLarge => HttpStatus::REQUEST_HEADER_FIELDS_TOO_LARGE,
            ParserError::HttpVersionNotSupported => HttpStatus::HTTP_VERSION_NOT_SUPPORTED,
            ParserError::BodyStream => HttpStatus::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, PartialEq)]
enum ParserState {
    RequestLine,
    Headers,
    Body,
    Done,
}

#[derive(Debug)]
pub struct RequestParser {
    buf: Vec<u8>,
    state: ParserState,
    max_version: HttpVersion,
    max_path_size: usize,
    max_header_size: usize,
    max_body_size: usize,
    body_remaining: usize,
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

impl RequestParser {
    pub fn new(config: &MessageConfig) -> Self {
        Self {
            buf: Vec::new(),
            state: ParserState::RequestLine,
            max_version: config.http_version,
            max_path_size: config.max_path_size,
            max_header_size: config.max_header_size,
            max_body_size: config.max_body_size,
            body_remaining: 0,
        }
    }

    pub fn is_buffer_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn is_done(&self) -> bool {
        self.state == ParserState::Done
    }

    fn parse_request_line(&mut self, req: &mut HttpRequest) -> Result<ParserOk, ParserError> {
        let Some(line_end) = find(&self.buf, b"\r\n") else {
            // method + SP + target + SP + "HTTP/x.y"
            if self.buf.len() > self.max_path_size + HTTP_METHOD_MAX_LEN + 10 {
                return Err(ParserError::UriTooLong);
            }
            return Ok(ParserOk::Incomplete);
        };

        // Request line: METHOD TARGET HTTP/VERSION
        let line = std::str::from_utf8(&self.buf[..line_end]).map_err(|_| ParserError::Malformed)?;
        let parts: Vec<&str> = line.split(' ').collect();
        if parts.len() != 3 || parts[0].len() > HTTP_METHOD_MAX_LEN {
            return Err(ParserError::Malformed);
        }

        let method = parts[0]
            .parse::<HttpMethod>()
            .map_err(|_| ParserError::Malformed)?;

        let target = parts[1];
        if target.len() > self.max_path_size {
            return Err(ParserError::UriTooLong);
        }

        if !parts[2].starts_with("HTTP/") {
            return Err(ParserError::Malformed);
        }
        let version = match HttpVersion::from_token(parts[2]) {
            Some(v @ (HttpVersion::V1_0 | HttpVersion::V1_1)) if v <= self.max_version => v,
            _ => return Err(ParserError::HttpVersionNotSupported),
        };

        let uri = Uri::parse(target).map_err(|err| {
            tracing::debug!(%err, request_target = target, "rejecting request target");
            ParserError::Malformed
        })?;

        req.method = method;
        req.uri = uri;
        req.http_version = version;

        // Successfully parsed request line,
        // drop it (and its CRLF) from the buffer
        self.buf.drain(..line_end + 2);
        self.state = ParserState::Headers;
        Ok(ParserOk::Incomplete)
    }

    fn parse_headers(&mut self, req: &mut HttpRequest) -> Result<ParserOk, ParserError> {
        let (block_end, consumed) = if self.buf.starts_with(b"\r\n") {
            (0, 2)
        } else {
            match find(&self.buf, b"\r\n\r\n") {
                Some(end) => (end, end + 4),
                None if self.buf.len() > self.max_header_size => {
                    return Err(ParserError::HeaderTooLarge);
                }
                None => return Ok(ParserOk::Incomplete),
            }
        };

        if block_end > self.max_header_size {
            return Err(ParserError::HeaderTooLarge);
        }

        let block = String::from_utf8_lossy(&self.buf[..block_end]).into_owned();
        let mut headers = HttpHeaders::new();
        headers.parse_block(&block);
        req.headers = headers;
        self.buf.drain(..consumed);

        if req.http_version == HttpVersion::V1_1 && !req.headers.has("Host") {
            return Err(ParserError::Malformed);
        }
        req.fill_host_from_header()
            .map_err(|_| ParserError::Malformed)?;

        self.body_remaining = match req.headers.get("Content-Length") {
            Ok(value) => value.parse::<usize>().map_err(|_| ParserError::Malformed)?,
            Err(_) => 0,
        };
        if self.body_remaining > self.max_body_size {
            return Err(ParserError::PayloadTooLarge);
        }

        self.state = if self.body_remaining == 0 {
            ParserState::Done
        } else {
            ParserState::Body
        };
        tracing::trace!(body = self.body_remaining, "request head parsed");
        Ok(ParserOk::HeadersDone)
    }

    fn parse_body(&mut self, req: &mut HttpRequest) -> Result<ParserOk, ParserError> {
        let to_copy = std::cmp::min(self.buf.len(), self.body_remaining);
        req.body
            .write_all(&self.buf[..to_copy])
            .map_err(|_| ParserError::BodyStream)?;
        self.buf.drain(..to_copy);
        self.body_remaining -= to_copy;

        if self.body_remaining == 0 {
            self.state = ParserState::Done;
            return Ok(ParserOk::Done);
        }
        Ok(ParserOk::Incomplete)
    }

    /// Buffers `buf` and advances as far as the buffered bytes allow.
    ///
    /// Returns [`ParserOk::HeadersDone`] once, right after the head is
    /// parsed, so the caller can inspect the request before the body is
    /// read. Feed an empty slice to keep going without new data.
    ///
    /// Head limits only count bytes before the blank line; body bytes that
    /// arrive in the same chunk are checked against `max_body_size`.
    pub fn feed(&mut self, buf: &[u8], req: &mut HttpRequest) -> Result<ParserOk, ParserError> {
        self.buf.extend_from_slice(buf);

        loop {
            match self.state {
                ParserState::RequestLine => {
                    self.parse_request_line(req)?;
                    if self.state == ParserState::RequestLine {
                        return Ok(ParserOk::Incomplete);
                    }
                }
                ParserState::Headers => return self.parse_headers(req),
                ParserState::Body => return self.parse_body(req),
                ParserState::Done => return Ok(ParserOk::Done),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::message::HttpMessage;

    fn new_request() -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, Uri::new())
    }

    fn parse_all(raw: &[u8]) -> Result<HttpRequest, ParserError> {
        let mut parser = RequestParser::new(&MessageConfig::default());
        let mut req = new_request();
        let mut res = parser.feed(raw, &mut req)?;
        while res != ParserOk::Done {
            if res == ParserOk::Incomplete && parser.is_buffer_empty() {
                return Err(ParserError::Malformed);
            }
            res = parser.feed(&[], &mut req)?;
        }
        Ok(req)
    }

    #[test]
    fn test_full_request() {
        let mut req = parse_all(
            b"POST /submit?a=1 HTTP/1.1\r\nHost: example.com:8080\r\ncontent-length: 5\r\nX-Note: a\r\n  b\r\n\r\nhello",
        )
        .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.http_version, HttpVersion::V1_1);
        assert_eq!(req.uri.host(), Some("example.com"));
        assert_eq!(req.uri.port(), 8080);
        assert_eq!(req.uri.query("a").as_deref(), Some("1"));
        assert_eq!(req.headers.get("X-Note").unwrap(), "a b");
        assert_eq!(req.body_mut().read_all().unwrap(), b"hello");
    }

    #[test]
    fn test_byte_by_byte() {
        let raw = b"GET / HTTP/1.1\r\nHost: a.test\r\nContent-Length: 2\r\n\r\nok";
        let mut parser = RequestParser::new(&MessageConfig::default());
        let mut req = new_request();
        let mut outcomes = Vec::new();
        for b in raw.iter() {
            outcomes.push(parser.feed(std::slice::from_ref(b), &mut req).unwrap());
        }
        assert_eq!(outcomes.last(), Some(&ParserOk::Done));
        assert_eq!(outcomes.iter().filter(|o| **o == ParserOk::HeadersDone).count(), 1);
        assert!(parser.is_done());
        assert_eq!(req.body_mut().read_all().unwrap(), b"ok");
    }

    #[test]
    fn test_no_headers_http10() {
        let req = parse_all(b"GET /x HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(req.http_version, HttpVersion::V1_0);
        assert!(req.headers.is_empty());
        assert_eq!(req.uri.request_target(), "/x");
    }

    #[test]
    fn test_absolute_form_target() {
        let req = parse_all(b"GET http://proxy.test/p HTTP/1.1\r\nHost: other.test\r\n\r\n").unwrap();
        assert_eq!(req.uri.host(), Some("proxy.test"));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_all(b"GET / HTTP/1.1\r\n\r\n").unwrap_err(), ParserError::Malformed);
        assert_eq!(parse_all(b"BREW / HTTP/1.1\r\nHost: a\r\n\r\n").unwrap_err(), ParserError::Malformed);
        assert_eq!(parse_all(b"GET / HTTP/2.0\r\n\r\n").unwrap_err(), ParserError::HttpVersionNotSupported);
        assert_eq!(parse_all(b"GET /a b HTTP/1.1\r\n\r\n").unwrap_err(), ParserError::Malformed);
        assert_eq!(
            parse_all(b"GET / HTTP/1.1\r\nHost: a\r\nContent-Length: x\r\n\r\n").unwrap_err(),
            ParserError::Malformed
        );
        assert_eq!(
            parse_all(b"POST / HTTP/1.1\r\nHost: a\r\nContent-Length: 99999999\r\n\r\n").unwrap_err(),
            ParserError::PayloadTooLarge
        );

        let strict = MessageConfig {
            http_version: HttpVersion::V1_0,
            ..MessageConfig::default()
        };
        let mut parser = RequestParser::new(&strict);
        assert_eq!(
            parser.feed(b"GET / HTTP/1.1\r\nHost: a\r\n\r\n", &mut new_request()).unwrap_err(),
            ParserError::HttpVersionNotSupported
        );

        let long = format!("GET /{} HTTP/1.1\r\nHost: a\r\n\r\n", "a".repeat(2000));
        assert_eq!(parse_all(long.as_bytes()).unwrap_err(), ParserError::UriTooLong);
        assert_eq!(ParserError::UriTooLong.into_http_status(), HttpStatus::URI_TOO_LONG);
    }

    #[test]
    fn test_body_in_same_chunk_as_head() {
        let mut raw = b"POST / HTTP/1.1\r\nHost: a.test\r\nContent-Length: 10000\r\n\r\n".to_vec();
        raw.extend(std::iter::repeat_n(b'x', 10000));
        let mut req = parse_all(&raw).unwrap();
        assert_eq!(req.body_mut().read_all().unwrap().len(), 10000);
    }

    #[test]
    fn test_oversized_head() {
        let huge = format!("GET / HTTP/1.1\r\nHost: a\r\nX-Big: {}\r\n\r\n", "a".repeat(9000));
        assert_eq!(parse_all(huge.as_bytes()).unwrap_err(), ParserError::HeaderTooLarge);

        let mut parser = RequestParser::new(&MessageConfig::default());
        let unterminated = format!("GET / HTTP/1.1\r\nX-Big: {}", "a".repeat(9000));
        assert_eq!(
            parser.feed(unterminated.as_bytes(), &mut new_request()).unwrap_err(),
            ParserError::HeaderTooLarge
        );
    }

    #[test]
    fn test_injected_header_value_is_filtered() {
        let req = parse_all(b"GET / HTTP/1.1\r\nHost: a\r\nX-Evil: one\rtwo\r\n\r\n").unwrap();
        assert_eq!(req.headers.get("X-Evil").unwrap(), "onetwo");
    }
}

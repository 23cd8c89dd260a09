use crate::error::Result;
use crate::http::HttpVersion;
use crate::http::body::Body;
use crate::http::headers::HttpHeaders;
use crate::http::message::{HttpMessage, stringify_lowercase};
use crate::http::status::HttpStatus;

#[derive(Debug, Default)]
pub struct HttpResponse {
    pub status: HttpStatus,
    // overrides the canonical reason phrase
    reason: Option<String>,
    pub http_version: HttpVersion,
    pub headers: HttpHeaders,
    pub body: Body,
}

impl HttpResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(code: u16) -> Result<Self> {
        let mut res = Self::new();
        res.set_status(code, None)?;
        Ok(res)
    }

    /// Sets the status code and an optional custom reason phrase.
    pub fn set_status(&mut self, code: u16, reason: Option<&str>) -> Result<()> {
        self.status = HttpStatus::from_u16(code)?;
        self.reason = reason.map(|r| crate::http::headers::filter_value(r).replace("\r\n", ""));
        Ok(())
    }

    pub fn reason(&self) -> &str {
        self.reason
            .as_deref()
            .unwrap_or_else(|| self.status.canonical_reason())
    }
}

impl HttpMessage for HttpResponse {
    fn version(&self) -> HttpVersion {
        self.http_version
    }

    fn set_version(&mut self, version: HttpVersion) {
        self.http_version = version;
    }

    fn headers(&self) -> &HttpHeaders {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HttpHeaders {
        &mut self.headers
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn set_body(&mut self, body: Body) {
        self.body = body;
    }

    fn build_headers(&self) -> String {
        if self.http_version.is_multiplexed() {
            // :status: <status>\r\n
            // <header_name>: <header_value>\r\n
            // ...
            // \r\n
            return format!(
                ":status: {}\r\n{}\r\n",
                self.status,
                stringify_lowercase(&self.headers, &[])
            );
        }

        // HTTP/<major>.<minor> <status> <reason>\r\n
        // <header_name>: <header_value>\r\n
        // ...
        // \r\n
        format!(
            "{} {} {}\r\n{}\r\n",
            self.http_version,
            self.status,
            self.reason(),
            self.headers.stringify(),
        )
    }
}

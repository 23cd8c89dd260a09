use crate::error::{Error, Result};
use crate::http::body::Body;
use crate::http::headers::HttpHeaders;
use crate::http::message::{HttpMessage, stringify_lowercase};
use crate::http::upload::UploadedFile;
use crate::http::uri::Uri;
use crate::http::{HttpMethod, HttpVersion};

/// Everything an ingesting layer knows about an incoming request, handed
/// over explicitly instead of being read from ambient server state.
#[derive(Debug, Default)]
pub struct RequestInput {
    pub method: String,
    /// `HTTP/x.y`, defaults to HTTP/1.1
    pub protocol: Option<String>,
    pub scheme: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub path: Option<String>,
    pub query: Option<String>,
    pub headers: Vec<(String, String)>,
    pub files: Vec<UploadedFile>,
    pub body: Option<Body>,
}

#[derive(Debug)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub uri: Uri,
    pub http_version: HttpVersion,

    pub headers: HttpHeaders,
    pub body: Body,
    pub uploaded_files: Vec<UploadedFile>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, uri: Uri) -> Self {
        let mut req = Self {
            method,
            uri: Uri::new(),
            http_version: HttpVersion::default(),
            headers: HttpHeaders::new(),
            body: Body::empty(),
            uploaded_files: Vec::new(),
        };
        req.set_uri(uri, false);
        req
    }

    /// Builds a request from an explicit input record.
    ///
    /// When the URI parts carry no host, the `Host` header fills it in.
    pub fn from_input(input: RequestInput) -> Result<Self> {
        let method = input.method.parse::<HttpMethod>()?;
        let http_version = match input.protocol.as_deref() {
            Some(token) => HttpVersion::from_token(token)
                .ok_or_else(|| Error::invalid("protocol", token))?,
            None => HttpVersion::default(),
        };

        let mut uri = Uri::new();
        uri.set_scheme(input.scheme.as_deref())?;
        uri.set_host(input.host.as_deref())?;
        uri.set_port(input.port);
        uri.set_path(input.path.as_deref())?;
        uri.set_querystring(input.query.as_deref())?;

        let mut headers = HttpHeaders::new();
        for (name, value) in &input.headers {
            headers.append(name, value);
        }

        let mut req = Self {
            method,
            uri,
            http_version,
            headers,
            body: input.body.unwrap_or_default(),
            uploaded_files: input.files,
        };
        req.fill_host_from_header()?;
        Ok(req)
    }

    /// Copies `Host: name[:port]` into the URI if it has no host yet.
    pub(crate) fn fill_host_from_header(&mut self) -> Result<()> {
        if self.uri.host().is_some() {
            return Ok(());
        }
        let Ok(host) = self.headers.get("Host") else {
            return Ok(());
        };

        let parsed = Uri::parse(&format!("//{}", host))?;
        self.uri.set_host(parsed.host())?;
        self.uri.set_port(parsed.explicit_port());
        Ok(())
    }

    /// Replaces the URI. Unless `preserve_host` is set and a `Host` header is
    /// already present, the header is rewritten from the new URI's host.
    pub fn set_uri(&mut self, uri: Uri, preserve_host: bool) {
        self.uri = uri;
        if preserve_host && self.headers.has("Host") {
            return;
        }

        if let Some(host) = self.uri.host() {
            let value = match self.uri.explicit_port() {
                Some(port) if !self.uri.is_default_port() => format!("{}:{}", host, port),
                _ => host.to_string(),
            };
            self.headers.set("Host", &value);
        }
    }

    pub fn uploaded_files(&self) -> &[UploadedFile] {
        &self.uploaded_files
    }
}

impl HttpMessage for HttpRequest {
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
            // :method: <method>\r\n
            // :scheme: <scheme>\r\n
            // :authority: <authority>\r\n
            // :path: <target>\r\n
            // <header_name>: <header_value>\r\n
            // ...
            // \r\n
            let mut pseudo = format!(":method: {}\r\n", self.method);
            if let Some(scheme) = self.uri.scheme() {
                pseudo.push_str(&format!(":scheme: {}\r\n", scheme));
            }
            let authority = self.uri.authority();
            if let Some(authority) = &authority {
                pseudo.push_str(&format!(":authority: {}\r\n", authority));
            }
            pseudo.push_str(&format!(":path: {}\r\n", self.uri.request_target()));

            let skip: &[&str] = if authority.is_some() { &["host"] } else { &[] };
            return format!("{}{}\r\n", pseudo, stringify_lowercase(&self.headers, skip));
        }

        // <METHOD> <target> HTTP/<major>.<minor>\r\n
        // <header_name>: <header_value>\r\n
        // ...
        // \r\n
        format!(
            "{} {} {}\r\n{}\r\n",
            self.method,
            self.uri.request_target(),
            self.http_version,
            self.headers.stringify(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_new_sets_host_header() {
        let req = HttpRequest::new(HttpMethod::Get, Uri::parse("http://example.com:8080/a?b=1").unwrap());
        assert_eq!(req.headers.get("host").unwrap(), "example.com:8080");
        assert_eq!(
            req.build_headers(),
            "GET /a?b=1 HTTP/1.1\r\nHost: example.com:8080\r\n\r\n"
        );
    }

    #[test]
    fn test_set_uri_preserve_host() {
        let mut req = HttpRequest::new(HttpMethod::Get, Uri::parse("https://a.test/").unwrap());
        req.set_uri(Uri::parse("https://b.test:443/").unwrap(), true);
        assert_eq!(req.headers.get("Host").unwrap(), "a.test");
        req.set_uri(Uri::parse("https://b.test:443/").unwrap(), false);
        assert_eq!(req.headers.get("Host").unwrap(), "b.test");
    }

    #[test]
    fn test_from_input() {
        let input = RequestInput {
            method: "POST".to_string(),
            protocol: Some("HTTP/1.0".to_string()),
            scheme: Some("http".to_string()),
            path: Some("/submit".to_string()),
            query: Some("x=1".to_string()),
            headers: vec![
                ("host".to_string(), "example.com:8080".to_string()),
                ("content type".to_string(), "text/plain".to_string()),
            ],
            body: Some(Body::from_bytes("hi")),
            ..Default::default()
        };
        let mut req = HttpRequest::from_input(input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.version(), HttpVersion::V1_0);
        assert_eq!(req.uri.to_string(), "http://example.com:8080/submit?x=1");
        assert_eq!(req.headers.get("Content-Type").unwrap(), "text/plain");
        assert_eq!(req.body_mut().read_all().unwrap(), b"hi");
    }

    #[test]
    fn test_from_input_rejects_bad_parts() {
        let bad_method = RequestInput {
            method: "FETCH".to_string(),
            ..Default::default()
        };
        assert!(HttpRequest::from_input(bad_method).unwrap_err().is_invalid_input());

        let bad_host = RequestInput {
            method: "GET".to_string(),
            host: Some("bad host".to_string()),
            ..Default::default()
        };
        assert!(HttpRequest::from_input(bad_host).is_err());

        let bad_protocol = RequestInput {
            method: "GET".to_string(),
            protocol: Some("SPDY/3".to_string()),
            ..Default::default()
        };
        assert!(HttpRequest::from_input(bad_protocol).is_err());
    }

    #[test]
    fn test_pseudo_header_rendering() {
        let mut req = HttpRequest::new(HttpMethod::Get, Uri::parse("https://example.com/x?y=1").unwrap());
        req.set_version(HttpVersion::V2_0);
        req.headers.set("Accept", "*/*");
        assert_eq!(
            req.build_headers(),
            ":method: GET\r\n:scheme: https\r\n:authority: example.com\r\n:path: /x?y=1\r\naccept: */*\r\n\r\n"
        );
    }

    #[test]
    fn test_to_wire_includes_body() {
        let mut req = HttpRequest::new(HttpMethod::Put, Uri::parse("http://h.test/r").unwrap());
        req.headers.set("Content-Length", "3");
        req.body_mut().write_all(b"abc").unwrap();
        let wire = req.to_wire().unwrap();
        assert_eq!(
            String::from_utf8(wire).unwrap(),
            "PUT /r HTTP/1.1\r\nHost: h.test\r\nContent-Length: 3\r\n\r\nabc"
        );
    }
}

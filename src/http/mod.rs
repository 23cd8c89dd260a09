use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub mod body;
pub mod cookie;
pub mod headers;
pub mod message;
pub mod parser;
pub mod request;
pub mod response;
pub mod status;
pub mod upload;
pub mod uri;
pub mod validator;

/// All existing HTTP versions.
/// Messages carry one as their protocol tag; 2.0 and 3.0 switch rendering
/// to the textual pseudo-header form.
#[derive(PartialEq, Eq, PartialOrd, Debug, Clone, Copy, Default, Deserialize)]
pub enum HttpVersion {
    V0_9,
    V1_0,
    #[default]
    V1_1,
    V2_0,
    V3_0,
}

impl HttpVersion {
    /// Maps a (major, minor) pair onto a known HTTP version.
    pub fn from_pair(v: (u8, u8)) -> Option<HttpVersion> {
        match v {
            (0, 9) => Some(HttpVersion::V0_9),
            (1, 0) => Some(HttpVersion::V1_0),
            (1, 1) => Some(HttpVersion::V1_1),
            (2, _) => Some(HttpVersion::V2_0),
            (3, _) => Some(HttpVersion::V3_0),
            _ => None,
        }
    }

    /// Parses the `HTTP/x.y` token of a start line. `HTTP/2` and `HTTP/3`
    /// are accepted without a minor digit.
    pub fn from_token(token: &str) -> Option<HttpVersion> {
        let v = token.strip_prefix("HTTP/")?;
        let (maj, min) = match v.split_once('.') {
            Some((maj, min)) => (maj.parse::<u8>().ok()?, min.parse::<u8>().ok()?),
            None => (v.parse::<u8>().ok()?, 0),
        };
        Self::from_pair((maj, min))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVersion::V0_9 => "0.9",
            HttpVersion::V1_0 => "1.0",
            HttpVersion::V1_1 => "1.1",
            HttpVersion::V2_0 => "2",
            HttpVersion::V3_0 => "3",
        }
    }

    /// HTTP/2 and HTTP/3 render their start line as pseudo-headers.
    pub fn is_multiplexed(&self) -> bool {
        *self >= HttpVersion::V2_0
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP/{}", self.as_str())
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Connect,
    Options,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(method: &str) -> Result<Self> {
        match method {
            "GET" => Ok(HttpMethod::Get),
            "HEAD" => Ok(HttpMethod::Head),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "TRACE" => Ok(HttpMethod::Trace),
            "OPTIONS" => Ok(HttpMethod::Options),
            "CONNECT" => Ok(HttpMethod::Connect),
            _ => Err(Error::invalid("method", method)),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_tokens() {
        assert_eq!(HttpVersion::from_token("HTTP/1.1"), Some(HttpVersion::V1_1));
        assert_eq!(HttpVersion::from_token("HTTP/1.0"), Some(HttpVersion::V1_0));
        assert_eq!(HttpVersion::from_token("HTTP/2"), Some(HttpVersion::V2_0));
        assert_eq!(HttpVersion::from_token("HTTP/1.7"), None);
        assert_eq!(HttpVersion::from_token("HTP/1.1"), None);
        assert_eq!(HttpVersion::V1_1.to_string(), "HTTP/1.1");
        assert!(HttpVersion::V3_0.is_multiplexed());
        assert!(!HttpVersion::V1_1.is_multiplexed());
    }

    #[test]
    fn test_method_parse() {
        assert_eq!("PATCH".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert!("get".parse::<HttpMethod>().unwrap_err().is_invalid_input());
        assert!("BREW".parse::<HttpMethod>().is_err());
    }
}

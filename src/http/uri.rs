//! Mutable URI value object.
//!
//! A [`Uri`] keeps the seven RFC 3986 components separately. Each one has its
//! own setter which validates through [`Validator`] before touching any
//! state, so a failed call leaves the previous value in place. The
//! authority is never stored; it is derived from user, password, host and
//! port on demand.
//!
//! Path segments and query pairs are kept as percent-decoded octets and
//! re-encoded on output, which canonicalizes escapes: `%7e` comes back as
//! `~`, while an encoded `%2F` stays inside its segment instead of turning
//! into a separator. Octets that are not UTF-8 (`%FF`) survive untouched.
//!
//! Setters mutate in place. Clone the value before handing it to code that
//! should not observe later changes.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, percent_encode};

use crate::error::{Error, Result};
use crate::http::validator::Validator;

/// Unreserved characters stay literal, everything else in a query key or
/// value is escaped (no `+` for space).
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// pchar minus the escapes: unreserved, sub-delims, `:` and `@`.
/// `/` is escaped so it cannot leak out of its segment.
const SEGMENT_ENCODE_SET: &AsciiSet = &QUERY_ENCODE_SET
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@');

/// Well-known port for the schemes whose default is elided from the
/// authority.
pub fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    }
}

fn decode(s: &str) -> Vec<u8> {
    percent_decode_str(s).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Uri {
    scheme: Option<String>,
    user: Option<String>,
    password: Option<String>,
    host: Option<String>,
    // 0 means unset or the scheme default
    port: u16,
    segments: Option<Vec<Vec<u8>>>,
    query: IndexMap<Vec<u8>, Vec<u8>>,
    fragment: Option<String>,
}

impl Uri {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `input` the way RFC 3986 appendix B does and feeds every piece
    /// through its setter.
    pub fn parse(input: &str) -> Result<Self> {
        let mut uri = Uri::new();

        let (rest, fragment) = match input.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (input, None),
        };
        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(query)),
            None => (rest, None),
        };

        let mut rest = rest;
        if let Some(i) = rest.find(':') {
            let candidate = &rest[..i];
            if !candidate.is_empty() && !candidate.contains('/') {
                uri.set_scheme(Some(candidate))?;
                rest = &rest[i + 1..];
            }
        }

        if let Some(after) = rest.strip_prefix("//") {
            let end = after.find('/').unwrap_or(after.len());
            uri.set_authority(&after[..end])?;
            rest = &after[end..];
        }

        uri.set_path(Some(rest))?;
        uri.set_querystring(query)?;
        uri.set_fragment(fragment)?;
        Ok(uri)
    }

    fn set_authority(&mut self, authority: &str) -> Result<()> {
        let host_port = match authority.rsplit_once('@') {
            Some((user_info, host_port)) => {
                match user_info.split_once(':') {
                    Some((user, password)) => self.set_user_info(Some(user), Some(password))?,
                    None => self.set_user_info(Some(user_info), None)?,
                }
                host_port
            }
            None => authority,
        };

        let (host, port) = if host_port.starts_with('[') {
            match host_port.find(']') {
                Some(end) => {
                    let (host, tail) = host_port.split_at(end + 1);
                    match tail.strip_prefix(':') {
                        Some(port) => (host, Some(port)),
                        None if tail.is_empty() => (host, None),
                        None => return Err(Error::invalid("authority", authority)),
                    }
                }
                None => return Err(Error::invalid("authority", authority)),
            }
        } else {
            match host_port.rsplit_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (host_port, None),
            }
        };

        if !host.is_empty() {
            self.set_host(Some(host))?;
        }
        match port {
            Some(port) if !port.is_empty() => self.set_port(Some(Validator::port(port)?)),
            _ => {}
        }
        Ok(())
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn set_scheme(&mut self, scheme: Option<&str>) -> Result<()> {
        match scheme {
            Some(scheme) => {
                Validator::scheme(scheme)?;
                let scheme = scheme.to_ascii_lowercase();
                if default_port(&scheme) == Some(self.port) {
                    self.port = 0;
                }
                self.scheme = Some(scheme);
            }
            None => self.scheme = None,
        }
        Ok(())
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// `user[:password]`
    pub fn user_info(&self) -> Option<String> {
        let user = self.user.as_deref()?;
        Some(match &self.password {
            Some(password) => format!("{}:{}", user, password),
            None => user.to_string(),
        })
    }

    /// Sets both halves of userinfo. A password without a user is dropped.
    pub fn set_user_info(&mut self, user: Option<&str>, password: Option<&str>) -> Result<()> {
        if let Some(user) = user {
            Validator::user(user)?;
        }
        if let Some(password) = password {
            Validator::password(password)?;
        }

        self.user = user.map(str::to_string);
        self.password = user.and(password).map(str::to_string);
        Ok(())
    }

    pub fn set_user(&mut self, user: Option<&str>) -> Result<()> {
        let password = self.password.clone();
        self.set_user_info(user, password.as_deref())
    }

    pub fn set_password(&mut self, password: Option<&str>) -> Result<()> {
        let user = self.user.clone();
        self.set_user_info(user.as_deref(), password)
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn set_host(&mut self, host: Option<&str>) -> Result<()> {
        match host {
            Some(host) => {
                Validator::host(host)?;
                self.host = Some(host.to_ascii_lowercase());
            }
            None => self.host = None,
        }
        Ok(())
    }

    /// Stored port, or the scheme default when none was set.
    pub fn port(&self) -> u16 {
        if self.port != 0 {
            return self.port;
        }
        self.scheme
            .as_deref()
            .and_then(default_port)
            .unwrap_or(0)
    }

    /// Port as set by the caller, `None` when unset or equal to the scheme
    /// default.
    pub fn explicit_port(&self) -> Option<u16> {
        (self.port != 0).then_some(self.port)
    }

    pub fn set_port(&mut self, port: Option<u16>) {
        let port = port.unwrap_or(0);
        self.port = match self.scheme.as_deref().and_then(default_port) {
            Some(default) if default == port => 0,
            _ => port,
        };
    }

    pub fn is_default_port(&self) -> bool {
        self.port == 0 || self.scheme.as_deref().and_then(default_port) == Some(self.port)
    }

    /// `[user[:password]@]host[:port]`, `None` without host and user.
    pub fn authority(&self) -> Option<String> {
        if self.host.is_none() && self.user.is_none() {
            return None;
        }

        let mut authority = String::new();
        if let Some(user_info) = self.user_info() {
            authority.push_str(&user_info);
            authority.push('@');
        }
        if let Some(host) = &self.host {
            authority.push_str(host);
        }
        if !self.is_default_port() {
            authority.push_str(&format!(":{}", self.port));
        }
        Some(authority)
    }

    /// Encoded path.
    pub fn path(&self) -> Option<String> {
        self.segments.as_ref().map(|segments| {
            segments
                .iter()
                .map(|s| percent_encode(s, SEGMENT_ENCODE_SET).to_string())
                .collect::<Vec<_>>()
                .join("/")
        })
    }

    pub fn set_path(&mut self, path: Option<&str>) -> Result<()> {
        match path {
            Some(path) if !path.is_empty() => {
                Validator::path(path)?;
                self.segments = Some(path.split('/').map(decode).collect());
            }
            _ => self.segments = None,
        }
        Ok(())
    }

    /// Rebuilt query string, RFC 3986 encoded.
    pub fn querystring(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    percent_encode(k, QUERY_ENCODE_SET),
                    percent_encode(v, QUERY_ENCODE_SET)
                )
            })
            .collect();
        Some(pairs.join("&"))
    }

    /// Replaces the whole query. Duplicate keys keep their first value.
    pub fn set_querystring(&mut self, query: Option<&str>) -> Result<()> {
        let query = query.unwrap_or("");
        Validator::query(query)?;

        let mut pairs = IndexMap::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode(key);
            if key.is_empty() {
                continue;
            }
            pairs.entry(key).or_insert_with(|| decode(value));
        }
        self.query = pairs;
        Ok(())
    }

    /// Decoded value of `key`. Octets that are not UTF-8 are shown as
    /// U+FFFD here but kept as-is in [`querystring`](Self::querystring).
    pub fn query(&self, key: &str) -> Option<Cow<'_, str>> {
        self.query
            .get(key.as_bytes())
            .map(|v| String::from_utf8_lossy(v))
    }

    /// Decoded key → value pairs.
    pub fn query_pairs(&self) -> impl Iterator<Item = (Cow<'_, str>, Cow<'_, str>)> {
        self.query
            .iter()
            .map(|(k, v)| (String::from_utf8_lossy(k), String::from_utf8_lossy(v)))
    }

    pub fn set_query(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(value) => {
                self.query
                    .insert(key.as_bytes().to_vec(), value.as_bytes().to_vec());
            }
            None => {
                self.query.shift_remove(key.as_bytes());
            }
        }
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn set_fragment(&mut self, fragment: Option<&str>) -> Result<()> {
        match fragment {
            Some(fragment) if !fragment.is_empty() => {
                Validator::fragment(fragment)?;
                self.fragment = Some(fragment.to_string());
            }
            _ => self.fragment = None,
        }
        Ok(())
    }

    /// Origin-form request target: `path[?query]`, `/` for an empty path.
    pub fn request_target(&self) -> String {
        let mut target = match self.path() {
            Some(path) if path.starts_with('/') => path,
            Some(path) => format!("/{}", path),
            None => "/".to_string(),
        };
        if let Some(query) = self.querystring() {
            target.push('?');
            target.push_str(&query);
        }
        target
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{}:", scheme)?;
        }

        let authority = self.authority();
        if let Some(authority) = &authority {
            write!(f, "//{}", authority)?;
        }

        if let Some(path) = self.path() {
            if authority.is_some() && !path.starts_with('/') {
                write!(f, "/{}", path)?;
            } else if authority.is_none() && path.starts_with("//") {
                write!(f, "/{}", path.trim_start_matches('/'))?;
            } else {
                f.write_str(&path)?;
            }
        }

        if let Some(query) = self.querystring() {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

impl FromStr for Uri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Uri::parse(s)
    }
}

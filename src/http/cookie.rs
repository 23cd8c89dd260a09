//! Cookie registry.
//!
//! The registry reconciles what the client sent in its `Cookie` header with
//! what the application changed while handling the request, and emits one
//! `Set-Cookie` header per changed entry. No server-side session storage is
//! involved: every attribute the registry needs to re-emit a cookie travels
//! inside the cookie value itself.
//!
//! # Wire format
//!
//! The cookie name on the wire is the last 16 hex digits of an xxHash64 over
//! `prefix + name`. It is a one-way projection: the logical name is only ever
//! supplied by the caller and never parsed back.
//!
//! The value is `attribute_bits|expires|domain|path|value`, base64url encoded
//! without padding. On the way back in only the two leading integers are
//! checked; anything else is treated as a foreign cookie and ignored.
//!
//! # Lifecycle
//!
//! - `set()` on an unknown name creates a *new* entry.
//! - `read_from_request()` loads *clean* entries, matching the client.
//! - `set()` on a known entry marks it *modified*; a new entry stays new
//!   and a deleted one comes back as modified.
//! - `delete()` drops a new entry outright. Any other entry is marked
//!   *deleted* and keeps its data so the expiry can still be emitted.
//!
//! New, Modified and Deleted entries are emitted by
//! [`CookieRegistry::write_to_response`]. Emitting turns a new entry into a
//! modified one, since the client now knows it, and resets nothing else.

use std::ops::BitOr;
use std::time::{Duration, SystemTime};

use base64::Engine as _;
use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use indexmap::IndexMap;
use xxhash_rust::xxh64::xxh64;

use crate::config::MessageConfig;
use crate::error::{Error, Result};
use crate::http::message::HttpMessage;
use crate::http::validator::Validator;

const LAX_BIT: u8 = 0x01;
const STRICT_BIT: u8 = 0x02;
const SECURE_BIT: u8 = 0x04;
const UNBOUND_BIT: u8 = 0x08;
const HTTP_ONLY_BIT: u8 = 0x10;

// Strict is encoded on top of Lax, Unbound on top of Strict and Secure.
const STRICT_MASK: u8 = LAX_BIT | STRICT_BIT;
const UNBOUND_MASK: u8 = STRICT_MASK | UNBOUND_BIT | SECURE_BIT;

/// One year, pushed into the past for deletions.
const DELETION_MAX_AGE: u64 = 31_536_000;

/// Longest lifetime a cookie may ask for, 400 days as browsers cap it.
const MAX_EXPIRES: u64 = 400 * 24 * 3600;

fn clamp_expires(expires: i64) -> u64 {
    expires.clamp(0, MAX_EXPIRES as i64) as u64
}

/// SameSite policy, ordered by rendering priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SameSite {
    Lax,
    Strict,
    /// `SameSite=None`; always sent with `Secure`.
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Lax => "Lax",
            SameSite::Strict => "Strict",
            SameSite::None => "None",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieFlag {
    Lax,
    Strict,
    /// Unbound SameSite, i.e. `SameSite=None`.
    Unbound,
    Secure,
    /// Hidden from scripts (`HttpOnly`).
    HttpOnly,
}

/// Public cookie attributes. Combine flags with `|`:
///
/// ```
/// use rustynet_message::http::cookie::{CookieFlag, SameSite};
///
/// let attrs = CookieFlag::Lax | CookieFlag::Strict | CookieFlag::HttpOnly;
/// assert_eq!(attrs.same_site(), Some(SameSite::Strict));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CookieAttributes {
    same_site: Option<SameSite>,
    secure: bool,
    http_only: bool,
}

impl CookieAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a flag. SameSite flags never downgrade: None beats Strict beats
    /// Lax.
    pub fn with(mut self, flag: CookieFlag) -> Self {
        let same_site = match flag {
            CookieFlag::Lax => Some(SameSite::Lax),
            CookieFlag::Strict => Some(SameSite::Strict),
            CookieFlag::Unbound => Some(SameSite::None),
            CookieFlag::Secure => {
                self.secure = true;
                None
            }
            CookieFlag::HttpOnly => {
                self.http_only = true;
                None
            }
        };
        self.same_site = self.same_site.max(same_site);
        self
    }

    pub fn same_site(&self) -> Option<SameSite> {
        self.same_site
    }

    pub fn is_secure(&self) -> bool {
        self.secure || self.same_site == Some(SameSite::None)
    }

    pub fn is_http_only(&self) -> bool {
        self.http_only
    }

    /// Packed form used inside the transport value.
    pub fn bits(&self) -> u8 {
        let mut bits = match self.same_site {
            Some(SameSite::None) => UNBOUND_MASK,
            Some(SameSite::Strict) => STRICT_MASK,
            Some(SameSite::Lax) => LAX_BIT,
            None => 0,
        };
        if self.secure {
            bits |= SECURE_BIT;
        }
        if self.http_only {
            bits |= HTTP_ONLY_BIT;
        }
        bits
    }

    /// Reverses [`bits`](Self::bits). The SameSite checks must run in this
    /// order since each mask contains the next one.
    pub fn from_bits(bits: u8) -> Self {
        let same_site = if bits & UNBOUND_MASK == UNBOUND_MASK {
            Some(SameSite::None)
        } else if bits & STRICT_MASK == STRICT_MASK {
            Some(SameSite::Strict)
        } else if bits & LAX_BIT != 0 {
            Some(SameSite::Lax)
        } else {
            None
        };

        Self {
            same_site,
            secure: bits & SECURE_BIT != 0,
            http_only: bits & HTTP_ONLY_BIT != 0,
        }
    }
}

impl From<CookieFlag> for CookieAttributes {
    fn from(flag: CookieFlag) -> Self {
        CookieAttributes::new().with(flag)
    }
}

impl BitOr for CookieFlag {
    type Output = CookieAttributes;

    fn bitor(self, rhs: CookieFlag) -> CookieAttributes {
        CookieAttributes::from(self).with(rhs)
    }
}

impl BitOr<CookieFlag> for CookieAttributes {
    type Output = CookieAttributes;

    fn bitor(self, rhs: CookieFlag) -> CookieAttributes {
        self.with(rhs)
    }
}

/// Sync state of an entry relative to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryState {
    /// As sent by the client.
    Clean,
    /// Created during this request, the client has never seen it.
    New,
    Modified,
    /// Known to the client, must be expired there.
    Deleted,
}

impl EntryState {
    fn is_modified(self) -> bool {
        self != EntryState::Clean
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CookieEntry {
    value: String,
    // seconds from now, 0 for a session cookie
    expires: u64,
    domain: Option<String>,
    path: Option<String>,
    attributes: CookieAttributes,
    state: EntryState,
}

impl CookieEntry {
    fn encode(&self) -> String {
        let payload = format!(
            "{}|{}|{}|{}|{}",
            self.attributes.bits(),
            self.expires,
            self.domain.as_deref().unwrap_or(""),
            self.path.as_deref().unwrap_or(""),
            self.value
        );
        BASE64_URL_SAFE_NO_PAD.encode(payload)
    }

    fn decode(raw: &str) -> Option<CookieEntry> {
        let bytes = BASE64_URL_SAFE_NO_PAD.decode(raw.trim()).ok()?;
        let payload = String::from_utf8(bytes).ok()?;

        let mut parts = payload.splitn(5, '|');
        let bits = parts.next()?.parse::<u8>().ok()?;
        let expires = parts.next()?.parse::<i64>().ok()?;
        let domain = parts.next().filter(|d| !d.is_empty()).map(str::to_string);
        let path = parts.next().filter(|p| !p.is_empty()).map(str::to_string);
        let value = parts.next().unwrap_or("").to_string();

        Some(CookieEntry {
            value,
            expires: clamp_expires(expires),
            domain,
            path,
            attributes: CookieAttributes::from_bits(bits),
            state: EntryState::Clean,
        })
    }

    fn render(&self, name: &str, now: SystemTime) -> String {
        if self.state == EntryState::Deleted {
            let past = now
                .checked_sub(Duration::from_secs(DELETION_MAX_AGE))
                .unwrap_or(SystemTime::UNIX_EPOCH);
            return format!(
                "{}=deleted; Expires={}; Max-Age=-{}",
                name,
                httpdate::fmt_http_date(past),
                DELETION_MAX_AGE
            );
        }

        let mut line = format!("{}={}", name, self.encode());
        if let Some(domain) = &self.domain {
            line.push_str(&format!("; Domain={}", domain));
        }
        if let Some(path) = &self.path {
            line.push_str(&format!("; Path={}", path));
        }
        if self.expires != 0 {
            if let Some(at) = now.checked_add(Duration::from_secs(self.expires)) {
                line.push_str(&format!("; Expires={}", httpdate::fmt_http_date(at)));
            }
            line.push_str(&format!("; Max-Age={}", self.expires));
        }
        if let Some(same_site) = self.attributes.same_site() {
            line.push_str(&format!("; SameSite={}", same_site.as_str()));
        }
        if self.attributes.is_secure() {
            line.push_str("; Secure");
        }
        if self.attributes.is_http_only() {
            line.push_str("; HttpOnly");
        }
        line
    }
}

/// Accumulates cookie changes for one request/response flow.
#[derive(Debug, Clone)]
pub struct CookieRegistry {
    prefix: String,
    host: Option<String>,
    path: Option<String>,
    entries: IndexMap<String, CookieEntry>,
}

impl CookieRegistry {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            host: None,
            path: None,
            entries: IndexMap::new(),
        }
    }

    pub fn from_config(config: &MessageConfig) -> Result<Self> {
        let mut registry = Self::new(&config.cookie_prefix);
        registry.set_global_host(config.cookie_domain.as_deref())?;
        registry.set_global_path(config.cookie_path.as_deref())?;
        Ok(registry)
    }

    /// `Domain` attached to cookies set from now on.
    pub fn set_global_host(&mut self, host: Option<&str>) -> Result<()> {
        if let Some(host) = host {
            Validator::host(host)?;
        }
        self.host = host.map(str::to_ascii_lowercase);
        Ok(())
    }

    /// `Path` used by [`set`](Self::set) calls that do not pass one.
    pub fn set_global_path(&mut self, path: Option<&str>) -> Result<()> {
        if let Some(path) = path {
            check_cookie_path(path)?;
        }
        self.path = path.map(str::to_string);
        Ok(())
    }

    /// Wire name of a logical cookie name.
    pub fn encode_name(&self, name: &str) -> String {
        let hash = xxh64(format!("{}{}", self.prefix, name).as_bytes(), 0);
        format!("{:016x}", hash)
    }

    /// Creates or updates a cookie. Negative `expires` is treated as a
    /// session cookie; lifetimes beyond 400 days are capped.
    pub fn set(
        &mut self,
        name: &str,
        value: &str,
        expires: i64,
        path: Option<&str>,
        attributes: impl Into<CookieAttributes>,
    ) -> Result<()> {
        if let Some(path) = path {
            check_cookie_path(path)?;
        }

        let key = self.encode_name(name);
        let expires = clamp_expires(expires);
        let path = path.map(str::to_string).or_else(|| self.path.clone());
        let domain = self.host.clone();
        let attributes = attributes.into();

        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.value = value.to_string();
                entry.expires = expires;
                entry.path = path;
                entry.domain = domain;
                entry.attributes = attributes;
                if entry.state != EntryState::New {
                    entry.state = EntryState::Modified;
                }
            }
            None => {
                tracing::trace!(name, key = %key, "new cookie");
                self.entries.insert(
                    key,
                    CookieEntry {
                        value: value.to_string(),
                        expires,
                        domain,
                        path,
                        attributes,
                        state: EntryState::New,
                    },
                );
            }
        }
        Ok(())
    }

    fn live(&self, name: &str) -> Option<&CookieEntry> {
        self.entries
            .get(&self.encode_name(name))
            .filter(|e| e.state != EntryState::Deleted)
    }

    pub fn get(&self, name: &str) -> Result<&str> {
        self.live(name)
            .map(|e| e.value.as_str())
            .ok_or_else(|| Error::NotFound(format!("cookie {}", name)))
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.live(name).is_some()
    }

    /// Forgets a cookie created during this flow, otherwise marks it for
    /// expiry on the client.
    pub fn delete(&mut self, name: &str) {
        let key = self.encode_name(name);
        match self.entries.get(&key).map(|e| e.state) {
            Some(EntryState::New) => {
                self.entries.shift_remove(&key);
            }
            Some(_) => {
                if let Some(entry) = self.entries.get_mut(&key) {
                    entry.state = EntryState::Deleted;
                }
            }
            None => {}
        }
    }

    /// Number of entries, deleted ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads the `Cookie` header of `message`. Pairs that do not decode are
    /// skipped. Returns how many entries were loaded.
    pub fn read_from_request<M: HttpMessage>(&mut self, message: &M) -> usize {
        let mut loaded = 0;
        for header in message.headers().get_all("Cookie") {
            for pair in header.split(';') {
                let Some((name, raw)) = pair.trim().split_once('=') else {
                    tracing::debug!(pair, "skipping cookie pair without '='");
                    continue;
                };
                match CookieEntry::decode(raw) {
                    Some(entry) => {
                        self.entries.insert(name.trim().to_string(), entry);
                        loaded += 1;
                    }
                    None => tracing::debug!(name, "skipping undecodable cookie"),
                }
            }
        }
        loaded
    }

    /// Appends a `Set-Cookie` header for every changed entry. Returns how
    /// many were written.
    ///
    /// Written new entries become modified: a later
    /// [`delete`](Self::delete) must expire them on the client.
    pub fn write_to_response<M: HttpMessage>(&mut self, message: &mut M) -> usize {
        self.write_to_response_at(message, SystemTime::now())
    }

    pub(crate) fn write_to_response_at<M: HttpMessage>(&mut self, message: &mut M, now: SystemTime) -> usize {
        let mut written = 0;
        for (name, entry) in self.entries.iter_mut().filter(|(_, e)| e.state.is_modified()) {
            message
                .headers_mut()
                .append("Set-Cookie", &entry.render(name, now));
            if entry.state == EntryState::New {
                entry.state = EntryState::Modified;
            }
            written += 1;
        }
        tracing::debug!(written, "emitted Set-Cookie headers");
        written
    }
}

/// Path grammar without `;`, which would start a new cookie attribute.
fn check_cookie_path(path: &str) -> Result<()> {
    Validator::path(path)?;
    if path.contains(';') {
        return Err(Error::invalid("path", path));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::http::request::HttpRequest;
    use crate::http::response::HttpResponse;
    use crate::http::uri::Uri;

    fn registry() -> CookieRegistry {
        CookieRegistry::new("test")
    }

    fn request_with_cookie(cookie: &str) -> HttpRequest {
        let mut req = HttpRequest::new(HttpMethod::Get, Uri::new());
        req.headers.set("Cookie", cookie);
        req
    }

    fn set_cookies(res: &HttpResponse) -> Vec<String> {
        res.headers.get_all("Set-Cookie").to_vec()
    }

    #[test]
    fn test_encode_name() {
        let reg = registry();
        let name = reg.encode_name("session");
        assert_eq!(name.len(), 16);
        assert!(name.bytes().all(|b| b.is_ascii_hexdigit()));
        assert_eq!(name, reg.encode_name("session"));
        assert_ne!(name, reg.encode_name("Session"));
        assert_ne!(name, CookieRegistry::new("other").encode_name("session"));
    }

    #[test]
    fn test_attribute_precedence() {
        let strict = CookieFlag::Lax | CookieFlag::Strict;
        assert_eq!(strict.same_site(), Some(SameSite::Strict));
        assert_eq!((CookieFlag::Strict | CookieFlag::Lax).same_site(), Some(SameSite::Strict));

        let unbound = CookieAttributes::from(CookieFlag::Unbound);
        assert_eq!(unbound.same_site(), Some(SameSite::None));
        assert!(unbound.is_secure());
        assert_eq!(
            (unbound | CookieFlag::Lax).same_site(),
            Some(SameSite::None)
        );
        assert!(!CookieAttributes::new().is_secure());
    }

    #[test]
    fn test_bits() {
        assert_eq!(CookieAttributes::from(CookieFlag::Strict).bits(), LAX_BIT | STRICT_BIT);
        assert_eq!(CookieAttributes::from(CookieFlag::Unbound).bits(), UNBOUND_MASK);

        assert_eq!(CookieAttributes::from_bits(LAX_BIT | STRICT_BIT).same_site(), Some(SameSite::Strict));
        assert_eq!(CookieAttributes::from_bits(STRICT_BIT).same_site(), None);
        assert_eq!(CookieAttributes::from_bits(UNBOUND_BIT | LAX_BIT).same_site(), Some(SameSite::Lax));

        let attrs = CookieFlag::Unbound | CookieFlag::HttpOnly;
        assert_eq!(CookieAttributes::from_bits(attrs.bits()), attrs | CookieFlag::Secure);
    }

    #[test]
    fn test_set_get_delete_new_entry() {
        let mut reg = registry();
        reg.set("a", "v", 0, None, CookieAttributes::new()).unwrap();
        assert!(reg.is_set("a"));
        assert_eq!(reg.get("a").unwrap(), "v");

        reg.delete("a");
        assert!(!reg.is_set("a"));
        assert!(reg.get("a").unwrap_err().is_not_found());
        assert!(reg.is_empty());

        let mut res = HttpResponse::new();
        assert_eq!(reg.write_to_response(&mut res), 0);
        assert!(!res.headers.has("Set-Cookie"));
    }

    #[test]
    fn test_delete_after_write_emits_expiry() {
        let mut reg = registry();
        reg.set("a", "v", 0, None, CookieAttributes::new()).unwrap();

        let mut first = HttpResponse::new();
        assert_eq!(reg.write_to_response(&mut first), 1);
        assert!(!set_cookies(&first)[0].contains("=deleted"));

        reg.delete("a");
        assert!(!reg.is_set("a"));
        assert_eq!(reg.len(), 1);

        let mut second = HttpResponse::new();
        reg.write_to_response(&mut second);
        let line = &set_cookies(&second)[0];
        assert!(line.starts_with(&format!("{}=deleted; Expires=", reg.encode_name("a"))));
        assert!(line.ends_with("; Max-Age=-31536000"));
        assert!(!line.contains("Path="));
    }

    #[test]
    fn test_set_revives_deleted_entry() {
        let mut reg = registry();
        let wire = reg.encode_name("a");
        let payload = BASE64_URL_SAFE_NO_PAD.encode("0|0|||old");
        let req = request_with_cookie(&format!("{}={}", wire, payload));
        assert_eq!(reg.read_from_request(&req), 1);

        reg.delete("a");
        assert!(!reg.is_set("a"));
        reg.set("a", "new", 0, None, CookieAttributes::new()).unwrap();
        assert_eq!(reg.get("a").unwrap(), "new");

        let mut res = HttpResponse::new();
        reg.write_to_response(&mut res);
        assert!(!set_cookies(&res)[0].contains("deleted"));
    }

    #[test]
    fn test_write_is_repeatable() {
        let mut reg = registry();
        reg.set("a", "1", 0, None, CookieFlag::Secure).unwrap();
        reg.set("b", "2", 0, None, CookieFlag::HttpOnly).unwrap();

        let mut first = HttpResponse::new();
        let mut second = HttpResponse::new();
        assert_eq!(reg.write_to_response(&mut first), 2);
        assert_eq!(reg.write_to_response(&mut second), 2);
        assert_eq!(set_cookies(&first), set_cookies(&second));
    }

    #[test]
    fn test_render_attributes() {
        let mut reg = registry();
        reg.set_global_host(Some("Example.com")).unwrap();
        reg.set("session", "abc", 3600, Some("/"), CookieFlag::Lax | CookieFlag::Secure)
            .unwrap();

        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000_000);
        let mut res = HttpResponse::new();
        reg.write_to_response_at(&mut res, now);

        let line = &set_cookies(&res)[0];
        let entry = &reg.entries[&reg.encode_name("session")];
        assert_eq!(
            line,
            &format!(
                "{}={}; Domain=example.com; Path=/; Expires=Sun, 09 Sep 2001 02:46:40 GMT; Max-Age=3600; SameSite=Lax; Secure",
                reg.encode_name("session"),
                entry.encode()
            )
        );
    }

    #[test]
    fn test_huge_expiry_is_capped() {
        let mut reg = registry();
        reg.set("a", "v", i64::MAX, None, CookieAttributes::new()).unwrap();
        let mut res = HttpResponse::new();
        assert_eq!(reg.write_to_response(&mut res), 1);
        let line = &set_cookies(&res)[0];
        assert!(line.contains("; Expires="));
        assert!(line.contains(&format!("; Max-Age={}", MAX_EXPIRES)));

        let payload = BASE64_URL_SAFE_NO_PAD.encode(format!("0|{}|||v", i64::MAX));
        let entry = CookieEntry::decode(&payload).unwrap();
        assert_eq!(entry.expires, MAX_EXPIRES);
    }

    #[test]
    fn test_unbound_forces_secure() {
        let mut reg = registry();
        reg.set("x", "y", 0, None, CookieFlag::Unbound | CookieFlag::HttpOnly)
            .unwrap();
        let mut res = HttpResponse::new();
        reg.write_to_response(&mut res);
        let line = &set_cookies(&res)[0];
        assert!(line.ends_with("; SameSite=None; Secure; HttpOnly"));
        assert!(!line.contains("Expires"));
    }

    #[test]
    fn test_negative_expiry_is_session() {
        let mut reg = registry();
        reg.set("x", "y", -50, None, CookieAttributes::new()).unwrap();
        let mut res = HttpResponse::new();
        reg.write_to_response(&mut res);
        assert!(!set_cookies(&res)[0].contains("Max-Age"));
    }

    #[test]
    fn test_global_path_default_and_validation() {
        let mut reg = registry();
        reg.set_global_path(Some("/app")).unwrap();
        assert!(reg.set_global_path(Some("/a b")).unwrap_err().is_invalid_input());
        assert!(reg.set_global_host(Some("bad host")).is_err());
        assert!(reg.set("x", "y", 0, Some("/a;Secure"), CookieAttributes::new()).is_err());

        reg.set("x", "y", 0, None, CookieAttributes::new()).unwrap();
        reg.set("z", "w", 0, Some("/other"), CookieAttributes::new()).unwrap();
        let mut res = HttpResponse::new();
        reg.write_to_response(&mut res);
        let lines = set_cookies(&res);
        assert!(lines[0].contains("; Path=/app"));
        assert!(lines[1].contains("; Path=/other"));
    }

    #[test]
    fn test_read_skips_malformed_pairs() {
        let mut reg = registry();
        let good = CookieEntry {
            value: "hello|world".to_string(),
            expires: 60,
            domain: Some("example.com".to_string()),
            path: Some("/".to_string()),
            attributes: CookieFlag::Strict | CookieFlag::HttpOnly,
            state: EntryState::New,
        };
        let wire = reg.encode_name("greeting");
        let not_ints = BASE64_URL_SAFE_NO_PAD.encode("x|0|||v");
        let req = request_with_cookie(&format!(
            "junk; other=!!!; {}={}; foreign={}",
            wire,
            good.encode(),
            not_ints
        ));

        assert_eq!(reg.read_from_request(&req), 1);
        assert_eq!(reg.get("greeting").unwrap(), "hello|world");

        let entry = &reg.entries[&wire];
        assert_eq!(entry.state, EntryState::Clean);
        assert_eq!(entry.expires, 60);
        assert_eq!(entry.attributes.same_site(), Some(SameSite::Strict));
        assert!(entry.attributes.is_http_only());

        // clean entries are not re-emitted
        let mut res = HttpResponse::new();
        assert_eq!(reg.write_to_response(&mut res), 0);
    }

    #[test]
    fn test_from_config() {
        let config = MessageConfig {
            cookie_domain: Some("example.com".to_string()),
            cookie_path: Some("/".to_string()),
            ..MessageConfig::default()
        };
        let reg = CookieRegistry::from_config(&config).unwrap();
        assert_eq!(reg.encode_name("a"), CookieRegistry::new("rustynet").encode_name("a"));

        let bad = MessageConfig {
            cookie_domain: Some("exa mple".to_string()),
            ..MessageConfig::default()
        };
        assert!(CookieRegistry::from_config(&bad).is_err());
    }
}

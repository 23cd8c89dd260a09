//! RFC 3986 component grammar.
//!
//! Every [`Uri`](crate::http::uri::Uri) setter and the cookie registry globals
//! go through these checks, so a component accepted by a setter is always
//! one the parser would have accepted at the same position.

use std::net::Ipv6Addr;

use crate::error::{Error, Result};

pub struct Validator;

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

fn is_sub_delim(b: u8) -> bool {
    matches!(
        b,
        b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
    )
}

fn is_pchar(b: u8) -> bool {
    is_unreserved(b) || is_sub_delim(b) || matches!(b, b':' | b'@')
}

/// Checks `s` byte by byte, letting `%XX` escapes through wherever `allowed`
/// rejects the raw byte.
fn check_encoded(s: &str, allowed: impl Fn(u8) -> bool) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' {
            let hex = bytes.get(i + 1..i + 3);
            match hex {
                Some(h) if h.iter().all(u8::is_ascii_hexdigit) => i += 3,
                _ => return false,
            }
            continue;
        }
        // non-ASCII is tolerated and percent-encoded on output
        if !(allowed(b) || b >= 0x80) {
            return false;
        }
        i += 1;
    }
    true
}

impl Validator {
    /// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
    pub fn scheme(s: &str) -> Result<()> {
        let mut bytes = s.bytes();
        let valid = match bytes.next() {
            Some(first) => {
                first.is_ascii_alphabetic()
                    && bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
            }
            None => false,
        };
        if valid {
            Ok(())
        } else {
            Err(Error::invalid("scheme", s))
        }
    }

    /// The user part of userinfo; a `:` would be read back as the password
    /// separator so it is rejected here.
    pub fn user(s: &str) -> Result<()> {
        if check_encoded(s, |b| is_unreserved(b) || is_sub_delim(b)) {
            Ok(())
        } else {
            Err(Error::invalid("user", s))
        }
    }

    pub fn password(s: &str) -> Result<()> {
        if check_encoded(s, |b| is_unreserved(b) || is_sub_delim(b) || b == b':') {
            Ok(())
        } else {
            Err(Error::invalid("password", s))
        }
    }

    /// IP-literal, IPv4address or reg-name.
    pub fn host(s: &str) -> Result<()> {
        let valid = if let Some(inner) = s.strip_prefix('[') {
            match inner.strip_suffix(']') {
                Some(literal) => Self::ip_literal(literal),
                None => false,
            }
        } else {
            !s.is_empty() && check_encoded(s, |b| is_unreserved(b) || is_sub_delim(b))
        };

        if valid {
            Ok(())
        } else {
            Err(Error::invalid("host", s))
        }
    }

    fn ip_literal(literal: &str) -> bool {
        if let Some(future) = literal.strip_prefix(['v', 'V']) {
            // IPvFuture: "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
            return match future.split_once('.') {
                Some((ver, rest)) => {
                    !ver.is_empty()
                        && ver.bytes().all(|b| b.is_ascii_hexdigit())
                        && !rest.is_empty()
                        && rest
                            .bytes()
                            .all(|b| is_unreserved(b) || is_sub_delim(b) || b == b':')
                }
                None => false,
            };
        }
        literal.parse::<Ipv6Addr>().is_ok()
    }

    /// Decimal port in 0..=65535.
    pub fn port(s: &str) -> Result<u16> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid("port", s));
        }
        s.parse::<u16>().map_err(|_| Error::invalid("port", s))
    }

    /// `*( pchar / "/" )`
    pub fn path(s: &str) -> Result<()> {
        if check_encoded(s, |b| is_pchar(b) || b == b'/') {
            Ok(())
        } else {
            Err(Error::invalid("path", s))
        }
    }

    /// `*( pchar / "/" / "?" )`
    pub fn query(s: &str) -> Result<()> {
        if check_encoded(s, |b| is_pchar(b) || b == b'/' || b == b'?') {
            Ok(())
        } else {
            Err(Error::invalid("query", s))
        }
    }

    pub fn fragment(s: &str) -> Result<()> {
        if check_encoded(s, |b| is_pchar(b) || b == b'/' || b == b'?') {
            Ok(())
        } else {
            Err(Error::invalid("fragment", s))
        }
    }
}

//! HTTP headers abstraction for [`HttpRequest`](crate::http::request::HttpRequest) and
//! [`HttpResponse`](crate::http::response::HttpResponse)
//!
//! Headers are stored in an ordered map to preserve insertion order. Each
//! name maps to an ordered list of values, so repeated headers such as
//! `Set-Cookie` keep every occurrence.
//!
//! Names are normalized on the way in: surrounding whitespace is trimmed,
//! inner spaces become hyphens and each hyphen-delimited token is
//! title-cased. `content type`, `CONTENT-TYPE` and `Content-Type` therefore
//! address the same entry.
//!
//! Values are filtered on every write. Control characters are dropped and a
//! CR is only kept when it starts a `CRLF + SP/HTAB` continuation, which
//! makes response splitting through a header value impossible regardless
//! of what the caller passes in.

use indexmap::IndexMap;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpHeaders {
    headers: IndexMap<String, Vec<String>>,
}

impl HttpHeaders {
    pub fn new() -> Self {
        Self {
            headers: IndexMap::new(),
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.headers.contains_key(&normalize_name(name))
    }

    /// Case-insensitive substring search across every value of `name`.
    pub fn contains(&self, name: &str, needle: &str) -> bool {
        let needle = needle.to_ascii_lowercase();
        self.get_all(name)
            .iter()
            .any(|v| v.to_ascii_lowercase().contains(&needle))
    }

    /// First value stored for `name`.
    pub fn get(&self, name: &str) -> Result<&str> {
        self.get_all(name)
            .first()
            .map(String::as_str)
            .ok_or_else(|| Error::NotFound(normalize_name(name)))
    }

    /// Every value stored for `name`, in insertion order.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.headers
            .get(&normalize_name(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Adds a value under `name`. With `replace` the previous values are
    /// discarded, otherwise the value is appended.
    pub fn add(&mut self, name: &str, value: &str, replace: bool) {
        let name = normalize_name(name);
        if name.is_empty() {
            tracing::debug!("dropping header with empty name");
            return;
        }

        let value = filter_value(value);
        let values = self.headers.entry(name).or_default();
        if replace {
            values.clear();
        }
        values.push(value);
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.add(name, value, true);
    }

    pub fn append(&mut self, name: &str, value: &str) {
        self.add(name, value, false);
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.headers.shift_remove(&normalize_name(name))
    }

    /// Full name → values mapping in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.headers
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Ingests a raw header block, one `Name: value` per line.
    ///
    /// Lines may end in CRLF or LF. A line starting with SP or HTAB continues
    /// the previous value and is joined with a single space. Lines without a
    /// colon are skipped.
    pub fn parse_block(&mut self, block: &str) {
        let mut pending: Option<(String, String)> = None;

        for line in block.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                continue;
            }

            if line.starts_with([' ', '\t']) {
                if let Some((_, value)) = pending.as_mut() {
                    value.push(' ');
                    value.push_str(line.trim());
                }
                continue;
            }

            if let Some((name, value)) = pending.take() {
                self.append(&name, &value);
            }

            match line.split_once(':') {
                Some((name, value)) => {
                    pending = Some((name.to_string(), value.trim().to_string()));
                }
                None => tracing::debug!(line, "skipping header line without colon"),
            }
        }

        if let Some((name, value)) = pending {
            self.append(&name, &value);
        }
    }

    /// HTTP/1.x rendering: one `Name: value\r\n` line per value.
    pub fn stringify(&self) -> String {
        let mut result = String::new();
        for (name, values) in &self.headers {
            for value in values {
                result.push_str(&format!("{}: {}\r\n", name, value));
            }
        }
        result
    }
}

/// Canonical display form of a header name, also used as the storage key.
///
/// A run of separators that contains a space becomes one hyphen, so
/// `content - type` and `content type` land on the same key.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut word_start = true;
    // pending separator run: (hyphens, saw a space)
    let mut run = (0usize, false);

    for c in name.trim().chars() {
        match c {
            ' ' => run.1 = true,
            '-' => run.0 += 1,
            _ => {
                if run != (0, false) {
                    push_separator(&mut out, run);
                    word_start = true;
                    run = (0, false);
                }

                if word_start {
                    out.push(c.to_ascii_uppercase());
                    word_start = false;
                } else {
                    out.push(c.to_ascii_lowercase());
                }
            }
        }
    }
    push_separator(&mut out, run);
    out
}

fn push_separator(out: &mut String, (hyphens, spaced): (usize, bool)) {
    if spaced {
        out.push('-');
    } else {
        out.extend(std::iter::repeat_n('-', hyphens));
    }
}

/// Strips everything from a header value that could terminate the header
/// line early.
pub fn filter_value(value: &str) -> String {
    let mut collapsed = String::with_capacity(value.len());
    let mut in_blank = false;
    for c in value.chars() {
        if c == ' ' || c == '\t' {
            if !in_blank {
                collapsed.push(' ');
            }
            in_blank = true;
        } else {
            collapsed.push(c);
            in_blank = false;
        }
    }

    let trimmed = collapsed.trim();
    let bytes = trimmed.as_bytes();
    let mut out = String::with_capacity(trimmed.len());
    let mut chars = trimmed.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '\r' => {
                // fold: CR LF followed by SP or HTAB
                if bytes.get(i + 1) == Some(&b'\n')
                    && matches!(bytes.get(i + 2), Some(b' ') | Some(b'\t'))
                {
                    out.push_str("\r\n");
                    chars.next();
                }
            }
            '\t' => out.push(c),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {}
            c => out.push(c),
        }
    }
    out
}

//! Cookie persistence for preference toggles
//!
//! Features:
//! - `CookieJar` trait: set with a TTL in days, presence lookup, removal
//! - Cookie wire format (`name=value; expires=...; path=/; samesite=strict`)
//! - `encodeURIComponent`-compatible percent encoding of names and values
//! - In-memory jar with a manual clock, JSON file jar on native, `document.cookie` on web

#[cfg(target_arch = "wasm32")]
mod document;
#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
pub use document::DocumentJar;
#[cfg(not(target_arch = "wasm32"))]
pub use file::{FileJar, JarError};

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::consts::{COOKIE_PATH, COOKIE_SAME_SITE, ERASE_TTL_DAYS, MS_PER_DAY};

/// Key-value store with per-entry expiry.
///
/// Writes are assumed to succeed; implementations log failures instead of
/// returning them.
pub trait CookieJar {
    /// Store `value` under `name` for `days` days. Zero days creates a session
    /// entry, a negative count expires it immediately.
    fn set(&mut self, name: &str, value: &str, days: i64);

    /// Raw (still encoded) value stored under `name`, if any.
    fn get(&self, name: &str) -> Option<String>;

    /// Remove the entry by overwriting it with one that already expired.
    fn remove(&mut self, name: &str) {
        self.set(name, "", ERASE_TTL_DAYS);
    }
}

/// Percent-encode text the way `encodeURIComponent` does.
pub fn percent_encode(input: &str) -> String {
    let mut result = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            'A'..='Z'
            | 'a'..='z'
            | '0'..='9'
            | '-'
            | '_'
            | '.'
            | '!'
            | '~'
            | '*'
            | '\''
            | '('
            | ')' => result.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}

/// Format a unix timestamp (ms) as an HTTP date, e.g. `Thu, 01 Jan 1970 00:00:00 GMT`.
pub fn http_date(timestamp_ms: f64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms as i64)
        .unwrap_or_default()
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

/// Build the string assigned to `document.cookie` for one entry.
///
/// `expires` is an HTTP date; `None` makes a session cookie.
pub fn format_set_cookie(name: &str, value: &str, expires: Option<&str>) -> String {
    let name = percent_encode(name);
    let value = percent_encode(value);
    let expires = expires
        .map(|date| format!("; expires={}", date))
        .unwrap_or_default();
    format!(
        "{}={}{}; path={}; samesite={}",
        name, value, expires, COOKIE_PATH, COOKIE_SAME_SITE
    )
}

/// Expiry timestamp for an entry written at `now_ms` with a TTL of `days`.
pub fn expiry_after(now_ms: f64, days: i64) -> Option<f64> {
    (days != 0).then(|| now_ms + days as f64 * MS_PER_DAY)
}

/// Find `name` in a `document.cookie` style header and return its raw value.
///
/// The first entry whose text starts with `name=` wins. The value is returned
/// as stored, without decoding.
pub fn read_cookie(header: &str, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    header
        .split(';')
        .map(|entry| entry.trim_start_matches(' '))
        .find_map(|entry| entry.strip_prefix(prefix.as_str()))
        .map(str::to_string)
}

/// A stored cookie: encoded value plus optional expiry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub value: String,
    /// Unix timestamp (ms); `None` for a session entry
    pub expires_ms: Option<f64>,
}

impl StoredCookie {
    fn is_live(&self, now_ms: f64) -> bool {
        self.expires_ms.is_none_or(|expires| expires > now_ms)
    }
}

/// Cookie entries keyed by encoded name, evaluated against a caller-supplied clock
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookieStore {
    cookies: BTreeMap<String, StoredCookie>,
}

impl CookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write an entry as of `now_ms`. An entry that is already expired is dropped.
    pub fn set_at(&mut self, now_ms: f64, name: &str, value: &str, days: i64) {
        let name = percent_encode(name);
        let expires_ms = expiry_after(now_ms, days);
        let cookie = StoredCookie {
            value: percent_encode(value),
            expires_ms,
        };

        if cookie.is_live(now_ms) {
            self.cookies.insert(name, cookie);
        } else {
            self.cookies.remove(&name);
        }
    }

    /// `document.cookie` style header of the entries live at `now_ms`
    pub fn header_at(&self, now_ms: f64) -> String {
        self.cookies
            .iter()
            .filter(|(_, cookie)| cookie.is_live(now_ms))
            .map(|(name, cookie)| format!("{}={}", name, cookie.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Drop every entry that expired at or before `now_ms`
    pub fn purge_expired(&mut self, now_ms: f64) {
        self.cookies.retain(|_, cookie| cookie.is_live(now_ms));
    }

    /// Stored entry for an (unencoded) name, ignoring expiry
    pub fn entry(&self, name: &str) -> Option<&StoredCookie> {
        self.cookies.get(&percent_encode(name))
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

/// In-memory cookie jar with a manually advanced clock.
///
/// Keeps every `document.cookie` assignment it would have made, so a page
/// load can be replayed against the same store.
#[derive(Debug, Clone)]
pub struct MemoryJar {
    store: CookieStore,
    now_ms: f64,
    writes: Vec<String>,
}

impl MemoryJar {
    /// Jar whose clock starts at the given unix timestamp (ms)
    pub fn at(now_ms: f64) -> Self {
        Self {
            store: CookieStore::new(),
            now_ms,
            writes: Vec::new(),
        }
    }

    /// Move the clock forward
    pub fn advance_days(&mut self, days: f64) {
        self.now_ms += days * MS_PER_DAY;
    }

    /// Every cookie string written so far, oldest first
    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    pub fn store(&self) -> &CookieStore {
        &self.store
    }
}

impl CookieJar for MemoryJar {
    fn set(&mut self, name: &str, value: &str, days: i64) {
        let expires = expiry_after(self.now_ms, days).map(http_date);
        self.writes.push(format_set_cookie(name, value, expires.as_deref()));
        self.store.set_at(self.now_ms, name, value, days);
    }

    fn get(&self, name: &str) -> Option<String> {
        read_cookie(&self.store.header_at(self.now_ms), name)
    }
}

//! `document.cookie` backed jar (WASM only)

use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use super::{CookieJar, expiry_after, format_set_cookie, http_date, read_cookie};
use crate::platform::now_ms;

pub struct DocumentJar {
    document: HtmlDocument,
}

impl DocumentJar {
    /// Jar over the current window's document
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let document = document.dyn_into::<HtmlDocument>().ok()?;
        Some(Self { document })
    }
}

impl CookieJar for DocumentJar {
    fn set(&mut self, name: &str, value: &str, days: i64) {
        let expires = expiry_after(now_ms(), days).map(http_date);
        let cookie = format_set_cookie(name, value, expires.as_deref());
        if let Err(e) = self.document.set_cookie(&cookie) {
            log::warn!("Failed to write cookie {}: {:?}", name, e);
        }
    }

    fn get(&self, name: &str) -> Option<String> {
        let header = self.document.cookie().ok()?;
        read_cookie(&header, name)
    }
}

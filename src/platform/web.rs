//! Browser clipboard via the async Clipboard API (WASM only)
//!
//! `navigator.clipboard` is missing outside secure contexts, so presence is
//! checked by reflection instead of trusting the web-sys binding.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::{Clipboard, ClipboardCapabilities};

pub struct BrowserClipboard {
    clipboard: Option<web_sys::Clipboard>,
    can_read: bool,
}

impl BrowserClipboard {
    /// Probe `navigator.clipboard` and `navigator.clipboard.readText`
    pub fn detect() -> Self {
        let clipboard = web_sys::window().and_then(|window| {
            let navigator = window.navigator();
            let value = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard")).ok()?;
            if value.is_undefined() || value.is_null() {
                None
            } else {
                Some(value.unchecked_into::<web_sys::Clipboard>())
            }
        });

        let can_read = clipboard
            .as_ref()
            .and_then(|c| js_sys::Reflect::get(c, &JsValue::from_str("readText")).ok())
            .is_some_and(|f| f.is_function());

        log::info!(
            "Clipboard detected: write={}, read={}",
            clipboard.is_some(),
            can_read
        );

        Self {
            clipboard,
            can_read,
        }
    }

    /// Start a clipboard read. Resolves to the clipboard text, or `None` if
    /// reading is unavailable or was denied.
    pub fn read_text(&self) -> Option<impl Future<Output = Option<String>> + use<>> {
        if !self.can_read {
            return None;
        }
        let promise = self.clipboard.as_ref()?.read_text();
        Some(async move {
            match JsFuture::from(promise).await {
                Ok(value) => value.as_string(),
                Err(e) => {
                    log::warn!("Clipboard read failed: {:?}", e);
                    None
                }
            }
        })
    }
}

impl Clipboard for BrowserClipboard {
    fn capabilities(&self) -> ClipboardCapabilities {
        ClipboardCapabilities {
            write: self.clipboard.is_some(),
            read: self.can_read,
        }
    }

    fn write_text(&self, text: &str) {
        let Some(clipboard) = &self.clipboard else {
            return;
        };
        let promise = clipboard.write_text(text);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("Clipboard write failed: {:?}", e);
            }
        });
    }
}

//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (cookie expiry)
//! - Clipboard access (Clipboard API on web, none on native)

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::BrowserClipboard;

/// Which clipboard operations the platform offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClipboardCapabilities {
    /// `writeText` is available (auto-copy can work)
    pub write: bool,
    /// `readText` is available (auto-paste can work)
    pub read: bool,
}

impl ClipboardCapabilities {
    pub const NONE: Self = Self {
        write: false,
        read: false,
    };

    /// Whether the auto-copy control should be shown
    pub fn shows_auto_copy(&self) -> bool {
        self.write
    }

    /// Whether the auto-paste control should be shown. Reading is only
    /// offered alongside a usable clipboard.
    pub fn shows_auto_paste(&self) -> bool {
        self.write && self.read
    }
}

/// System clipboard as seen by the convert pipeline.
///
/// Reads are asynchronous and driven by the platform glue; the pipeline only
/// ever requests writes.
pub trait Clipboard {
    fn capabilities(&self) -> ClipboardCapabilities;

    /// Request that `text` be placed on the clipboard. Fire-and-forget:
    /// failures go to the platform's own error channel.
    fn write_text(&self, text: &str);
}

/// Clipboard for platforms without one
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn capabilities(&self) -> ClipboardCapabilities {
        ClipboardCapabilities::NONE
    }

    fn write_text(&self, _text: &str) {}
}

/// Current unix time in milliseconds
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Current unix time in milliseconds
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_visibility() {
        assert!(!ClipboardCapabilities::NONE.shows_auto_copy());
        assert!(!ClipboardCapabilities::NONE.shows_auto_paste());

        let write_only = ClipboardCapabilities {
            write: true,
            read: false,
        };
        assert!(write_only.shows_auto_copy());
        assert!(!write_only.shows_auto_paste());

        let both = ClipboardCapabilities {
            write: true,
            read: true,
        };
        assert!(both.shows_auto_paste());
    }

    #[test]
    fn test_now_ms_is_after_2020() {
        assert!(now_ms() > 1_577_836_800_000.0);
    }
}

//! HTML Escaper - escape pasted text for safe inclusion in HTML
//!
//! Core modules:
//! - `escape`: The escaping transform and `<pre>` wrapping
//! - `settings`: Persisted preference toggles (auto-paste, auto-copy, add-pre)
//! - `persistence`: Cookie jars (document cookies on web, JSON file on native)
//! - `platform`: Browser/native platform abstraction (clipboard, time)
//! - `app`: Application state and event handlers
//! - `filter`: Native stdin to stdout filter

pub mod app;
pub mod escape;
#[cfg(not(target_arch = "wasm32"))]
pub mod filter;
pub mod persistence;
pub mod platform;
pub mod settings;

pub use app::{App, StartupPlan};
pub use escape::{escape_html, wrap_in_pre};
pub use persistence::{CookieJar, MemoryJar};
pub use platform::{Clipboard, ClipboardCapabilities, NoClipboard};
pub use settings::{Preference, PreferenceSet};

/// Application configuration constants
pub mod consts {
    /// Days a preference cookie lives before it has to be refreshed
    pub const PREFERENCE_TTL_DAYS: i64 = 14;
    /// TTL used to erase a cookie (expires in the past)
    pub const ERASE_TTL_DAYS: i64 = -1;
    /// Value stored for a set preference. Only its presence is read back.
    pub const PREFERENCE_MARKER: &str = "true";

    /// Cookie scope
    pub const COOKIE_PATH: &str = "/";
    pub const COOKIE_SAME_SITE: &str = "strict";

    pub const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

    /// Wrapper placed around the escaped text when add-pre is on
    pub const PRE_OPEN: &str = "<pre>\n";
    pub const PRE_CLOSE: &str = "\n</pre>";

    /// Element ids on the page
    pub const INPUT_ID: &str = "input";
    pub const OUTPUT_ID: &str = "output";
    pub const AUTO_COPY_AREA_ID: &str = "autoCopyArea";
    pub const AUTO_PASTE_AREA_ID: &str = "autoPasteArea";

    /// Native cookie jar location
    pub const JAR_PATH_ENV: &str = "HTML_ESCAPER_JAR";
    pub const DEFAULT_JAR_PATH: &str = ".html-escaper-cookies.json";
}

//! Application state and event handlers
//!
//! `App` owns everything the page needs between events: the preferences, the
//! cookie jar they persist to, the clipboard and the current output. The
//! platform glue builds one at startup and forwards DOM events to it.

use crate::escape::{escape_html, wrap_in_pre};
use crate::persistence::CookieJar;
use crate::platform::{Clipboard, ClipboardCapabilities};
use crate::settings::{Preference, PreferenceSet};

/// What the glue should do once the page is wired up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupPlan {
    /// Clipboard operations available; decides which controls are revealed
    pub capabilities: ClipboardCapabilities,
    /// Read the clipboard once and feed it to `App::on_clipboard_read`
    pub auto_paste: bool,
}

pub struct App<J: CookieJar, C: Clipboard> {
    prefs: PreferenceSet,
    jar: J,
    clipboard: C,
    output: String,
}

impl<J: CookieJar, C: Clipboard> App<J, C> {
    /// Load preferences from `jar`, refreshing the ones that are set
    pub fn new(mut jar: J, clipboard: C) -> Self {
        let prefs = PreferenceSet::load(&mut jar);
        Self {
            prefs,
            jar,
            clipboard,
            output: String::new(),
        }
    }

    pub fn startup_plan(&self) -> StartupPlan {
        let capabilities = self.clipboard.capabilities();
        let auto_paste = self.prefs.auto_paste && capabilities.read;
        if auto_paste {
            log::info!("Auto-paste enabled, reading clipboard");
        }
        StartupPlan {
            capabilities,
            auto_paste,
        }
    }

    /// Escape `text`, wrap it if add-pre is on, make it the output and copy
    /// it if auto-copy is on.
    pub fn convert(&mut self, text: &str) -> &str {
        let escaped = escape_html(text);
        self.output = if self.prefs.add_pre {
            wrap_in_pre(&escaped)
        } else {
            escaped
        };

        if self.prefs.auto_copy && self.clipboard.capabilities().write {
            self.clipboard.write_text(&self.output);
        }
        &self.output
    }

    /// Text pasted into the input
    pub fn on_paste(&mut self, pasted: &str) -> &str {
        self.convert(pasted)
    }

    /// The input's value changed
    pub fn on_text_change(&mut self, current: &str) -> &str {
        self.convert(current)
    }

    /// The auto-paste clipboard read completed. Overwrites whatever is in the
    /// output, even if the user already typed.
    pub fn on_clipboard_read(&mut self, text: &str) -> &str {
        log::debug!("Auto-pasted {} bytes", text.len());
        self.convert(text)
    }

    /// A preference control was clicked; `checked` is its new state
    pub fn toggle(&mut self, pref: Preference, checked: bool) {
        self.prefs.apply(&mut self.jar, pref, checked);
        log::info!("{} {}", pref.key(), if checked { "on" } else { "off" });
    }

    pub fn preferences(&self) -> &PreferenceSet {
        &self.prefs
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn jar(&self) -> &J {
        &self.jar
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn into_jar(self) -> J {
        self.jar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryJar;
    use crate::platform::NoClipboard;
    use std::cell::RefCell;

    const START_MS: f64 = 1_593_302_400_000.0;

    /// Clipboard that records every write
    #[derive(Default)]
    struct RecordingClipboard {
        capabilities: ClipboardCapabilities,
        writes: RefCell<Vec<String>>,
    }

    impl RecordingClipboard {
        fn with(write: bool, read: bool) -> Self {
            Self {
                capabilities: ClipboardCapabilities { write, read },
                writes: RefCell::new(Vec::new()),
            }
        }
    }

    impl Clipboard for RecordingClipboard {
        fn capabilities(&self) -> ClipboardCapabilities {
            self.capabilities
        }

        fn write_text(&self, text: &str) {
            self.writes.borrow_mut().push(text.to_string());
        }
    }

    fn jar_with(prefs: &[Preference]) -> MemoryJar {
        let mut jar = MemoryJar::at(START_MS);
        let mut set = PreferenceSet::default();
        for &pref in prefs {
            set.apply(&mut jar, pref, true);
        }
        jar
    }

    #[test]
    fn test_convert_plain() {
        let mut app = App::new(MemoryJar::at(START_MS), NoClipboard);
        assert_eq!(app.convert("<x>"), "&lt;x&gt;");
        assert_eq!(app.output(), "&lt;x&gt;");
    }

    #[test]
    fn test_convert_wrapped_in_pre() {
        let mut app = App::new(jar_with(&[Preference::AddPre]), NoClipboard);
        assert_eq!(app.convert("<x>"), "<pre>\n&lt;x&gt;\n</pre>");
    }

    #[test]
    fn test_convert_empty() {
        let mut app = App::new(MemoryJar::at(START_MS), NoClipboard);
        assert_eq!(app.convert(""), "");

        app.toggle(Preference::AddPre, true);
        assert_eq!(app.convert(""), "<pre>\n\n</pre>");
    }

    #[test]
    fn test_convert_overwrites_previous_output() {
        let mut app = App::new(MemoryJar::at(START_MS), NoClipboard);
        app.on_paste("first & second");
        app.on_text_change("third");
        assert_eq!(app.output(), "third");
    }

    #[test]
    fn test_auto_copy_writes_final_output() {
        let jar = jar_with(&[Preference::AutoCopy, Preference::AddPre]);
        let mut app = App::new(jar, RecordingClipboard::with(true, false));
        app.convert("a<b");
        assert_eq!(
            *app.clipboard().writes.borrow(),
            vec!["<pre>\na&lt;b\n</pre>".to_string()]
        );
    }

    #[test]
    fn test_no_copy_when_auto_copy_off() {
        let mut app = App::new(MemoryJar::at(START_MS), RecordingClipboard::with(true, true));
        app.convert("a<b");
        assert!(app.clipboard().writes.borrow().is_empty());
    }

    #[test]
    fn test_no_copy_without_write_capability() {
        let jar = jar_with(&[Preference::AutoCopy]);
        let mut app = App::new(jar, RecordingClipboard::with(false, false));
        app.convert("a<b");
        assert!(app.clipboard().writes.borrow().is_empty());
    }

    #[test]
    fn test_startup_plan_auto_paste() {
        let app = App::new(
            jar_with(&[Preference::AutoPaste]),
            RecordingClipboard::with(true, true),
        );
        assert!(app.startup_plan().auto_paste);

        let app = App::new(
            jar_with(&[Preference::AutoPaste]),
            RecordingClipboard::with(true, false),
        );
        assert!(!app.startup_plan().auto_paste);

        let app = App::new(MemoryJar::at(START_MS), RecordingClipboard::with(true, true));
        assert!(!app.startup_plan().auto_paste);
    }

    #[test]
    fn test_clipboard_read_replaces_typed_output() {
        let mut app = App::new(jar_with(&[Preference::AutoPaste]), NoClipboard);
        app.on_text_change("typed first");
        assert_eq!(app.on_clipboard_read("'late'"), "&#039;late&#039;");
    }

    #[test]
    fn test_toggle_persists_for_next_load() {
        let mut app = App::new(MemoryJar::at(START_MS), NoClipboard);
        app.toggle(Preference::AutoCopy, true);
        assert!(app.preferences().auto_copy);

        let reloaded = App::new(app.into_jar(), NoClipboard);
        assert!(reloaded.preferences().auto_copy);
        assert!(!reloaded.preferences().add_pre);
    }

    #[test]
    fn test_startup_refreshes_set_preferences() {
        let mut jar = jar_with(&[Preference::AddPre, Preference::AutoPaste]);
        jar.clear_writes();

        let app = App::new(jar, NoClipboard);
        let writes = app.jar().writes();
        assert_eq!(writes.len(), 2);
        assert!(writes.iter().any(|w| w.starts_with("addPre=true; expires=")));
        assert!(writes.iter().any(|w| w.starts_with("autoPaste=true; expires=")));
    }
}

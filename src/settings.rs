//! User preferences
//!
//! Three independent toggles, each persisted as a cookie whose presence (not
//! value) means "on". A set preference is re-persisted on every load so its
//! expiry window keeps sliding forward.

use serde::Serialize;

use crate::consts::{PREFERENCE_MARKER, PREFERENCE_TTL_DAYS};
use crate::persistence::CookieJar;

/// A persisted toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    /// Convert the clipboard contents when the page loads
    AutoPaste,
    /// Copy the output to the clipboard after every conversion
    AutoCopy,
    /// Wrap the output in a `<pre>` block
    AddPre,
}

impl Preference {
    pub const ALL: [Preference; 3] = [
        Preference::AutoPaste,
        Preference::AutoCopy,
        Preference::AddPre,
    ];

    /// Cookie name, also the id of the page's checkbox
    pub fn key(&self) -> &'static str {
        match self {
            Preference::AutoPaste => "autoPaste",
            Preference::AutoCopy => "autoCopy",
            Preference::AddPre => "addPre",
        }
    }
}

/// Current state of every preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PreferenceSet {
    pub auto_paste: bool,
    pub auto_copy: bool,
    pub add_pre: bool,
}

impl PreferenceSet {
    pub fn get(&self, pref: Preference) -> bool {
        match pref {
            Preference::AutoPaste => self.auto_paste,
            Preference::AutoCopy => self.auto_copy,
            Preference::AddPre => self.add_pre,
        }
    }

    fn slot(&mut self, pref: Preference) -> &mut bool {
        match pref {
            Preference::AutoPaste => &mut self.auto_paste,
            Preference::AutoCopy => &mut self.auto_copy,
            Preference::AddPre => &mut self.add_pre,
        }
    }

    /// Read every preference from the jar.
    ///
    /// Each preference found set has its cookie refreshed with a full TTL.
    pub fn load(jar: &mut impl CookieJar) -> Self {
        let mut prefs = Self::default();
        for pref in Preference::ALL {
            if jar.get(pref.key()).is_some() {
                prefs.apply(jar, pref, true);
                log::debug!("Refreshed {} cookie", pref.key());
            }
        }
        log::info!(
            "Loaded preferences: {}",
            serde_json::to_string(&prefs).unwrap_or_default()
        );
        prefs
    }

    /// Set a preference to `on` and persist it immediately.
    ///
    /// On writes the marker cookie with a fresh TTL even if it was already on;
    /// off erases the cookie.
    pub fn apply(&mut self, jar: &mut impl CookieJar, pref: Preference, on: bool) {
        *self.slot(pref) = on;
        if on {
            jar.set(pref.key(), PREFERENCE_MARKER, PREFERENCE_TTL_DAYS);
        } else {
            jar.remove(pref.key());
        }
    }
}

//! Native stdin to stdout filter
//!
//! Arguments act like clicks on the page's checkboxes: they are persisted to
//! the jar before the input is converted.

use std::io::{self, Read};

use crate::app::App;
use crate::persistence::CookieJar;
use crate::platform::NoClipboard;
use crate::settings::Preference;

/// Apply `args` to the preferences in `jar`, then convert everything read
/// from `input`. Returns the output and the jar.
pub fn run<J: CookieJar>(
    args: impl IntoIterator<Item = String>,
    mut input: impl Read,
    jar: J,
) -> io::Result<(String, J)> {
    let mut app = App::new(jar, NoClipboard);
    for arg in args {
        match arg.as_str() {
            "--pre" => app.toggle(Preference::AddPre, true),
            "--no-pre" => app.toggle(Preference::AddPre, false),
            other => log::warn!("Ignoring unknown argument: {}", other),
        }
    }
    if app.preferences().auto_copy || app.preferences().auto_paste {
        log::info!("Clipboard preferences are set but no clipboard is available natively");
    }

    let mut text = String::new();
    input.read_to_string(&mut text)?;
    let output = app.convert(&text).to_string();
    Ok((output, app.into_jar()))
}

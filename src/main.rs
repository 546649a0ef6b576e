//! HTML Escaper entry point
//!
//! On the web, wires the page's input, output and preference checkboxes to
//! the application state. Natively, runs as a stdin to stdout filter.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        ClipboardEvent, Document, HtmlElement, HtmlInputElement, HtmlTextAreaElement, InputEvent,
    };

    use html_escaper::consts::*;
    use html_escaper::persistence::DocumentJar;
    use html_escaper::platform::BrowserClipboard;
    use html_escaper::{App, Preference};

    /// Page instance holding the app and the elements it writes to
    struct Page {
        app: App<DocumentJar, BrowserClipboard>,
        input: HtmlTextAreaElement,
        output: HtmlElement,
    }

    impl Page {
        fn show(&self) {
            self.output.set_inner_text(self.app.output());
        }
    }

    fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
        let el = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<T>().ok());
        if el.is_none() {
            log::error!("Missing element #{}", id);
        }
        el
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("HTML Escaper starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };
        let (Some(input), Some(output)) = (
            element::<HtmlTextAreaElement>(&document, INPUT_ID),
            element::<HtmlElement>(&document, OUTPUT_ID),
        ) else {
            return;
        };
        let Some(jar) = DocumentJar::from_window() else {
            log::error!("Document does not support cookies");
            return;
        };

        let app = App::new(jar, BrowserClipboard::detect());
        let plan = app.startup_plan();
        let page = Rc::new(RefCell::new(Page { app, input, output }));

        setup_input_handlers(page.clone());
        setup_preference_controls(&document, page.clone());
        reveal_clipboard_controls(&document, plan.capabilities);

        if plan.auto_paste {
            start_auto_paste(page);
        }

        log::info!("HTML Escaper ready");
    }

    fn setup_input_handlers(page: Rc<RefCell<Page>>) {
        let input = page.borrow().input.clone();

        // Paste
        {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: ClipboardEvent| {
                let pasted = event
                    .clipboard_data()
                    .and_then(|data| data.get_data("text").ok())
                    .unwrap_or_default();
                let mut p = page.borrow_mut();
                p.app.on_paste(&pasted);
                p.show();
            });
            let _ = input.add_event_listener_with_callback("paste", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Text change (pastes are already handled above)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: InputEvent| {
                if event.input_type() == "insertFromPaste" {
                    return;
                }
                let mut p = page.borrow_mut();
                let current = p.input.value();
                p.app.on_text_change(&current);
                p.show();
            });
            let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_preference_controls(document: &Document, page: Rc<RefCell<Page>>) {
        for pref in Preference::ALL {
            let Some(checkbox) = element::<HtmlInputElement>(document, pref.key()) else {
                continue;
            };
            checkbox.set_checked(page.borrow().app.preferences().get(pref));

            let page = page.clone();
            let control = checkbox.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                page.borrow_mut().app.toggle(pref, control.checked());
            });
            let _ = checkbox.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn reveal_clipboard_controls(
        document: &Document,
        capabilities: html_escaper::ClipboardCapabilities,
    ) {
        let areas = [
            (AUTO_COPY_AREA_ID, capabilities.shows_auto_copy()),
            (AUTO_PASTE_AREA_ID, capabilities.shows_auto_paste()),
        ];
        for (id, visible) in areas {
            if !visible {
                continue;
            }
            if let Some(area) = document.get_element_by_id(id) {
                area.set_class_name("");
            }
        }
    }

    fn start_auto_paste(page: Rc<RefCell<Page>>) {
        let Some(read) = page.borrow().app.clipboard().read_text() else {
            return;
        };
        wasm_bindgen_futures::spawn_local(async move {
            let Some(text) = read.await else {
                return;
            };
            let mut p = page.borrow_mut();
            p.input.set_value(&text);
            p.app.on_clipboard_read(&text);
            p.show();
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use html_escaper::consts::{DEFAULT_JAR_PATH, JAR_PATH_ENV};
    use html_escaper::filter;
    use html_escaper::persistence::FileJar;

    env_logger::init();
    log::info!("HTML Escaper (native) starting...");

    let path = std::env::var(JAR_PATH_ENV).unwrap_or_else(|_| DEFAULT_JAR_PATH.to_string());
    let jar = FileJar::open(&path).unwrap_or_else(|e| {
        log::warn!("{}; starting with default preferences", e);
        FileJar::empty(&path)
    });

    match filter::run(std::env::args().skip(1), std::io::stdin().lock(), jar) {
        Ok((output, _)) => print!("{}", output),
        Err(e) => {
            log::error!("Failed to read stdin: {}", e);
            std::process::exit(1);
        }
    }
}

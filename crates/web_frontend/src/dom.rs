//! The page as seen through the browser DOM

use foodprint_core::render::CONTRIBUTE_BUTTON_ID;
use foodprint_core::{EmissionResults, Locale, Page};
use gloo::events::{EventListener, EventListenerOptions};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, File, HtmlElement, HtmlInputElement};

pub const UPLOAD_FORM_ID: &str = "upload-form";
pub const IMAGE_INPUT_ID: &str = "fridge-image";
pub const RESULTS_ID: &str = "results";
pub const ANALYSIS_RESULTS_ID: &str = "analysis-results";
pub const LEADERBOARD_ID: &str = "leaderboard";

/// Callbacks the page invokes on user events
pub struct Handlers {
    pub on_submit: Rc<dyn Fn()>,
    pub on_contribute: Rc<dyn Fn(EmissionResults)>,
}

pub struct DomPage {
    document: Document,
    form: Element,
    image_input: HtmlInputElement,
    results: HtmlElement,
    analysis_results: Element,
    leaderboard: Element,
    handlers: RefCell<Option<Handlers>>,
    submit_listener: RefCell<Option<EventListener>>,
    // Replaced on every render along with the button it listens to
    contribute_listener: RefCell<Option<EventListener>>,
}

impl DomPage {
    /// Resolve the page elements; fails when one of them is missing
    pub fn from_document(document: Document) -> Result<Self, JsValue> {
        let image_input = element(&document, IMAGE_INPUT_ID)?
            .dyn_into::<HtmlInputElement>()
            .map_err(JsValue::from)?;
        let results = element(&document, RESULTS_ID)?
            .dyn_into::<HtmlElement>()
            .map_err(JsValue::from)?;

        Ok(Self {
            form: element(&document, UPLOAD_FORM_ID)?,
            analysis_results: element(&document, ANALYSIS_RESULTS_ID)?,
            leaderboard: element(&document, LEADERBOARD_ID)?,
            image_input,
            results,
            document,
            handlers: RefCell::new(None),
            submit_listener: RefCell::new(None),
            contribute_listener: RefCell::new(None),
        })
    }

    /// Locale declared by the `<html lang>` attribute
    pub fn locale(&self) -> Locale {
        self.document
            .document_element()
            .and_then(|root| root.get_attribute("lang"))
            .map(|lang| Locale::from_lang_attribute(&lang))
            .unwrap_or_default()
    }

    pub fn set_handlers(&self, handlers: Handlers) {
        *self.handlers.borrow_mut() = Some(handlers);
    }
}

fn element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", id)))
}

impl Page for DomPage {
    type Image = File;

    fn attach_submit_handler(&self) {
        let Some(on_submit) = self.handlers.borrow().as_ref().map(|h| h.on_submit.clone()) else {
            gloo::console::warn!("submit handler requested before handlers were set");
            return;
        };

        let listener = EventListener::new_with_options(
            &self.form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                on_submit();
            },
        );
        *self.submit_listener.borrow_mut() = Some(listener);
    }

    fn selected_image(&self) -> Option<File> {
        self.image_input.files().and_then(|files| files.get(0))
    }

    fn set_analysis_html(&self, html: &str) {
        self.analysis_results.set_inner_html(html);
    }

    fn attach_contribute_handler(&self, emissions: EmissionResults) {
        let Some(on_contribute) = self
            .handlers
            .borrow()
            .as_ref()
            .map(|h| h.on_contribute.clone())
        else {
            return;
        };
        let Some(button) = self.document.get_element_by_id(CONTRIBUTE_BUTTON_ID) else {
            gloo::console::warn!("contribute button missing from rendered results");
            return;
        };

        let listener = EventListener::new(&button, "click", move |_| {
            on_contribute(emissions.clone());
        });
        *self.contribute_listener.borrow_mut() = Some(listener);
    }

    fn show_results(&self) {
        if let Err(err) = self.results.style().set_property("display", "block") {
            gloo::console::error!("Failed to reveal results:", err);
        }
    }

    fn set_leaderboard_html(&self, html: &str) {
        self.leaderboard.set_inner_html(html);
    }

    fn alert(&self, message: &str) {
        gloo::dialogs::alert(message);
    }

    fn prompt(&self, message: &str) -> Option<String> {
        gloo::dialogs::prompt(message, None)
    }

    fn log_error(&self, message: &str) {
        gloo::console::error!(message.to_string());
    }
}

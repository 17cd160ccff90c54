//! DOM-backed UI handles.

use analysis::{BusyIndicator, InitError, RenderError, ResultsPanel, TriggerControl};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlButtonElement, HtmlElement};

use crate::error::WebError;

pub fn document() -> Result<Document, InitError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| InitError::Environment("no document available".to_string()))
}

/// Looks up `id` and checks it is a `T`.
pub fn element_by_id<T: JsCast>(
    document: &Document,
    id: &str,
    expected: &'static str,
) -> Result<T, InitError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| InitError::MissingElement { id: id.to_string() })?
        .dyn_into::<T>()
        .map_err(|_| InitError::WrongElementType {
            id: id.to_string(),
            expected,
        })
}

pub struct DomTrigger {
    button: HtmlButtonElement,
}

impl DomTrigger {
    pub fn new(button: HtmlButtonElement) -> Self {
        Self { button }
    }

    pub fn on_click(&self, handler: &Closure<dyn FnMut()>) -> Result<(), WebError> {
        self.button
            .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
            .map_err(WebError::js)
    }
}

impl TriggerControl for DomTrigger {
    fn set_enabled(&self, enabled: bool) {
        self.button.set_disabled(!enabled);
    }

    fn is_enabled(&self) -> bool {
        !self.button.disabled()
    }
}

/// Results are written as text, never parsed as markup.
pub struct DomResults {
    element: HtmlElement,
}

impl DomResults {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }
}

impl ResultsPanel for DomResults {
    fn clear(&self) {
        self.element.set_text_content(None);
    }

    fn render(&self, text: &str) -> Result<(), RenderError> {
        let document = self
            .element
            .owner_document()
            .ok_or_else(|| RenderError("results panel is detached".to_string()))?;
        let paragraph = document
            .create_element("p")
            .map_err(|e| RenderError(format!("{e:?}")))?;
        paragraph.set_text_content(Some(text));
        self.element.set_text_content(None);
        self.element
            .append_child(&paragraph)
            .map(|_| ())
            .map_err(|e| RenderError(format!("{e:?}")))
    }
}

pub struct DomSpinner {
    element: HtmlElement,
}

impl DomSpinner {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    fn set_display(&self, value: &str) {
        if let Err(err) = self.element.style().set_property("display", value) {
            warn!(error = ?err, display = value, "failed to update busy indicator");
        }
    }
}

impl BusyIndicator for DomSpinner {
    fn show(&self) {
        self.set_display("block");
    }

    fn hide(&self) {
        self.set_display("none");
    }
}

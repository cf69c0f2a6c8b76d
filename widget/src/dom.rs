//! DOM binding for the chat widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host page renders the form, input, and message container; this
//! module looks them up by id once the document is parsed, builds a single
//! [`ChatController`], and wires the form's `submit` event to it.
//!
//! Message text is inserted as a DOM text node, so markup in user input or
//! bot replies is displayed rather than interpreted.

#[cfg(all(test, target_arch = "wasm32"))]
#[path = "dom_test.rs"]
mod dom_test;

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement};

use crate::controller::{ChatController, MessageLog};
use crate::message::ChatMessage;
use crate::net::api::FetchTransport;

pub const FORM_ID: &str = "chat-form";
pub const INPUT_ID: &str = "chat-input";
pub const MESSAGES_ID: &str = "chat-messages";

const MESSAGE_CLASS: &str = "message";

pub type DomController = ChatController<DomMessageLog, FetchTransport>;

#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("element #{0} not found")]
    MissingElement(&'static str),
    #[error("element #{0} has the wrong type")]
    WrongElementType(&'static str),
    #[error("javascript error: {0}")]
    Js(String),
}

fn js_error(value: JsValue) -> WidgetError {
    WidgetError::Js(format!("{value:?}"))
}

// =============================================================================
// MESSAGE LOG
// =============================================================================

/// Chat log rendered into the `#chat-messages` container.
pub struct DomMessageLog {
    document: Document,
    container: HtmlElement,
}

impl DomMessageLog {
    #[must_use]
    pub fn new(document: Document, container: HtmlElement) -> Self {
        Self { document, container }
    }

    /// Build `<div class="message"><strong>Label:</strong> text</div>`.
    fn build_entry(&self, message: &ChatMessage) -> Result<Element, JsValue> {
        let entry = self.document.create_element("div")?;
        entry.set_class_name(MESSAGE_CLASS);

        let label = self.document.create_element("strong")?;
        label.set_text_content(Some(&format!("{}:", message.sender.label())));
        entry.append_child(&label)?;

        let text = self
            .document
            .create_text_node(&format!(" {}", message.text));
        entry.append_child(&text)?;
        Ok(entry)
    }
}

impl MessageLog for DomMessageLog {
    fn append(&self, message: &ChatMessage) {
        let result = self
            .build_entry(message)
            .and_then(|entry| self.container.append_child(&entry));
        if let Err(e) = result {
            log::warn!("failed to render chat message: {e:?}");
        }
    }

    fn scroll_to_bottom(&self) {
        self.container
            .set_scroll_top(self.container.scroll_height());
    }
}

// =============================================================================
// BINDING
// =============================================================================

fn document() -> Result<Document, WidgetError> {
    web_sys::window()
        .ok_or(WidgetError::NoWindow)?
        .document()
        .ok_or(WidgetError::NoDocument)
}

fn element_by_id<E: JsCast>(document: &Document, id: &'static str) -> Result<E, WidgetError> {
    document
        .get_element_by_id(id)
        .ok_or(WidgetError::MissingElement(id))?
        .dyn_into::<E>()
        .map_err(|_| WidgetError::WrongElementType(id))
}

/// Bind the widget to the current document.
///
/// Call once per page; every call installs another submit listener.
///
/// # Errors
///
/// Returns an error if any of the three host elements is missing or is not
/// the expected element type.
pub fn mount(document: &Document) -> Result<Rc<DomController>, WidgetError> {
    let form: HtmlFormElement = element_by_id(document, FORM_ID)?;
    let input: HtmlInputElement = element_by_id(document, INPUT_ID)?;
    let container: HtmlElement = element_by_id(document, MESSAGES_ID)?;

    let controller = Rc::new(ChatController::new(
        DomMessageLog::new(document.clone(), container),
        FetchTransport::default(),
    ));

    let on_submit = {
        let controller = Rc::clone(&controller);
        Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
            ev.prevent_default();
            let Some(text) = controller.accept(&input.value()) else {
                return;
            };
            input.set_value("");
            let controller = Rc::clone(&controller);
            wasm_bindgen_futures::spawn_local(async move {
                controller.deliver(&text).await;
            });
        })
    };
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
        .map_err(js_error)?;
    // The listener lives as long as the page.
    on_submit.forget();

    log::info!("chat widget bound to #{FORM_ID}");
    Ok(controller)
}

/// Mount now if the document is parsed, otherwise on `DOMContentLoaded`.
///
/// # Errors
///
/// Returns an error if there is no document, if listener registration fails,
/// or if an immediate mount fails. A deferred mount failure is logged.
pub fn bind_on_ready() -> Result<(), WidgetError> {
    let document = document()?;
    if document.ready_state() != "loading" {
        return mount(&document).map(|_| ());
    }

    let deferred = document.clone();
    let on_ready = Closure::once_into_js(move || {
        if let Err(e) = mount(&deferred) {
            log::error!("chat widget failed to bind: {e}");
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        .map_err(js_error)
}

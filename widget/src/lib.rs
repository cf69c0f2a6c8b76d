//! # chat-widget
//!
//! WASM chat widget for the project recommender. Binds to a host page that
//! already renders the chat form, input field, and message container, then
//! forwards each submitted message to `POST /chatbot` and renders the reply.
//!
//! The controller and message types build on any target so the submit flow
//! can be tested natively; DOM binding and the `gloo-net` transport are
//! behind the `hydrate` feature.

pub mod controller;
pub mod message;
pub mod net;

#[cfg(feature = "hydrate")]
pub mod dom;

/// WASM entry point: install the panic hook and logger, then bind the widget
/// once the host document is ready.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("chat widget logger unavailable: {e}").into());
    }

    if let Err(e) = dom::bind_on_ready() {
        log::error!("chat widget failed to bind: {e}");
    }
}

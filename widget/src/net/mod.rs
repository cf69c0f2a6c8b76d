//! Networking for the chat widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` defines the `/chatbot` wire schema, the transport seam the
//! controller depends on, and the browser `fetch` implementation of it.

pub mod api;

//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on protocol translation and cookie plumbing.

pub mod auth;
pub mod chatbot;
pub mod recommender;
pub mod session;

//! LLM — Ollama adapter for chatbot replies and project recommendations.
//!
//! DESIGN
//! ======
//! Services depend on the [`LlmGenerate`] trait, never on the concrete
//! client, so tests can swap in canned responses. The only production
//! implementation is [`OllamaClient`], which talks to a local Ollama
//! daemon's non-streaming `/api/generate` endpoint.

pub mod config;
pub mod ollama;
pub mod types;

pub use ollama::OllamaClient;
pub use types::{LlmError, LlmGenerate};

//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the account database pool, the LLM client used by both chat
//! endpoints, and the in-memory guided-recommender sessions.

use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::DEFAULT_STATIC_DIR;
use crate::llm::LlmGenerate;
use crate::services::recommender::SessionManager;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub llm: Arc<dyn LlmGenerate>,
    pub recommender: Arc<SessionManager>,
    /// Mark session cookies `Secure`.
    pub cookie_secure: bool,
    /// Directory holding the host pages (`login.html`, `chat.html`, ...).
    pub static_dir: PathBuf,
}

impl AppState {
    #[must_use]
    pub fn new(pool: SqlitePool, llm: Arc<dyn LlmGenerate>, cookie_secure: bool) -> Self {
        Self {
            pool,
            llm,
            recommender: Arc::new(SessionManager::new()),
            cookie_secure,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }

    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the page, form-auth and chat JSON endpoints under a
//! single Axum router. Host pages are plain HTML under `STATIC_DIR`; the
//! chat widget's wasm bundle is served from `WIDGET_PKG_DIR` at `/pkg`.

pub mod auth;
pub mod chatbot;
pub mod pages;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::state::AppState;

/// JSON endpoints called by the widget and other clients.
fn api_routes() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chatbot", post(chatbot::chatbot))
        .route("/recommend", post(chatbot::recommend))
        .route("/recommend/{user_id}", delete(chatbot::reset_recommendation))
        .layer(cors)
}

/// Full application router.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/login", get(pages::login_page).post(auth::login))
        .route("/signup", get(pages::signup_page).post(auth::signup))
        .route("/register", post(auth::signup))
        .route("/logout", post(auth::logout))
        .route("/chat", get(pages::chat_page))
        .route("/favicon.ico", get(favicon))
        .route("/healthz", get(healthz))
        .merge(api_routes())
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .nest_service("/pkg", ServeDir::new(&config.widget_pkg_dir))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

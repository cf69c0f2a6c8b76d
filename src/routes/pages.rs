//! Host pages — static HTML shells for login, signup and the chat widget.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use crate::routes::auth::current_user;
use crate::state::AppState;

pub const LOGIN_PAGE: &str = "login.html";
pub const SIGNUP_PAGE: &str = "signup.html";
pub const CHAT_PAGE: &str = "chat.html";

async fn serve_page(state: &AppState, name: &str) -> Result<Html<String>, StatusCode> {
    let path = state.static_dir.join(name);
    tokio::fs::read_to_string(&path).await.map(Html).map_err(|e| {
        warn!(error = %e, path = %path.display(), "host page unreadable");
        StatusCode::NOT_FOUND
    })
}

/// `GET /` — send visitors to the login form.
pub async fn index() -> Redirect {
    Redirect::to("/login")
}

/// `GET /login`
pub async fn login_page(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    serve_page(&state, LOGIN_PAGE).await
}

/// `GET /signup`
pub async fn signup_page(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    serve_page(&state, SIGNUP_PAGE).await
}

/// `GET /chat` — chat host page; requires a live session.
pub async fn chat_page(State(state): State<AppState>, jar: CookieJar) -> Result<Response, StatusCode> {
    if current_user(&state, &jar).await?.is_none() {
        return Ok(Redirect::to("/login").into_response());
    }
    Ok(serve_page(&state, CHAT_PAGE).await?.into_response())
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;

//! Auth routes — form login, signup and logout backed by session cookies.

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;
use tracing::{info, warn};

use crate::services::auth::{self as auth_svc, AuthError, User};
use crate::services::session;
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const MISSING_CREDENTIALS: &str = "Username and password are required";

const SESSION_DAYS: i64 = 30;

/// Fields posted by the login and signup forms.
#[derive(Debug, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::days(SESSION_DAYS))
        .build()
}

fn cleared_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

/// Resolve the session cookie to a user, if any.
pub(crate) async fn current_user(state: &AppState, jar: &CookieJar) -> Result<Option<User>, StatusCode> {
    let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
    if token.is_empty() {
        return Ok(None);
    }
    session::validate_session(&state.pool, token).await.map_err(|e| {
        warn!(error = %e, "session lookup failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /login` — verify credentials, set the session cookie, go to `/chat`.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Form(form): Form<Credentials>) -> Response {
    let user = match auth_svc::verify(&state.pool, &form.username, &form.password).await {
        Ok(Some(user)) => user,
        Ok(None) => return (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS).into_response(),
        Err(e) => {
            warn!(error = %e, "login lookup failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let token = match session::create_session(&state.pool, user.id).await {
        Ok(token) => token,
        Err(e) => {
            warn!(error = %e, user_id = user.id, "session create failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    info!(user_id = user.id, username = %user.username, "user logged in");
    let jar = jar.add(session_cookie(token, state.cookie_secure));
    (jar, Redirect::to("/chat")).into_response()
}

/// `POST /signup` and `POST /register` — create an account, then go to `/login`.
pub async fn signup(State(state): State<AppState>, Form(form): Form<Credentials>) -> Response {
    match auth_svc::register(&state.pool, &form.username, &form.password).await {
        Ok(user) => {
            info!(user_id = user.id, username = %user.username, "user registered");
            Redirect::to("/login").into_response()
        }
        Err(AuthError::InvalidInput) => (StatusCode::BAD_REQUEST, MISSING_CREDENTIALS).into_response(),
        Err(e @ AuthError::UsernameTaken) => (StatusCode::CONFLICT, e.to_string()).into_response(),
        Err(e) => {
            warn!(error = %e, "signup failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `POST /logout` — drop the session and clear the cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(COOKIE_NAME) {
        if let Err(e) = session::delete_session(&state.pool, cookie.value()).await {
            warn!(error = %e, "session delete failed");
        }
    }

    let jar = jar.add(cleared_cookie(state.cookie_secure));
    (jar, Redirect::to("/login")).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

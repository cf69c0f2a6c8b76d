use super::*;
use crate::routes::auth::COOKIE_NAME;
use crate::services::{auth, session};
use crate::state::test_helpers::test_app_state;
use axum::http::header;
use axum_extra::extract::cookie::Cookie;

#[tokio::test]
async fn index_redirects_to_login() {
    let response = index().await.into_response();
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
}

#[tokio::test]
async fn login_and_signup_pages_are_served() {
    let state = test_app_state().await;
    let Html(login) = login_page(State(state.clone())).await.unwrap();
    assert!(login.contains("action=\"/login\""));
    let Html(signup) = signup_page(State(state)).await.unwrap();
    assert!(signup.contains("action=\"/signup\""));
}

#[tokio::test]
async fn chat_page_without_session_redirects() {
    let state = test_app_state().await;
    let response = chat_page(State(state), CookieJar::new()).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
}

#[tokio::test]
async fn chat_page_with_stale_cookie_redirects() {
    let state = test_app_state().await;
    let jar = CookieJar::new().add(Cookie::new(COOKIE_NAME, "stale"));
    let response = chat_page(State(state), jar).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn chat_page_with_session_serves_widget_host() {
    let state = test_app_state().await;
    let user = auth::register(&state.pool, "ada", "pw").await.unwrap();
    let token = session::create_session(&state.pool, user.id).await.unwrap();
    let jar = CookieJar::new().add(Cookie::new(COOKIE_NAME, token));

    let response = chat_page(State(state), jar).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("id=\"chat-form\""));
    assert!(html.contains("id=\"chat-input\""));
    assert!(html.contains("id=\"chat-messages\""));
}

#[tokio::test]
async fn missing_page_is_not_found() {
    let state = test_app_state().await.with_static_dir("/nonexistent-host-pages");
    let err = login_page(State(state)).await.unwrap_err();
    assert_eq!(err, StatusCode::NOT_FOUND);
}

//! Chat routes — the widget's `/chatbot` endpoint and the guided recommender.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::services::{chatbot as chatbot_svc, recommender};
use crate::state::AppState;

pub const MISSING_RECOMMEND_FIELDS: &str = "User ID and query are required.";

#[derive(Debug, Default, Deserialize)]
pub struct ChatbotRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatbotResponse {
    pub reply: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: String,
    pub stage: recommender::Stage,
}

/// `POST /chatbot` — always 200 with a `reply` string.
pub async fn chatbot(State(state): State<AppState>, Json(body): Json<ChatbotRequest>) -> Json<ChatbotResponse> {
    let reply = chatbot_svc::reply(state.llm.as_ref(), &body.message).await;
    Json(ChatbotResponse { reply })
}

/// `POST /recommend` — advance one user's guided flow by one answer.
pub async fn recommend(State(state): State<AppState>, Json(body): Json<RecommendRequest>) -> Response {
    let user_id = body.user_id.trim();
    let query = body.query.trim();
    if user_id.is_empty() || query.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": MISSING_RECOMMEND_FIELDS }))).into_response();
    }

    let step = recommender::advance(state.llm.as_ref(), &state.recommender, user_id, query).await;
    Json(RecommendResponse { recommendations: step.reply, stage: step.stage }).into_response()
}

/// `DELETE /recommend/{user_id}` — start that user's flow over.
pub async fn reset_recommendation(State(state): State<AppState>, Path(user_id): Path<String>) -> StatusCode {
    state.recommender.reset_session(&user_id).await;
    info!(%user_id, "recommender session reset");
    StatusCode::NO_CONTENT
}

#[cfg(test)]
#[path = "chatbot_test.rs"]
mod tests;

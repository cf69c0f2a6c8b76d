use super::*;
use crate::llm::LlmError;
use crate::state::test_helpers::ScriptedLlm;

// =========================================================================
// is_project_query
// =========================================================================

#[test]
fn project_keywords_are_detected() {
    assert!(is_project_query("Can you suggest something?"));
    assert!(is_project_query("I want a PROJECT for my resume"));
    assert!(is_project_query("machine learning ideas please"));
    assert!(is_project_query("data science"));
}

#[test]
fn greetings_are_not_project_queries() {
    assert!(!is_project_query("hello"));
    assert!(!is_project_query("bye"));
    assert!(!is_project_query("what's the weather"));
}

#[test]
fn short_keywords_match_inside_words() {
    // "ai" inside "said" and "ml" inside "html" both count.
    assert!(is_project_query("she said hi"));
    assert!(is_project_query("html help"));
}

// =========================================================================
// build_prompt
// =========================================================================

#[test]
fn project_query_gets_system_prompt() {
    let prompt = build_prompt("recommend a project");
    assert!(prompt.starts_with("You are an expert AI project recommender."));
    assert!(prompt.ends_with("\nUser: recommend a project"));
}

#[test]
fn other_messages_are_forwarded_verbatim() {
    assert_eq!(build_prompt("hello there"), "hello there");
}

// =========================================================================
// reply
// =========================================================================

#[tokio::test]
async fn reply_returns_model_text() {
    let llm = ScriptedLlm::new(vec![Ok(Some("Hello!".into()))]);
    assert_eq!(reply(&llm, "hello").await, "Hello!");
    assert_eq!(llm.prompts(), vec!["hello"]);
}

#[tokio::test]
async fn reply_wraps_project_queries() {
    let llm = ScriptedLlm::new(vec![Ok(Some("1. A: b".into()))]);
    reply(&llm, "suggest a project").await;
    let prompts = llm.prompts();
    assert!(prompts[0].contains(SYSTEM_PROMPT));
}

#[tokio::test]
async fn reply_without_completion_uses_sorry_text() {
    let llm = ScriptedLlm::new(vec![Ok(None)]);
    assert_eq!(reply(&llm, "hello").await, EMPTY_REPLY);
}

#[tokio::test]
async fn reply_reports_model_errors_as_text() {
    let llm = ScriptedLlm::new(vec![Err(LlmError::ApiRequest("connection refused".into()))]);
    assert_eq!(
        reply(&llm, "hello").await,
        "Error communicating with Ollama: API request failed: connection refused"
    );
}

//! Chatbot service — one message in, one reply string out.
//!
//! DESIGN
//! ======
//! Messages that look like project-recommendation requests are wrapped in
//! the recommender system prompt before going to the model; everything
//! else is forwarded verbatim. The reply is always a string: model failures
//! become a bot message instead of an HTTP error, so the widget can render
//! whatever comes back.

use tracing::{info, warn};

use crate::llm::LlmGenerate;

/// Reply used when the model answers without any completion text.
pub const EMPTY_REPLY: &str = "Sorry, I could not generate a response.";

/// Substrings that mark a message as a project-recommendation query.
pub const PROJECT_KEYWORDS: &[&str] = &[
    "project",
    "suggest",
    "idea",
    "recommend",
    "machine learning",
    "ai",
    "ml",
    "deep learning",
    "data science",
];

pub const SYSTEM_PROMPT: &str = "You are an expert AI project recommender. \
If the user asks for project suggestions, reply with a list of at least 5 project ideas. \
For each project, provide only the Title and a 1-2 sentence Description. \
Output each project on a separate line, not as a paragraph. Do not include skills, timeline, or tech stack unless the user asks for details about a specific project.\n\
Strictly format your response as follows (each project on its own line):\n\
1. Project Title 1: Short description.\n\
2. Project Title 2: Short description.\n\
3. Project Title 3: Short description.\n\
4. Project Title 4: Short description.\n\
5. Project Title 5: Short description.\n\
(Do not use paragraphs. Do not combine multiple projects in one line. Each project must be on its own line.)\n\
If the user asks for details about a specific project, then provide: Skills required, Estimated Timeline, and Recommended Tech Stack for that project.\n\
If the user says hi/hello/bye, respond briefly and politely. \
If the user asks something else, do your best to help.\n";

/// Case-insensitive keyword check. Plain substring match, so `"ai"` also
/// matches inside longer words.
#[must_use]
pub fn is_project_query(message: &str) -> bool {
    let lower = message.to_lowercase();
    PROJECT_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Prompt sent to the model for `message`.
#[must_use]
pub fn build_prompt(message: &str) -> String {
    if is_project_query(message) {
        format!("{SYSTEM_PROMPT}\nUser: {message}")
    } else {
        message.to_string()
    }
}

/// Generate the bot reply for `message`. Never fails.
pub async fn reply(llm: &dyn LlmGenerate, message: &str) -> String {
    info!(message_len = message.len(), project_query = is_project_query(message), "chatbot: message received");
    let prompt = build_prompt(message);

    match llm.generate(&prompt).await {
        Ok(Some(text)) => text,
        Ok(None) => {
            warn!("chatbot: model returned no completion");
            EMPTY_REPLY.to_string()
        }
        Err(e) => {
            warn!(error = %e, "chatbot: model request failed");
            format!("Error communicating with Ollama: {e}")
        }
    }
}

#[cfg(test)]
#[path = "chatbot_test.rs"]
mod tests;

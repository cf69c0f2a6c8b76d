//! Guided project recommender — question flow → LLM suggestions.
//!
//! DESIGN
//! ======
//! Each user id owns a [`RecommenderSession`] that walks a fixed sequence of
//! stages: five multiple-choice questions about the user, then three LLM
//! rounds (project titles, problem statements, overview). Each call to
//! [`advance`] consumes one answer and returns the next prompt.
//!
//! Sessions live in memory only and are lost on restart. Invalid answers
//! and LLM failures leave the stage unchanged so the user can retry. A
//! reset that lands while an answer is waiting on the LLM wins; the late
//! answer is dropped.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::llm::{LlmError, LlmGenerate};

const MAX_ITEMS: usize = 5;

// =============================================================================
// PROMPT TEMPLATES
// =============================================================================

pub const GREETING: &str = "Welcome! I am your Project Recommender Assistant. How can I assist you today?";
pub const SKILL_LEVEL: &str = "Please tell me your skill level: 1) Beginner 2) Intermediate 3) Advanced.";
pub const INTEREST_AREA: &str = "What is your area of interest? 1) Machine Learning 2) Deep Learning 3) Natural Language Processing 4) Computer Vision 5) Generative AI.";
pub const LANGUAGE: &str = "Which programming language do you prefer? 1) Python 2) JavaScript 3) Java 4) C++ 5) Other.";
pub const TIME_AVAILABLE: &str = "How much time do you have available? 1) 1-2 weeks 2) 2-4 weeks 3) 1-2 months 4) 2+ months.";
pub const DOMAIN: &str = "What domain are you interested in? 1) IoT 2) Blockchain 3) Data Science 4) Web Application 5) Mobile Application.";
pub const EXPLORE_AGAIN: &str = "Would you like to explore another project? Yes / No";
pub const GOODBYE: &str = "Thanks for using the Project Recommender! Say hi whenever you want fresh ideas.";

const SKILL_LEVELS: &[&str] = &["Beginner", "Intermediate", "Advanced"];
const INTEREST_AREAS: &[&str] =
    &["Machine Learning", "Deep Learning", "Natural Language Processing", "Computer Vision", "Generative AI"];
const LANGUAGES: &[&str] = &["Python", "JavaScript", "Java", "C++", "Other"];
const TIMES_AVAILABLE: &[&str] = &["1-2 weeks", "2-4 weeks", "1-2 months", "2+ months"];
const DOMAINS: &[&str] = &["IoT", "Blockchain", "Data Science", "Web Application", "Mobile Application"];

#[must_use]
pub fn project_titles_message(titles: &[String]) -> String {
    format!(
        "Here are some project titles based on your preferences:\n{}\nWhich project interests you?",
        titles.join("\n")
    )
}

#[must_use]
pub fn problem_statements_message(statements: &[String]) -> String {
    format!(
        "For the selected project, here are some problem statements:\n{}\nWhich problem statement do you choose?",
        statements.join("\n")
    )
}

/// Fill the overview template from up to four LLM lines; missing lines are blank.
#[must_use]
pub fn overview_message(lines: &[String]) -> String {
    let line = |i: usize| lines.get(i).map_or("", String::as_str);
    format!(
        "Here is an overview of the selected problem:\n1. {}\n2. {}\n3. {}\n4. {}\n{EXPLORE_AGAIN}",
        line(0),
        line(1),
        line(2),
        line(3)
    )
}

// =============================================================================
// SESSION
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Greeting,
    SkillLevel,
    InterestArea,
    Language,
    TimeAvailable,
    Domain,
    ProjectTitles,
    ProblemStatements,
    Overview,
}

impl Stage {
    /// Question text and option labels for the multiple-choice stages.
    fn question(self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            Self::SkillLevel => Some((SKILL_LEVEL, SKILL_LEVELS)),
            Self::InterestArea => Some((INTEREST_AREA, INTEREST_AREAS)),
            Self::Language => Some((LANGUAGE, LANGUAGES)),
            Self::TimeAvailable => Some((TIME_AVAILABLE, TIMES_AVAILABLE)),
            Self::Domain => Some((DOMAIN, DOMAINS)),
            _ => None,
        }
    }
}

/// Everything collected for one user so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommenderSession {
    pub stage: Stage,
    pub skill_level: Option<String>,
    pub interest_area: Option<String>,
    pub language: Option<String>,
    pub time_available: Option<String>,
    pub domain: Option<String>,
    pub recommended_projects: Vec<String>,
    pub selected_project: Option<String>,
    pub problem_statements: Vec<String>,
    pub selected_problem: Option<String>,
}

impl RecommenderSession {
    fn field(value: Option<&String>) -> &str {
        value.map_or("any", String::as_str)
    }
}

/// One user's session plus the epoch it was created or last reset under.
#[derive(Debug, Default)]
struct Slot {
    session: RecommenderSession,
    epoch: u64,
}

/// In-memory session store keyed by user id.
///
/// [`advance`] works on a copy taken with [`SessionManager::checkout`] and
/// writes it back with [`SessionManager::commit`]. A reset in between gives
/// the slot a new epoch, so the stale copy is dropped instead of restoring
/// the old answers.
#[derive(Default)]
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Slot>>,
    next_epoch: AtomicU64,
}

impl SessionManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_epoch(&self) -> u64 {
        self.next_epoch.fetch_add(1, Ordering::Relaxed)
    }

    /// Copy of the user's session and its epoch, creating the session on
    /// first use.
    pub async fn checkout(&self, user_id: &str) -> (RecommenderSession, u64) {
        let mut sessions = self.sessions.write().await;
        let slot = sessions
            .entry(user_id.to_string())
            .or_insert_with(|| Slot { session: RecommenderSession::default(), epoch: self.fresh_epoch() });
        (slot.session.clone(), slot.epoch)
    }

    /// Store `session` if the slot still carries `epoch`.
    ///
    /// # Errors
    ///
    /// Returns the stage currently stored when the slot was reset since the
    /// checkout; `session` is discarded.
    pub async fn commit(&self, user_id: &str, epoch: u64, session: RecommenderSession) -> Result<(), Stage> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(user_id) {
            Some(slot) if slot.epoch == epoch => {
                slot.session = session;
                Ok(())
            }
            Some(slot) => Err(slot.session.stage),
            None => Err(Stage::Greeting),
        }
    }

    /// Put an existing user back at the greeting with no answers recorded.
    /// Unknown users are left alone.
    pub async fn reset_session(&self, user_id: &str) {
        let mut sessions = self.sessions.write().await;
        if let Some(slot) = sessions.get_mut(user_id) {
            *slot = Slot { session: RecommenderSession::default(), epoch: self.fresh_epoch() };
        }
    }

    #[cfg(test)]
    pub async fn get_session(&self, user_id: &str) -> RecommenderSession {
        self.checkout(user_id).await.0
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

// =============================================================================
// INPUT HELPERS
// =============================================================================

/// Map a typed answer (`"2"`, `"two"`, `"second"`) to a 1-based choice.
#[must_use]
pub fn normalize_choice(text: &str) -> Option<usize> {
    match text.trim().to_lowercase().as_str() {
        "1" | "one" | "first" => Some(1),
        "2" | "two" | "second" => Some(2),
        "3" | "three" | "third" => Some(3),
        "4" | "four" | "fourth" => Some(4),
        "5" | "five" | "fifth" => Some(5),
        _ => None,
    }
}

/// First five non-empty lines of model output, trimmed.
#[must_use]
pub fn extract_items(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_ITEMS)
        .map(str::to_string)
        .collect()
}

fn is_yes(text: &str) -> bool {
    matches!(text.trim().to_lowercase().as_str(), "yes" | "y")
}

fn is_no(text: &str) -> bool {
    matches!(text.trim().to_lowercase().as_str(), "no" | "n")
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("Error communicating with the language model: {0}")]
    Llm(#[from] LlmError),
    #[error("The language model returned no suggestions. Please try again.")]
    EmptyCompletion,
}

async fn generate_items(llm: &dyn LlmGenerate, prompt: &str) -> Result<Vec<String>, RecommendError> {
    let text = llm
        .generate(prompt)
        .await?
        .ok_or(RecommendError::EmptyCompletion)?;
    let items = extract_items(&text);
    if items.is_empty() {
        return Err(RecommendError::EmptyCompletion);
    }
    Ok(items)
}

// =============================================================================
// LLM PROMPTS
// =============================================================================

fn titles_prompt(session: &RecommenderSession) -> String {
    format!(
        "Suggest exactly 5 project titles for a {skill} developer interested in {interest}, \
         preferring {language}, with {time} available, in the {domain} domain. \
         Output each project on its own line as '1. Title: one sentence description.' and nothing else.",
        skill = RecommenderSession::field(session.skill_level.as_ref()),
        interest = RecommenderSession::field(session.interest_area.as_ref()),
        language = RecommenderSession::field(session.language.as_ref()),
        time = RecommenderSession::field(session.time_available.as_ref()),
        domain = RecommenderSession::field(session.domain.as_ref()),
    )
}

fn problems_prompt(session: &RecommenderSession, project: &str) -> String {
    format!(
        "For the project \"{project}\", suggest 3 distinct problem statements suitable for a {skill} \
         developer using {language} with {time} available. \
         Output each problem statement on its own numbered line and nothing else.",
        skill = RecommenderSession::field(session.skill_level.as_ref()),
        language = RecommenderSession::field(session.language.as_ref()),
        time = RecommenderSession::field(session.time_available.as_ref()),
    )
}

fn overview_prompt(session: &RecommenderSession, project: &str, problem: &str) -> String {
    format!(
        "For the problem statement \"{problem}\" in the project \"{project}\", write exactly four lines \
         and nothing else:\n\
         1. A one-sentence summary of the problem.\n\
         2. A one-sentence summary of the proposed solution.\n\
         3. Why this project is recommended.\n\
         4. Why it suits a {skill} developer interested in {interest} with {time} available.",
        skill = RecommenderSession::field(session.skill_level.as_ref()),
        interest = RecommenderSession::field(session.interest_area.as_ref()),
        time = RecommenderSession::field(session.time_available.as_ref()),
    )
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Reply to one step of the guided flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advance {
    pub reply: String,
    pub stage: Stage,
}

pub async fn advance(llm: &dyn LlmGenerate, sessions: &SessionManager, user_id: &str, query: &str) -> Advance {
    let (mut session, epoch) = sessions.checkout(user_id).await;
    let from = session.stage;

    let reply = match session.stage {
        Stage::Greeting => {
            session.stage = Stage::SkillLevel;
            format!("{GREETING}\n{SKILL_LEVEL}")
        }
        Stage::SkillLevel | Stage::InterestArea | Stage::Language | Stage::TimeAvailable | Stage::Domain => {
            answer_question(llm, &mut session, query).await
        }
        Stage::ProjectTitles => choose_project(llm, &mut session, query).await,
        Stage::ProblemStatements => choose_problem(llm, &mut session, query).await,
        Stage::Overview => {
            if is_yes(query) {
                session.stage = Stage::ProjectTitles;
                project_titles_message(&session.recommended_projects)
            } else if is_no(query) {
                session = RecommenderSession::default();
                GOODBYE.to_string()
            } else {
                format!("Please answer Yes or No.\n{EXPLORE_AGAIN}")
            }
        }
    };

    let mut stage = session.stage;
    if let Err(current) = sessions.commit(user_id, epoch, session).await {
        warn!(user_id = %user_id, ?from, "recommender: session reset mid-request, answer dropped");
        stage = current;
    }
    info!(user_id = %user_id, ?from, to = ?stage, "recommender: advanced");
    Advance { reply, stage }
}

async fn answer_question(llm: &dyn LlmGenerate, session: &mut RecommenderSession, query: &str) -> String {
    let Some((question, options)) = session.stage.question() else {
        return String::new();
    };
    let Some(choice) = normalize_choice(query).filter(|c| *c <= options.len()) else {
        return format!("Please answer with a number between 1 and {}.\n{question}", options.len());
    };
    let label = Some(options[choice - 1].to_string());

    match session.stage {
        Stage::SkillLevel => {
            session.skill_level = label;
            session.stage = Stage::InterestArea;
            INTEREST_AREA.to_string()
        }
        Stage::InterestArea => {
            session.interest_area = label;
            session.stage = Stage::Language;
            LANGUAGE.to_string()
        }
        Stage::Language => {
            session.language = label;
            session.stage = Stage::TimeAvailable;
            TIME_AVAILABLE.to_string()
        }
        Stage::TimeAvailable => {
            session.time_available = label;
            session.stage = Stage::Domain;
            DOMAIN.to_string()
        }
        _ => {
            session.domain = label;
            match generate_items(llm, &titles_prompt(session)).await {
                Ok(titles) => {
                    let message = project_titles_message(&titles);
                    session.recommended_projects = titles;
                    session.stage = Stage::ProjectTitles;
                    message
                }
                Err(e) => {
                    warn!(error = %e, "recommender: title generation failed");
                    e.to_string()
                }
            }
        }
    }
}

async fn choose_project(llm: &dyn LlmGenerate, session: &mut RecommenderSession, query: &str) -> String {
    let count = session.recommended_projects.len();
    let Some(choice) = normalize_choice(query).filter(|c| *c <= count) else {
        return format!(
            "Please pick a project number between 1 and {count}.\n{}",
            project_titles_message(&session.recommended_projects)
        );
    };
    let project = session.recommended_projects[choice - 1].clone();

    match generate_items(llm, &problems_prompt(session, &project)).await {
        Ok(statements) => {
            let message = problem_statements_message(&statements);
            session.selected_project = Some(project);
            session.problem_statements = statements;
            session.stage = Stage::ProblemStatements;
            message
        }
        Err(e) => {
            warn!(error = %e, "recommender: problem statement generation failed");
            e.to_string()
        }
    }
}

async fn choose_problem(llm: &dyn LlmGenerate, session: &mut RecommenderSession, query: &str) -> String {
    let count = session.problem_statements.len();
    let Some(choice) = normalize_choice(query).filter(|c| *c <= count) else {
        return format!(
            "Please pick a problem statement number between 1 and {count}.\n{}",
            problem_statements_message(&session.problem_statements)
        );
    };
    let problem = session.problem_statements[choice - 1].clone();
    let project = session.selected_project.clone().unwrap_or_default();

    match generate_items(llm, &overview_prompt(session, &project, &problem)).await {
        Ok(lines) => {
            session.selected_problem = Some(problem);
            session.stage = Stage::Overview;
            overview_message(&lines)
        }
        Err(e) => {
            warn!(error = %e, "recommender: overview generation failed");
            e.to_string()
        }
    }
}

#[cfg(test)]
#[path = "recommender_test.rs"]
mod tests;

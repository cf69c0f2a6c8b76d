use super::*;
use crate::message::Sender;
use crate::net::api::{ChatReply, DeliveryError};
use futures::channel::oneshot;
use futures::executor::block_on;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

// =============================================================
// Test doubles
// =============================================================

/// In-memory log. Scroll height is modeled as the number of entries.
#[derive(Default)]
struct RecordingLog {
    entries: RefCell<Vec<ChatMessage>>,
    scroll_top: Cell<usize>,
    /// Set when an append happens and cleared by the next scroll.
    unscrolled: Cell<bool>,
}

impl RecordingLog {
    fn lines(&self) -> Vec<String> {
        self.entries.borrow().iter().map(ToString::to_string).collect()
    }

    fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    fn at_bottom(&self) -> bool {
        !self.unscrolled.get() && self.scroll_top.get() == self.len()
    }
}

impl MessageLog for RecordingLog {
    fn append(&self, message: &ChatMessage) {
        self.entries.borrow_mut().push(message.clone());
        self.unscrolled.set(true);
    }

    fn scroll_to_bottom(&self) {
        self.scroll_top.set(self.len());
        self.unscrolled.set(false);
    }
}

enum Outcome {
    Reply(&'static str),
    Body(&'static str),
    Network,
    Status(u16),
}

/// Transport that answers every request the same way and records what the
/// log looked like when each request was issued.
struct StubTransport<'a> {
    log: &'a RecordingLog,
    outcome: Outcome,
    sent: RefCell<Vec<(String, usize)>>,
}

impl<'a> StubTransport<'a> {
    fn new(log: &'a RecordingLog, outcome: Outcome) -> Self {
        Self { log, outcome, sent: RefCell::new(Vec::new()) }
    }

    fn messages(&self) -> Vec<String> {
        self.sent.borrow().iter().map(|(m, _)| m.clone()).collect()
    }
}

#[async_trait::async_trait(?Send)]
impl ChatTransport for StubTransport<'_> {
    async fn send(&self, message: &str) -> Result<ChatReply, DeliveryError> {
        self.sent
            .borrow_mut()
            .push((message.to_owned(), self.log.len()));
        match &self.outcome {
            Outcome::Reply(text) => Ok(ChatReply { reply: (*text).to_owned() }),
            Outcome::Body(body) => ChatReply::from_body(body),
            Outcome::Network => Err(DeliveryError::Network("connection refused".into())),
            Outcome::Status(code) => Err(DeliveryError::Status(*code)),
        }
    }
}

/// Transport whose replies are released by the test, one gate per message.
struct GatedTransport {
    gates: RefCell<HashMap<String, oneshot::Receiver<String>>>,
}

#[async_trait::async_trait(?Send)]
impl ChatTransport for GatedTransport {
    async fn send(&self, message: &str) -> Result<ChatReply, DeliveryError> {
        let gate = self
            .gates
            .borrow_mut()
            .remove(message)
            .ok_or_else(|| DeliveryError::Network("no gate".into()))?;
        let reply = gate
            .await
            .map_err(|_| DeliveryError::Network("gate dropped".into()))?;
        Ok(ChatReply { reply })
    }
}

// =============================================================
// accept
// =============================================================

#[test]
fn accept_renders_trimmed_user_message() {
    let log = RecordingLog::default();
    let controller = ChatController::new(&log, StubTransport::new(&log, Outcome::Reply("unused")));

    assert_eq!(controller.accept("  Hi there \n"), Some("Hi there".to_owned()));
    assert_eq!(log.lines(), vec!["You: Hi there"]);
    assert!(log.at_bottom());
}

#[test]
fn accept_ignores_blank_input() {
    let log = RecordingLog::default();
    let controller = ChatController::new(&log, StubTransport::new(&log, Outcome::Reply("unused")));

    assert_eq!(controller.accept(""), None);
    assert_eq!(controller.accept("   "), None);
    assert_eq!(controller.accept("\t\n"), None);
    assert_eq!(log.len(), 0);
}

// =============================================================
// submit
// =============================================================

#[test]
fn submit_hi_renders_user_then_bot_reply() {
    let log = RecordingLog::default();
    let transport = StubTransport::new(&log, Outcome::Body(r#"{"reply":"Hello!"}"#));
    let controller = ChatController::new(&log, transport);

    assert!(block_on(controller.submit("Hi")));

    assert_eq!(log.lines(), vec!["You: Hi", "Bot: Hello!"]);
    assert!(log.at_bottom());
}

#[test]
fn submit_posts_trimmed_text() {
    let log = RecordingLog::default();
    let controller = ChatController::new(&log, StubTransport::new(&log, Outcome::Reply("ok")));

    block_on(controller.submit("  suggest a project  "));

    let transport = &controller.transport;
    assert_eq!(transport.messages(), vec!["suggest a project"]);
}

#[test]
fn submit_renders_user_message_before_request() {
    let log = RecordingLog::default();
    let controller = ChatController::new(&log, StubTransport::new(&log, Outcome::Reply("hello")));

    block_on(controller.submit("Hi"));

    let sent = controller.transport.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].1, 1, "exactly the user message was in the log when the request went out");
}

#[test]
fn submit_blank_issues_no_request() {
    let log = RecordingLog::default();
    let controller = ChatController::new(&log, StubTransport::new(&log, Outcome::Reply("hello")));

    assert!(!block_on(controller.submit("  ")));

    assert!(controller.transport.messages().is_empty());
    assert_eq!(log.len(), 0);
}

#[test]
fn successful_reply_appends_exactly_one_bot_message() {
    let log = RecordingLog::default();
    let controller = ChatController::new(&log, StubTransport::new(&log, Outcome::Reply("hello")));

    block_on(controller.submit("Hi"));

    let entries = log.entries.borrow();
    let bots: Vec<_> = entries
        .iter()
        .filter(|m| m.sender == Sender::Bot)
        .collect();
    assert_eq!(bots.len(), 1);
    assert_eq!(bots[0].text, "hello");
}

#[test]
fn reply_markup_is_kept_as_text() {
    let log = RecordingLog::default();
    let controller = ChatController::new(&log, StubTransport::new(&log, Outcome::Reply("<img src=x onerror=alert(1)>")));

    block_on(controller.submit("<script>"));

    assert_eq!(log.lines(), vec!["You: <script>", "Bot: <img src=x onerror=alert(1)>"]);
}

// =============================================================
// failures collapse to the fallback reply
// =============================================================

fn assert_fallback(outcome: Outcome) {
    let log = RecordingLog::default();
    let controller = ChatController::new(&log, StubTransport::new(&log, outcome));

    assert!(block_on(controller.submit("Hi")));

    assert_eq!(log.len(), 2);
    let entries = log.entries.borrow();
    assert_eq!(entries[1], ChatMessage::bot(FALLBACK_REPLY));
    assert!(log.at_bottom());
}

#[test]
fn network_failure_renders_fallback() {
    assert_fallback(Outcome::Network);
}

#[test]
fn error_status_renders_fallback() {
    assert_fallback(Outcome::Status(500));
}

#[test]
fn non_json_body_renders_fallback() {
    assert_fallback(Outcome::Body("Internal Server Error"));
}

#[test]
fn body_without_reply_renders_fallback() {
    assert_fallback(Outcome::Body(r#"{"message":"Hi"}"#));
}

// =============================================================
// concurrency
// =============================================================

#[test]
fn replies_render_in_completion_order() {
    let log = RecordingLog::default();
    let (first_tx, first_rx) = oneshot::channel();
    let (second_tx, second_rx) = oneshot::channel();
    let gates = HashMap::from([("first".to_owned(), first_rx), ("second".to_owned(), second_rx)]);
    let controller = ChatController::new(&log, GatedTransport { gates: RefCell::new(gates) });

    let release = async {
        second_tx.send("second reply".to_owned()).unwrap();
        futures::pending!();
        first_tx.send("first reply".to_owned()).unwrap();
    };

    block_on(async {
        futures::join!(controller.submit("first"), controller.submit("second"), release);
    });

    assert_eq!(
        log.lines(),
        vec!["You: first", "You: second", "Bot: second reply", "Bot: first reply"]
    );
    assert!(log.at_bottom());
}

#[test]
fn render_keeps_log_scrolled_after_every_append() {
    let log = RecordingLog::default();
    let controller = ChatController::new(&log, StubTransport::new(&log, Outcome::Reply("ok")));

    for i in 0..5 {
        controller.render(&ChatMessage::bot(format!("line {i}")));
        assert!(log.at_bottom());
        assert_eq!(log.scroll_top.get(), i + 1);
    }
}

//! Chat widget controller: submit handling independent of the DOM.
//!
//! DESIGN
//! ======
//! The controller owns the two collaborators the submit flow touches: a
//! [`MessageLog`] it appends to and a [`ChatTransport`] it posts through.
//! It is built once per page and shared by the submit listener; each submit
//! runs `accept` synchronously and `deliver` as a spawned future.
//!
//! There is no request tracking. Two quick submits leave two requests in
//! flight and their replies are rendered in whichever order they complete.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use crate::message::ChatMessage;
use crate::net::api::{ChatTransport, FALLBACK_REPLY};

/// Append-only sink for rendered chat messages.
pub trait MessageLog {
    /// Append `message` after every existing entry.
    fn append(&self, message: &ChatMessage);

    /// Scroll the log to its bottom edge.
    fn scroll_to_bottom(&self);
}

impl<L: MessageLog + ?Sized> MessageLog for &L {
    fn append(&self, message: &ChatMessage) {
        (**self).append(message);
    }

    fn scroll_to_bottom(&self) {
        (**self).scroll_to_bottom();
    }
}

pub struct ChatController<L, T> {
    log: L,
    transport: T,
}

impl<L: MessageLog, T: ChatTransport> ChatController<L, T> {
    #[must_use]
    pub fn new(log: L, transport: T) -> Self {
        Self { log, transport }
    }

    /// Append `message` to the log and keep the newest entry in view.
    pub fn render(&self, message: &ChatMessage) {
        self.log.append(message);
        self.log.scroll_to_bottom();
    }

    /// Trim raw input and, if anything is left, render it as the user's message.
    ///
    /// Returns the trimmed text to deliver, or `None` when the input was blank
    /// and nothing was rendered.
    pub fn accept(&self, raw: &str) -> Option<String> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        self.render(&ChatMessage::user(text));
        Some(text.to_owned())
    }

    /// Post `text` and render the bot's reply, or the fallback on any failure.
    pub async fn deliver(&self, text: &str) {
        let reply = match self.transport.send(text).await {
            Ok(reply) => reply.reply,
            Err(e) => {
                log::debug!("chat delivery failed: {e}");
                FALLBACK_REPLY.to_owned()
            }
        };
        self.render(&ChatMessage::bot(reply));
    }

    /// Full submit flow: `accept` then `deliver`.
    ///
    /// Returns `true` when a request was issued.
    pub async fn submit(&self, raw: &str) -> bool {
        let Some(text) = self.accept(raw) else {
            return false;
        };
        self.deliver(&text).await;
        true
    }
}

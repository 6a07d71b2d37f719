//! Chat transcript state machine.
//!
//! The transcript owns the ordered message list for the assistant view:
//! user messages, the single typing placeholder, the in-progress reveal
//! target and failed-reply markers. All mutation happens on the UI thread
//! by draining backend events; the backend never touches the list.
//!
//! Reply lifecycle: `begin_reply` (or `begin_retry`) places the typing
//! placeholder and hands out a fresh [`RequestId`]. The backend resolves
//! that request with a started/chunk/done sequence on success or a single
//! failed event on error. Every mutator ignores events carrying any id
//! other than the current one, so a superseded or torn-down request can
//! never write into a reused slot.

use chrono::Local;

/// Monotonic id for one reply request. Id 0 is never handed out.
pub type RequestId = u64;

/// Seed message shown when the chat view opens.
pub const GREETING: &str = "Hi! How can I help you find your next book?";

/// Body of a failed-reply marker; the retry action re-sends the original
/// question carried in `retry_payload`.
pub const REPLY_FAILED: &str = "Something went wrong. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    Typing,
    Error,
}

#[derive(Clone, Debug)]
pub struct ChatMessage {
    pub role: Role,
    pub kind: MessageKind,
    pub content: String,
    /// Wall-clock stamp captured at creation, already formatted.
    pub timestamp: String,
    /// The question that failed; present iff `kind == Error`.
    pub retry_payload: Option<String>,
}

fn time_stamp() -> String {
    Local::now().format("%H:%M").to_string()
}

impl ChatMessage {
    fn user(content: String) -> Self {
        Self {
            role: Role::User,
            kind: MessageKind::Text,
            content,
            timestamp: time_stamp(),
            retry_payload: None,
        }
    }

    fn assistant(content: String) -> Self {
        Self {
            role: Role::Assistant,
            kind: MessageKind::Text,
            content,
            timestamp: time_stamp(),
            retry_payload: None,
        }
    }

    fn typing(timestamp: String) -> Self {
        Self {
            role: Role::Assistant,
            kind: MessageKind::Typing,
            content: String::new(),
            timestamp,
            retry_payload: None,
        }
    }

    fn failed(question: String) -> Self {
        Self {
            role: Role::Assistant,
            kind: MessageKind::Error,
            content: REPLY_FAILED.to_string(),
            timestamp: time_stamp(),
            retry_payload: Some(question),
        }
    }
}

/// Ordered message list plus the in-flight reply bookkeeping.
pub struct Transcript {
    messages: Vec<ChatMessage>,
    in_flight: bool,
    current_request: RequestId,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING.to_string())],
            in_flight: false,
            current_request: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while a reply request is unresolved. The UI refuses to submit,
    /// retry or accept suggestions in this state, which serializes replies.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn current_request(&self) -> RequestId {
        self.current_request
    }

    /// True until the first user interaction; the suggestion buttons are
    /// only offered on a fresh transcript.
    pub fn is_fresh(&self) -> bool {
        self.messages.len() == 1
    }

    /// Append a user message. Returns the trimmed text actually recorded,
    /// or `None` when the input is empty after trimming.
    pub fn push_user(&mut self, text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage::user(trimmed.to_string()));
        Some(trimmed.to_string())
    }

    /// Synchronous prologue of a reply request: drop any leftover typing
    /// placeholder, append a fresh one at the tail and mark in-flight.
    pub fn begin_reply(&mut self) -> RequestId {
        self.remove_typing();
        self.messages.push(ChatMessage::typing(time_stamp()));
        self.in_flight = true;
        self.next_request()
    }

    /// Retry a failed reply: swap the error marker at `index` in place for
    /// a typing placeholder (keeping its position and original timestamp)
    /// and hand back the question to re-send. No second placeholder is
    /// appended; resolution removes this one wherever it sits.
    pub fn begin_retry(&mut self, index: usize) -> Option<(RequestId, String)> {
        let msg = self.messages.get(index)?;
        if msg.kind != MessageKind::Error {
            return None;
        }
        let question = msg.retry_payload.clone()?;
        let stamp = msg.timestamp.clone();
        self.remove_typing();
        // remove_typing never touches Error messages, so `index` still
        // names the marker being replaced.
        self.messages[index] = ChatMessage::typing(stamp);
        self.in_flight = true;
        Some((self.next_request(), question))
    }

    /// The transport answered: drop the placeholder and open an empty
    /// assistant message for the reveal to fill.
    pub fn start_reveal(&mut self, request: RequestId) {
        if self.is_stale(request) {
            return;
        }
        self.remove_typing();
        self.messages.push(ChatMessage::assistant(String::new()));
    }

    /// Publish one reveal prefix into the in-progress assistant message.
    pub fn apply_chunk(&mut self, request: RequestId, prefix: &str) {
        if self.is_stale(request) {
            return;
        }
        if let Some(target) = self.reveal_target() {
            target.content.clear();
            target.content.push_str(prefix);
        }
    }

    /// Final publish: the message content becomes exactly the full reply.
    pub fn complete_reply(&mut self, request: RequestId, full: &str) {
        if self.is_stale(request) {
            return;
        }
        match self.reveal_target() {
            Some(target) => {
                target.content.clear();
                target.content.push_str(full);
            }
            // Reached only if the started event was lost; still record the
            // reply rather than dropping it.
            None => {
                self.remove_typing();
                self.messages.push(ChatMessage::assistant(full.to_string()));
            }
        }
        self.in_flight = false;
    }

    /// The transport failed: drop the placeholder and append an error
    /// marker carrying the original question for retry.
    pub fn fail_reply(&mut self, request: RequestId, question: &str) {
        if self.is_stale(request) {
            return;
        }
        self.remove_typing();
        self.messages.push(ChatMessage::failed(question.to_string()));
        self.in_flight = false;
    }

    /// Tear the transcript down to the greeting. Bumps the request counter
    /// so any event still in flight for the old view is ignored.
    pub fn reset(&mut self) {
        self.messages = vec![ChatMessage::assistant(GREETING.to_string())];
        self.in_flight = false;
        self.current_request += 1;
    }

    fn next_request(&mut self) -> RequestId {
        self.current_request += 1;
        self.current_request
    }

    fn is_stale(&self, request: RequestId) -> bool {
        request != self.current_request
    }

    /// There is at most one typing placeholder; drop it wherever it sits.
    fn remove_typing(&mut self) {
        self.messages.retain(|m| m.kind != MessageKind::Typing);
    }

    fn reveal_target(&mut self) -> Option<&mut ChatMessage> {
        self.messages
            .last_mut()
            .filter(|m| m.role == Role::Assistant && m.kind == MessageKind::Text)
    }
}

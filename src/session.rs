/// ./src/session.rs

const GREETING: &str = "Hello! I'm your personal AI Tutor. How can I help you learn today?";

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

/// One entry in the transcript. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self { role: Role::Model, content: content.into() }
    }
}

/// Chat state for one run of the application: the ordered transcript, the
/// draft the user is typing, and the lifecycle of the single in-flight
/// request. Holds no I/O handles; the caller drives the network half and
/// reports back through [`ChatSession::complete_submission`] or
/// [`ChatSession::fail_submission`].
#[derive(Debug)]
pub struct ChatSession {
    transcript: Vec<Message>,
    pending_input: String,
    awaiting_response: bool,
    last_error: Option<String>,
}

impl ChatSession {
    /// Constructs a new session seeded with the tutor greeting.
    pub fn new() -> Self {
        Self {
            transcript: vec![Message::model(GREETING)],
            pending_input: String::new(),
            awaiting_response: false,
            last_error: None,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn draft(&self) -> &str {
        &self.pending_input
    }

    pub fn is_awaiting(&self) -> bool {
        self.awaiting_response
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replaces the draft unconditionally. No validation.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
    }

    pub fn push_input(&mut self, ch: char) {
        self.pending_input.push(ch);
    }

    pub fn pop_input(&mut self) {
        self.pending_input.pop();
    }

    /// Accepts the current draft as a submission, or rejects it.
    ///
    /// Rejected (returns `None`, state untouched) when the trimmed draft is
    /// empty or a request is already outstanding. Accepted: the user message
    /// is appended, the draft and last error are cleared, the awaiting gate
    /// closes, and the question text is returned for dispatch.
    pub fn begin_submission(&mut self) -> Option<String> {
        if self.awaiting_response {
            return None;
        }
        let question = self.pending_input.trim();
        if question.is_empty() {
            return None;
        }
        let question = question.to_string();
        self.transcript.push(Message::user(question.clone()));
        self.pending_input.clear();
        self.last_error = None;
        self.awaiting_response = true;
        Some(question)
    }

    /// Records a successful answer for the outstanding submission.
    pub fn complete_submission(&mut self, answer: impl Into<String>) {
        self.transcript.push(Message::model(answer));
        self.awaiting_response = false;
    }

    /// Records a failed submission. The user message stays in the transcript
    /// so resubmitting is a manual retype-free retry.
    pub fn fail_submission(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
        self.awaiting_response = false;
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

use tracing::{debug, warn};

use crate::client::Backend;
use crate::errors::TransportError;
use crate::models::{ChatReply, ChatRequest, ThreadId, Turn};

/// Assistant text used when the backend answers without a `response`.
pub const PROCESSING_FALLBACK: &str = "Sorry, I couldn't process that request.";
/// Assistant text used when the backend could not be reached or understood.
pub const CONNECTION_FALLBACK: &str = "Sorry, there was an error connecting to the server.";

/// One visit's conversation with the backend.
///
/// The transcript is append-only. Every accepted submit appends a user turn
/// immediately and exactly one assistant turn once the request settles, so
/// turns always alternate starting with the user. At most one request is in
/// flight; submits made while `pending` is set are dropped.
#[derive(Debug, Clone)]
pub struct ChatSession {
    thread_id: ThreadId,
    transcript: Vec<Turn>,
    pending: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self::with_thread_id(ThreadId::generate())
    }

    pub fn with_thread_id(thread_id: ThreadId) -> Self {
        Self { thread_id, transcript: Vec::new(), pending: false }
    }

    pub fn thread_id(&self) -> &ThreadId {
        &self.thread_id
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// First half of a submit: guards input, records the user turn and marks
    /// the session busy. Returns the request to dispatch, or `None` when the
    /// submit is rejected (blank text or a request already in flight).
    pub fn begin_submit(&mut self, text: &str) -> Option<ChatRequest> {
        // ── Input guard ──────────────────────────────────────────────────────
        if text.trim().is_empty() || self.pending {
            return None;
        }

        // The user turn keeps the text exactly as typed.
        self.transcript.push(Turn::user(text));
        self.pending = true;

        debug!(thread_id = %self.thread_id, "dispatching chat turn");
        Some(ChatRequest {
            message: text.to_string(),
            thread_id: self.thread_id.clone(),
        })
    }

    /// Second half of a submit: appends the assistant turn for the settled
    /// request and clears `pending`. Returns the appended turn.
    pub fn settle(&mut self, outcome: Result<ChatReply, TransportError>) -> Option<&Turn> {
        if !self.pending {
            warn!(thread_id = %self.thread_id, "chat reply arrived with no request pending; ignored");
            return None;
        }

        let content = match outcome {
            Ok(reply) => reply
                .response
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| PROCESSING_FALLBACK.to_string()),
            Err(e) => {
                warn!(thread_id = %self.thread_id, "chat request failed: {e}");
                CONNECTION_FALLBACK.to_string()
            }
        };

        self.transcript.push(Turn::assistant(content));
        self.pending = false;
        self.transcript.last()
    }

    /// Runs a full submit against `backend`. Returns whether the submit was
    /// accepted; a rejected submit leaves the session untouched.
    pub async fn submit<B: Backend>(&mut self, backend: &B, text: &str) -> bool {
        let Some(request) = self.begin_submit(text) else {
            return false;
        };
        let outcome = backend.chat(&request).await;
        self.settle(outcome);
        true
    }
}

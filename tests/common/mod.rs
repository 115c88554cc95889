#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use tax_assist::{
    Backend, ChatReply, ChatRequest, LocalFile, TransportError, UploadBatch, UploadReply,
};

/// In-memory backend that replays scripted outcomes and records every call.
#[derive(Default)]
pub struct ScriptedBackend {
    chat_replies: RefCell<VecDeque<Result<ChatReply, TransportError>>>,
    upload_replies: RefCell<VecDeque<Result<UploadReply, TransportError>>>,
    chat_requests: RefCell<Vec<ChatRequest>>,
    uploads: RefCell<Vec<UploadBatch<LocalFile>>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.chat_outcome(Ok(ChatReply { response: Some(text.to_string()) }))
    }

    pub fn chat_outcome(self, outcome: Result<ChatReply, TransportError>) -> Self {
        self.chat_replies.borrow_mut().push_back(outcome);
        self
    }

    pub fn upload_outcome(self, outcome: Result<UploadReply, TransportError>) -> Self {
        self.upload_replies.borrow_mut().push_back(outcome);
        self
    }

    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        self.chat_requests.borrow().clone()
    }

    pub fn uploads(&self) -> Vec<UploadBatch<LocalFile>> {
        self.uploads.borrow().clone()
    }
}

impl Backend for ScriptedBackend {
    type Payload = LocalFile;

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        self.chat_requests.borrow_mut().push(request.clone());
        self.chat_replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::network("connection refused")))
    }

    async fn upload(&self, batch: &UploadBatch<LocalFile>) -> Result<UploadReply, TransportError> {
        self.uploads.borrow_mut().push(batch.clone());
        self.upload_replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::network("connection refused")))
    }
}

pub fn pdf(name: &str, body: &[u8]) -> LocalFile {
    LocalFile::new(name, body.to_vec())
}

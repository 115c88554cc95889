//! Client core for the tax-compliance assistant: the chat session and the
//! ingestion upload staging area, plus the backend seam they talk through.
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod service;

pub use client::{Backend, Payload};
#[cfg(feature = "native")]
pub use client::http_backend::{HttpBackend, LocalFile};
pub use config::ClientConfig;
pub use errors::{ConfigError, TransportError};
pub use models::{ChatReply, ChatRequest, ErrorBody, Role, ThreadId, Turn, UploadReply};
pub use service::chat_session::ChatSession;
pub use service::upload_staging::{
    StagedFile, UploadBatch, UploadNotice, UploadSettled, UploadStaging,
};

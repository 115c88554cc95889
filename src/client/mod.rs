//! The request seam both state machines await.

#[cfg(feature = "native")]
pub mod http_backend;

use std::future::Future;

use serde::de::DeserializeOwned;

use crate::errors::TransportError;
use crate::models::{ChatReply, ChatRequest, ErrorBody, UploadReply};
use crate::service::upload_staging::UploadBatch;

/// A file handle a host can stage for upload.
pub trait Payload: Clone {
    fn file_name(&self) -> String;
    fn size_bytes(&self) -> u64;
}

/// Backend reachable over `POST /chat` and `POST /upload`.
///
/// Implementations map every failure (refused connection, non-2xx status,
/// unreadable body) onto [`TransportError`] and always resolve.
pub trait Backend {
    type Payload: Payload;

    fn chat(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, TransportError>>;

    fn upload(
        &self,
        batch: &UploadBatch<Self::Payload>,
    ) -> impl Future<Output = Result<UploadReply, TransportError>>;
}

/// Decodes a response body read by a transport. A 2xx body must parse as `T`;
/// any other status becomes [`TransportError::Status`] carrying the body's
/// `detail`, if it has one. Unparsable bodies are [`TransportError::Decode`].
pub fn decode_reply<T: DeserializeOwned>(
    status: u16,
    ok: bool,
    body: &str,
) -> Result<T, TransportError> {
    if !ok {
        let error: ErrorBody = serde_json::from_str(body)
            .map_err(|e| TransportError::decode(format!("Parse error: {e}")))?;
        return Err(TransportError::status(status, error.detail));
    }

    serde_json::from_str(body).map_err(|e| TransportError::decode(format!("Parse error: {e}")))
}

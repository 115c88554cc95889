use std::path::Path;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use tracing::debug;

use crate::client::{decode_reply, Backend, Payload};
use crate::config::ClientConfig;
use crate::errors::TransportError;
use crate::models::{ChatReply, ChatRequest, UploadReply};
use crate::service::upload_staging::UploadBatch;

const PDF_MIME: &str = "application/pdf";

/// A file read from local disk, held in memory until it is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub bytes: Bytes,
}

impl LocalFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self { name: name.into(), bytes: bytes.into() }
    }

    pub async fn read(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }
}

impl Payload for LocalFile {
    fn file_name(&self) -> String {
        self.name.clone()
    }

    fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// [`Backend`] over HTTP using reqwest.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    config: ClientConfig,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TransportError::network(format!("Client setup failed: {e}")))?;
        Ok(Self { client, config: config.clone() })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Backend for HttpBackend {
    type Payload = LocalFile;

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        let resp = self
            .client
            .post(self.config.chat_url())
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::network(format!("Network error: {e}")))?;

        read_reply(resp).await
    }

    async fn upload(&self, batch: &UploadBatch<LocalFile>) -> Result<UploadReply, TransportError> {
        // `files` and `urls` alternate so part i of each belongs together.
        let mut form = Form::new();
        for (file, url) in batch.entries() {
            let part = Part::stream(file.bytes.clone())
                .file_name(file.name.clone())
                .mime_str(PDF_MIME)
                .map_err(|e| TransportError::network(format!("Invalid part: {e}")))?;
            form = form.part("files", part).text("urls", url.to_string());
        }

        debug!(files = batch.len(), url = %self.config.upload_url(), "posting upload form");
        let resp = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError::network(format!("Network error: {e}")))?;

        read_reply(resp).await
    }
}

/// Reads the whole body and hands it to [`decode_reply`].
async fn read_reply<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, TransportError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| TransportError::network(format!("Network error: {e}")))?;

    decode_reply(status.as_u16(), status.is_success(), &body)
}

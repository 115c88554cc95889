use gloo_net::http::{Request, Response};
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use tax_assist::config::DEFAULT_API_BASE;
use tax_assist::client::decode_reply;
use tax_assist::{
    Backend, ChatReply, ChatRequest, Payload, TransportError, UploadBatch, UploadReply,
};

/// Base URL of the backend API server, overridable at build time.
const API_BASE: &str = match option_env!("TAX_ASSIST_API_BASE") {
    Some(base) => base,
    None => DEFAULT_API_BASE,
};

/// A file chosen in the browser's file picker.
#[derive(Clone, Debug)]
pub struct PickedFile(pub File);

impl Payload for PickedFile {
    fn file_name(&self) -> String {
        self.0.name()
    }

    fn size_bytes(&self) -> u64 {
        self.0.size() as u64
    }
}

/// [`Backend`] over the browser's fetch API.
#[derive(Clone, Copy, Debug)]
pub struct GlooBackend {
    api_base: &'static str,
}

impl Default for GlooBackend {
    fn default() -> Self {
        Self { api_base: API_BASE.trim_end_matches('/') }
    }
}

impl Backend for GlooBackend {
    type Payload = PickedFile;

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        let resp = Request::post(&format!("{}/chat", self.api_base))
            .json(request)
            .map_err(|e| TransportError::network(format!("Serialize error: {e}")))?
            .send()
            .await
            .map_err(|e| TransportError::network(format!("Network error: {e}")))?;

        read_reply(resp).await
    }

    async fn upload(&self, batch: &UploadBatch<PickedFile>) -> Result<UploadReply, TransportError> {
        let form = FormData::new().map_err(js_error)?;
        for (file, url) in batch.entries() {
            form.append_with_blob_and_filename("files", &file.0, &file.0.name())
                .map_err(js_error)?;
            form.append_with_str("urls", url).map_err(js_error)?;
        }

        let resp = Request::post(&format!("{}/upload", self.api_base))
            .body(form)
            .map_err(|e| TransportError::network(format!("Request error: {e}")))?
            .send()
            .await
            .map_err(|e| TransportError::network(format!("Network error: {e}")))?;

        read_reply(resp).await
    }
}

async fn read_reply<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, TransportError> {
    let body = resp
        .text()
        .await
        .map_err(|e| TransportError::network(format!("Network error: {e}")))?;

    decode_reply(resp.status(), resp.ok(), &body)
}

fn js_error(value: JsValue) -> TransportError {
    TransportError::network(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

use tracing::{debug, info, warn};

use crate::client::{Backend, Payload};
use crate::errors::TransportError;
use crate::models::UploadReply;

/// Shown when upload is requested with nothing staged.
pub const SELECT_FILES_GUIDANCE: &str = "Please select at least one PDF file.";
/// Used when a successful upload reply carries no message.
pub const UPLOAD_COMPLETE: &str = "Upload complete.";

/// A selected file plus its optional source URL annotation.
///
/// The annotation is opaque text: it is never trimmed or validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile<P> {
    payload: P,
    source_url: String,
}

impl<P> StagedFile<P> {
    pub fn new(payload: P) -> Self {
        Self { payload, source_url: String::new() }
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }
}

impl<P: Payload> StagedFile<P> {
    /// Listing label, e.g. `guide.pdf (12.34 KB)`.
    pub fn label(&self) -> String {
        let kb = self.payload.size_bytes() as f64 / 1024.0;
        format!("{} ({kb:.2} KB)", self.payload.file_name())
    }
}

/// Snapshot of the staged files handed to [`Backend::upload`].
///
/// `payloads()[i]` belongs with `urls()[i]`; both sequences always have the
/// same length and blank annotations keep their slot as `""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBatch<P> {
    payloads: Vec<P>,
    urls: Vec<String>,
}

impl<P: Clone> UploadBatch<P> {
    fn snapshot(files: &[StagedFile<P>]) -> Self {
        let (payloads, urls) = files
            .iter()
            .map(|f| (f.payload.clone(), f.source_url.clone()))
            .unzip();
        Self { payloads, urls }
    }
}

impl<P> UploadBatch<P> {
    pub fn payloads(&self) -> &[P] {
        &self.payloads
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// Payload/annotation pairs in submission order.
    pub fn entries(&self) -> impl Iterator<Item = (&P, &str)> {
        self.payloads.iter().zip(self.urls.iter().map(String::as_str))
    }
}

/// Message shown under the upload control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadNotice {
    Guidance(String),
    Success(String),
    Failure(String),
}

impl UploadNotice {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadNotice::Success(_))
    }
}

impl std::fmt::Display for UploadNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadNotice::Guidance(text) => f.write_str(text),
            UploadNotice::Success(message) => write!(f, "Success! {message}"),
            UploadNotice::Failure(detail) => write!(f, "Error: {detail}"),
        }
    }
}

/// How a settled upload left the staging area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadSettled {
    /// Batch consumed; the host should reset its file picker.
    Accepted,
    /// Batch kept intact for a retry.
    Rejected,
    /// No upload was pending.
    Ignored,
}

/// Files staged for one ingestion batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadStaging<P> {
    files: Vec<StagedFile<P>>,
    pending: bool,
    notice: Option<UploadNotice>,
}

impl<P> Default for UploadStaging<P> {
    fn default() -> Self {
        Self { files: Vec::new(), pending: false, notice: None }
    }
}

impl<P> UploadStaging<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[StagedFile<P>] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn notice(&self) -> Option<&UploadNotice> {
        self.notice.as_ref()
    }

    /// Replaces the whole selection. Annotations from any earlier selection
    /// are discarded.
    pub fn select_files(&mut self, payloads: impl IntoIterator<Item = P>) {
        self.files = payloads.into_iter().map(StagedFile::new).collect();
        self.notice = None;
    }

    /// Overwrites the source URL of the file at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a position in the current selection.
    pub fn set_annotation(&mut self, index: usize, text: impl Into<String>) {
        let staged = self.files.len();
        let Some(file) = self.files.get_mut(index) else {
            panic!("annotation index {index} out of range for {staged} staged file(s)");
        };
        file.source_url = text.into();
    }
}

impl<P: Clone> UploadStaging<P> {
    /// First half of a submit. Returns the batch to send, or `None` when an
    /// upload is already in flight or nothing is staged (the latter leaves a
    /// guidance notice).
    pub fn begin_submit(&mut self) -> Option<UploadBatch<P>> {
        if self.pending {
            return None;
        }
        if self.files.is_empty() {
            self.notice = Some(UploadNotice::Guidance(SELECT_FILES_GUIDANCE.to_string()));
            return None;
        }

        self.pending = true;
        self.notice = None;
        debug!(files = self.files.len(), "dispatching upload batch");
        Some(UploadBatch::snapshot(&self.files))
    }

    /// Second half of a submit. Success consumes the staged files; failure
    /// leaves files and annotations exactly as they were.
    pub fn settle(&mut self, outcome: Result<UploadReply, TransportError>) -> UploadSettled {
        if !self.pending {
            warn!("upload reply arrived with no upload pending; ignored");
            return UploadSettled::Ignored;
        }
        self.pending = false;

        match outcome {
            Ok(reply) => {
                let message = reply.message.unwrap_or_else(|| UPLOAD_COMPLETE.to_string());
                info!(files = self.files.len(), "upload accepted: {message}");
                self.files.clear();
                self.notice = Some(UploadNotice::Success(message));
                UploadSettled::Accepted
            }
            Err(e) => {
                warn!(files = self.files.len(), "upload failed: {e}");
                self.notice = Some(UploadNotice::Failure(e.upload_detail()));
                UploadSettled::Rejected
            }
        }
    }

    /// Runs a full submit against `backend`. Returns `None` when the submit
    /// was rejected before contacting the backend.
    pub async fn submit<B>(&mut self, backend: &B) -> Option<UploadSettled>
    where
        B: Backend<Payload = P>,
        P: Payload,
    {
        let batch = self.begin_submit()?;
        let outcome = backend.upload(&batch).await;
        Some(self.settle(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_texts() {
        assert_eq!(
            UploadNotice::Success("Ingested 3 files".into()).to_string(),
            "Success! Ingested 3 files"
        );
        assert_eq!(UploadNotice::Failure("corrupt pdf".into()).to_string(), "Error: corrupt pdf");
        assert_eq!(
            UploadNotice::Guidance(SELECT_FILES_GUIDANCE.into()).to_string(),
            SELECT_FILES_GUIDANCE
        );
        assert!(UploadNotice::Success(String::new()).is_success());
        assert!(!UploadNotice::Failure(String::new()).is_success());
    }

    #[test]
    fn select_files_discards_earlier_annotations() {
        let mut staging = UploadStaging::new();
        staging.select_files(["a", "b"]);
        staging.set_annotation(0, "http://x");
        staging.select_files(["a"]);
        assert_eq!(staging.files()[0].source_url(), "");
    }

    #[test]
    fn annotation_is_stored_verbatim() {
        let mut staging = UploadStaging::new();
        staging.select_files(["a"]);
        staging.set_annotation(0, "  not a url ");
        assert_eq!(staging.files()[0].source_url(), "  not a url ");
    }

    #[test]
    #[should_panic(expected = "annotation index 2 out of range for 2 staged file(s)")]
    fn out_of_range_annotation_panics() {
        let mut staging = UploadStaging::new();
        staging.select_files(["a", "b"]);
        staging.set_annotation(2, "http://x");
    }

    #[test]
    fn settle_without_pending_is_ignored() {
        let mut staging: UploadStaging<&str> = UploadStaging::new();
        assert_eq!(staging.settle(Ok(UploadReply::default())), UploadSettled::Ignored);
        assert!(staging.notice().is_none());
    }
}

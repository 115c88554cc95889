mod common;

use common::{pdf, ScriptedBackend};
use futures_util::future::join;
use tax_assist::service::upload_staging::SELECT_FILES_GUIDANCE;
use tax_assist::{
    ChatSession, LocalFile, TransportError, UploadNotice, UploadReply, UploadSettled,
    UploadStaging,
};

fn staged_ab() -> UploadStaging<LocalFile> {
    let mut staging = UploadStaging::new();
    staging.select_files([pdf("a.pdf", b"%PDF-a"), pdf("b.pdf", b"%PDF-b")]);
    staging
}

#[tokio::test]
async fn batch_keeps_payloads_and_urls_aligned() {
    let backend = ScriptedBackend::new()
        .upload_outcome(Ok(UploadReply { message: Some("Ingested 2 files".to_string()) }));
    let mut staging = staged_ab();
    staging.set_annotation(1, "http://x");

    let settled = staging.submit(&backend).await;

    assert_eq!(settled, Some(UploadSettled::Accepted));
    let uploads = backend.uploads();
    assert_eq!(uploads.len(), 1);
    let names: Vec<&str> = uploads[0].payloads().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["a.pdf", "b.pdf"]);
    assert_eq!(uploads[0].urls(), ["", "http://x"]);
}

#[tokio::test]
async fn success_consumes_the_batch() {
    let backend = ScriptedBackend::new()
        .upload_outcome(Ok(UploadReply { message: Some("Ingested 12 document splits.".to_string()) }));
    let mut staging = staged_ab();

    staging.submit(&backend).await;

    assert!(staging.is_empty());
    assert!(!staging.is_pending());
    let notice = staging.notice().unwrap();
    assert!(notice.is_success());
    assert_eq!(notice.to_string(), "Success! Ingested 12 document splits.");
}

#[tokio::test]
async fn backend_detail_is_surfaced_and_files_survive() {
    let backend = ScriptedBackend::new()
        .upload_outcome(Err(TransportError::status(500, Some("corrupt pdf".to_string()))));
    let mut staging = staged_ab();
    staging.set_annotation(0, "https://ird.gov.lk/a");
    let before = staging.files().to_vec();

    let settled = staging.submit(&backend).await;

    assert_eq!(settled, Some(UploadSettled::Rejected));
    assert_eq!(staging.files(), before.as_slice());
    assert!(!staging.is_pending());
    let message = staging.notice().unwrap().to_string();
    assert!(message.contains("corrupt pdf"));
    assert!(message.starts_with("Error: "));
}

#[tokio::test]
async fn failed_batch_can_be_retried_without_reselecting() {
    let backend = ScriptedBackend::new()
        .upload_outcome(Err(TransportError::network("connection refused")))
        .upload_outcome(Ok(UploadReply { message: Some("done".to_string()) }));
    let mut staging = staged_ab();

    staging.submit(&backend).await;
    assert_eq!(staging.notice(), Some(&UploadNotice::Failure("connection refused".to_string())));
    staging.set_annotation(0, "http://fixed");

    assert_eq!(staging.submit(&backend).await, Some(UploadSettled::Accepted));
    let uploads = backend.uploads();
    assert_eq!(uploads.len(), 2);
    assert_eq!(uploads[1].urls(), ["http://fixed", ""]);
}

#[tokio::test]
async fn bare_failure_status_uses_generic_text() {
    let backend = ScriptedBackend::new().upload_outcome(Err(TransportError::status(503, None)));
    let mut staging = staged_ab();

    staging.submit(&backend).await;

    assert_eq!(staging.notice().unwrap().to_string(), "Error: Upload failed");
}

#[tokio::test]
async fn empty_selection_shows_guidance_without_request() {
    let backend = ScriptedBackend::new();
    let mut staging: UploadStaging<LocalFile> = UploadStaging::new();
    staging.select_files([]);

    assert_eq!(staging.submit(&backend).await, None);

    assert!(backend.uploads().is_empty());
    assert_eq!(
        staging.notice(),
        Some(&UploadNotice::Guidance(SELECT_FILES_GUIDANCE.to_string()))
    );
    assert!(!staging.is_pending());
}

#[test]
fn selection_keeps_picker_order_with_blank_urls() {
    let staging = staged_ab();

    let names: Vec<&str> = staging.files().iter().map(|f| f.payload().name.as_str()).collect();
    assert_eq!(names, ["a.pdf", "b.pdf"]);
    assert!(staging.files().iter().all(|f| f.source_url().is_empty()));
}

#[test]
fn submit_while_pending_is_rejected() {
    let mut staging = staged_ab();
    assert!(staging.begin_submit().is_some());
    assert!(staging.begin_submit().is_none());
    assert!(staging.is_pending());
    assert!(staging.notice().is_none());
}

#[test]
fn new_selection_clears_previous_notice() {
    let mut staging: UploadStaging<LocalFile> = UploadStaging::new();
    staging.begin_submit();
    assert!(staging.notice().is_some());

    staging.select_files([pdf("c.pdf", b"%PDF-c")]);
    assert!(staging.notice().is_none());
    assert_eq!(staging.files()[0].label(), "c.pdf (0.01 KB)");
}

#[tokio::test]
async fn chat_and_upload_run_independently() {
    let backend = ScriptedBackend::new()
        .reply("Tax rate is 15%.")
        .upload_outcome(Ok(UploadReply { message: None }));
    let mut chat = ChatSession::new();
    let mut staging = staged_ab();

    let (accepted, settled) =
        join(chat.submit(&backend, "What is the VAT rate?"), staging.submit(&backend)).await;

    assert!(accepted);
    assert_eq!(settled, Some(UploadSettled::Accepted));
    assert_eq!(chat.transcript().len(), 2);
    assert_eq!(staging.notice().unwrap().to_string(), "Success! Upload complete.");
}

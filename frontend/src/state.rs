use leptos::prelude::*;
use leptos::task::spawn_local;

use tax_assist::{Backend, ChatSession, UploadSettled, UploadStaging};

use crate::api::{GlooBackend, PickedFile};

/// Which pane is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pane {
    Assistant,
    Admin,
}

/// Shared application state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct AppState {
    pub pane: RwSignal<Pane>,

    pub chat: ReadSignal<ChatSession>,
    pub set_chat: WriteSignal<ChatSession>,

    // `File` handles are not `Send`, so the staging area lives in local storage.
    pub staging: RwSignal<UploadStaging<PickedFile>, LocalStorage>,

    backend: GlooBackend,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    /// A fresh chat thread is started for every page load.
    pub fn provide() -> Self {
        let (chat, set_chat) = signal(ChatSession::new());
        let state = Self {
            pane: RwSignal::new(Pane::Assistant),
            chat,
            set_chat,
            staging: RwSignal::new_local(UploadStaging::new()),
            backend: GlooBackend::default(),
        };

        log::debug!("chat thread {}", state.chat.with_untracked(|c| c.thread_id().to_string()));
        provide_context(state);
        state
    }

    /// Submit a chat turn. Ignored while a turn is in flight or for blank text.
    pub fn send_message(&self, text: String) {
        let mut request = None;
        self.set_chat.update(|chat| request = chat.begin_submit(&text));
        let Some(request) = request else {
            return;
        };

        let backend = self.backend;
        let set_chat = self.set_chat;
        spawn_local(async move {
            let outcome = backend.chat(&request).await;
            if let Err(e) = &outcome {
                log::error!("Chat request failed: {e}");
            }
            set_chat.update(|chat| {
                chat.settle(outcome);
            });
        });
    }

    pub fn select_files(&self, files: Vec<PickedFile>) {
        self.staging.update(|staging| staging.select_files(files));
    }

    pub fn set_source_url(&self, index: usize, url: String) {
        self.staging.update(|staging| staging.set_annotation(index, url));
    }

    /// Upload the staged batch. `on_accepted` runs after a successful upload so
    /// the caller can reset its file picker.
    pub fn upload(&self, on_accepted: impl FnOnce() + 'static) {
        let mut batch = None;
        self.staging.update(|staging| batch = staging.begin_submit());
        let Some(batch) = batch else {
            return;
        };

        let backend = self.backend;
        let staging = self.staging;
        spawn_local(async move {
            let outcome = backend.upload(&batch).await;
            let mut settled = UploadSettled::Ignored;
            staging.update(|staging| settled = staging.settle(outcome));
            if settled == UploadSettled::Accepted {
                on_accepted();
            }
        });
    }
}

use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use tax_assist::StagedFile;

use crate::api::PickedFile;
use crate::state::AppState;

/// Ingestion pane: pick PDFs, annotate each with a source URL, upload.
#[component]
pub fn AdminPanel() -> impl IntoView {
    let state = expect_context::<AppState>();
    let file_input = NodeRef::<html::Input>::new();

    // Labels only change with the selection, so typing a URL does not
    // rebuild the rows (and steal focus from the input being edited).
    let labels = Memo::new(move |_| {
        state.staging.with(|s| s.files().iter().map(StagedFile::label).collect::<Vec<_>>())
    });
    let uploading = move || state.staging.with(|s| s.is_pending());

    let on_change = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(list) = input.files() else {
            return;
        };
        let files = (0..list.length())
            .filter_map(|i| list.get(i))
            .map(PickedFile)
            .collect::<Vec<_>>();
        state.select_files(files);
    };

    let on_upload = move |_| {
        state.upload(move || {
            if let Some(input) = file_input.get_untracked() {
                input.set_value("");
            }
        });
    };

    view! {
        <main class="admin-panel">
            <h1>"Admin Panel"</h1>
            <p>"Upload PDF files for ingestion into the knowledge base"</p>

            <label for="fileInput">"Select PDF Files"</label>
            <input
                id="fileInput"
                node_ref=file_input
                type="file"
                accept=".pdf"
                multiple
                on:change=on_change
            />

            <Show when=move || !labels.get().is_empty()>
                <div class="staged-files">
                    <h3>{move || format!("Selected Files ({}):", labels.get().len())}</h3>
                    {move || {
                        labels
                            .get()
                            .into_iter()
                            .enumerate()
                            .map(|(index, label)| view! { <StagedRow index=index label=label /> })
                            .collect_view()
                    }}
                </div>
            </Show>

            <button class="upload-btn" on:click=on_upload disabled=uploading>
                {move || if uploading() { "Processing..." } else { "Upload and Ingest PDFs" }}
            </button>

            {move || {
                state.staging.with(|s| s.notice().cloned()).map(|notice| {
                    let class = if notice.is_success() { "notice success" } else { "notice error" };
                    view! { <div class=class>{notice.to_string()}</div> }
                })
            }}
        </main>
    }
}

#[component]
fn StagedRow(index: usize, label: String) -> impl IntoView {
    let state = expect_context::<AppState>();
    let url = move || {
        state.staging.with(|s| {
            s.files().get(index).map(|f| f.source_url().to_string()).unwrap_or_default()
        })
    };

    view! {
        <div class="staged-row">
            <div class="file-label">{format!("• {label}")}</div>
            <input
                type="url"
                placeholder="Enter source URL (optional)"
                prop:value=url
                on:input=move |ev| state.set_source_url(index, event_target_value(&ev))
            />
        </div>
    }
}

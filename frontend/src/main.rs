mod api;
mod components;
mod state;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::admin::AdminPanel;
use components::chat::ChatArea;
use components::nav::Nav;
use state::{AppState, Pane};

/// Root application component.
#[component]
fn App() -> impl IntoView {
    let state = AppState::provide();

    view! {
        <div class="app-container">
            <Nav />
            // Both panes stay mounted so an in-flight request can settle into
            // whichever one is hidden.
            <div style:display=move || shown(state.pane.get() == Pane::Assistant)>
                <ChatArea />
            </div>
            <div style:display=move || shown(state.pane.get() == Pane::Admin)>
                <AdminPanel />
            </div>
        </div>
    }
}

fn shown(visible: bool) -> &'static str {
    if visible { "contents" } else { "none" }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}

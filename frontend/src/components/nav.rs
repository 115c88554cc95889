use leptos::prelude::*;

use crate::state::{AppState, Pane};

/// Header with the pane switcher.
#[component]
pub fn Nav() -> impl IntoView {
    let state = expect_context::<AppState>();

    let tab = move |pane: Pane, title: &'static str| {
        view! {
            <button
                class="nav-tab"
                class:active=move || state.pane.get() == pane
                on:click=move |_| state.pane.set(pane)
            >
                {title}
            </button>
        }
    };

    view! {
        <nav class="nav">
            <h2>"IRD Tax Assistant"</h2>
            {tab(Pane::Assistant, "Assistant")}
            {tab(Pane::Admin, "Admin")}
        </nav>
    }
}

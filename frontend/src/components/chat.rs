use leptos::ev;
use leptos::prelude::*;

use tax_assist::{Role, Turn};

use crate::state::AppState;

/// Conversation pane: transcript, typing indicator and input.
#[component]
pub fn ChatArea() -> impl IntoView {
    let state = expect_context::<AppState>();
    let has_turns = Memo::new(move |_| state.chat.with(|c| !c.transcript().is_empty()));

    view! {
        <main class="chat-area">
            <div class="messages-container">
                <Show when=move || has_turns.get() fallback=|| view! { <Welcome /> }>
                    // Turns never change once appended, so the index is a stable key.
                    <For
                        each=move || state.chat.with(|c| {
                            c.transcript().iter().cloned().enumerate().collect::<Vec<_>>()
                        })
                        key=|(i, _)| *i
                        let:entry
                    >
                        <MessageBubble turn={entry.1} />
                    </For>
                    <Show when=move || state.chat.with(|c| c.is_pending())>
                        <div class="message assistant typing">
                            <span class="dot"></span>
                            <span class="dot"></span>
                            <span class="dot"></span>
                        </div>
                    </Show>
                </Show>
            </div>

            <ChatInput />
        </main>
    }
}

#[component]
fn Welcome() -> impl IntoView {
    view! {
        <div class="empty-state">
            <h1>"Intelligent Sri Lanka IRD"</h1>
            <h2>"Tax Intelligence & Compliance Assistant"</h2>
            <p>"Ask me anything about Sri Lankan tax regulations and compliance"</p>
        </div>
    }
}

#[component]
fn MessageBubble(turn: Turn) -> impl IntoView {
    let css_class = match turn.role {
        Role::User => "message user",
        Role::Assistant => "message assistant",
    };

    view! {
        <div class=css_class>
            <div class="role-label">{turn.role.as_str()}</div>
            <div class="content">{turn.content}</div>
        </div>
    }
}

/// Chat input form with textarea and send button.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (input, set_input) = signal(String::new());

    let is_sending = move || state.chat.with(|c| c.is_pending());

    let send = move || {
        let text = input.get_untracked();
        if text.trim().is_empty() || is_sending() {
            return;
        }
        set_input.set(String::new());
        state.send_message(text);
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send();
        }
    };

    view! {
        <div class="input-area">
            <div class="input-row">
                <textarea
                    rows="1"
                    placeholder="Ask about tax regulations..."
                    prop:value=input
                    on:input=move |ev| {
                        set_input.set(event_target_value(&ev));
                    }
                    on:keydown=on_keydown
                    disabled=is_sending
                />
                <button
                    class="send-btn"
                    on:click=move |_| send()
                    disabled=move || is_sending() || input.get().trim().is_empty()
                >
                    "Send"
                </button>
            </div>
        </div>
    }
}

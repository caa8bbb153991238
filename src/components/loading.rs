//! Loading Component
//!
//! Loading spinner and the failed-fetch panel.

use leptos::*;

use crate::state::fetch;
use crate::state::global::GlobalState;

/// Full-page loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="centered">
            <div class="loading-spinner" />
        </div>
    }
}

/// Failed-fetch panel with a retry affordance
#[component]
pub fn ErrorPanel(#[prop(into)] message: String) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let on_retry = move |_| fetch::retry(state.clone());

    view! {
        <div class="centered error-panel">
            <p class="error-message">{format!("Failed to load data: {}", message)}</p>
            <button id="retry-button" on:click=on_retry>
                "Retry"
            </button>
        </div>
    }
}

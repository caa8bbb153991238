//! Raw Data Panel
//!
//! Renders the fetched dataset as serialized JSON, toggled from the sidebar.

use leptos::*;

use crate::state::global::{FetchState, GlobalState};

/// Serialized-dataset panel
#[component]
pub fn RawDataPanel() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let show_raw = state.show_raw;
    let fetch = state.fetch;

    view! {
        {move || {
            if !show_raw.get() {
                return view! {}.into_view();
            }

            match fetch.get() {
                FetchState::Ready(dataset) => {
                    let text = serde_json::to_string(&dataset).unwrap_or_default();
                    view! {
                        <div id="rawData">
                            <code>{text}</code>
                        </div>
                    }
                    .into_view()
                }
                _ => view! {}.into_view(),
            }
        }}
    }
}

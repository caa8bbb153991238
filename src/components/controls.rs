//! Sidebar Controls
//!
//! Raw-data toggle, CSV download, delete-all, date-range pickers and the
//! theme switch.

use leptos::*;

use crate::api;
use crate::export;
use crate::state::fetch::spawn_fetch;
use crate::state::global::{FetchState, GlobalState, Theme};

const DELETE_PROMPT: &str = "Delete all stored test data? This cannot be undone.";

/// Sidebar with the dashboard controls
#[component]
pub fn Sidebar() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let show_raw = state.show_raw;
    let fetch = state.fetch;

    let state_for_download = state.clone();
    let on_download = move |_| {
        match state_for_download.fetch.get_untracked() {
            FetchState::Ready(dataset) => export::download_csv(&dataset),
            _ => state_for_download.show_error("No data loaded yet"),
        }
    };

    let state_for_delete = state.clone();
    let on_delete = move |_| {
        let confirmed = window()
            .confirm_with_message(DELETE_PROMPT)
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let state = state_for_delete.clone();
        spawn_local(async move {
            match api::delete_data().await {
                Ok(()) => {
                    state.show_success("All data deleted");
                    // The local dataset is left untouched unless configured
                    // to refetch; otherwise only a later fetch reflects the
                    // deletion.
                    if state.refresh_after_delete {
                        match state.range_untracked() {
                            Ok(range) => spawn_fetch(state.clone(), range),
                            Err(err) => state.show_error(&err.to_string()),
                        }
                    }
                }
                Err(err) => {
                    state.show_error(&format!("Delete failed: {}", err));
                }
            }
        });
    };

    view! {
        <ul class="sidenav">
            <li>
                <button id="display-button" on:click=move |_| show_raw.update(|v| *v = !*v)>
                    {move || if show_raw.get() { "Hide raw data" } else { "Show raw data" }}
                </button>
            </li>
            <li>
                <button
                    id="download-button"
                    on:click=on_download
                    disabled=move || fetch.with(|f| f.dataset().is_none())
                >
                    "Download CSV"
                </button>
            </li>
            <li>
                <button id="delete-button" on:click=on_delete>
                    "Delete all data"
                </button>
            </li>
            <li>
                <DateTimePicker label="Date min." value=state.date_from />
            </li>
            <li>
                <DateTimePicker label="Date max." value=state.date_to />
            </li>
        </ul>
        <ul class="sidenav bottomed">
            <ThemeToggle />
        </ul>
    }
}

/// One boundary of the date range, with date+time granularity
#[component]
fn DateTimePicker(label: &'static str, value: RwSignal<i64>) -> impl IntoView {
    view! {
        <label class="picker-label">
            {label}
            <br />
            <input
                type="datetime-local"
                prop:value=move || format_picker_value(value.get())
                on:input=move |ev| {
                    if let Some(millis) = parse_picker_value(&event_target_value(&ev)) {
                        value.set(millis);
                    }
                }
            />
        </label>
    }
}

/// Dark/light switch, moon on one side, sun on the other
#[component]
fn ThemeToggle() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let theme = state.theme;

    view! {
        <li class="theme-row">
            <span role="img" aria-label="moon">"🌜"</span>
            <label class="switch">
                <input
                    type="checkbox"
                    prop:checked=move || theme.get() == Theme::Light
                    on:change=move |_| theme.update(|t| *t = t.toggled())
                />
                <span class="slider round" />
            </label>
            <span role="img" aria-label="sun">"🌞"</span>
        </li>
    }
}

/// Epoch millis → `datetime-local` input value
fn format_picker_value(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
        .unwrap_or_default()
}

/// `datetime-local` input value → epoch millis
fn parse_picker_value(raw: &str) -> Option<i64> {
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|dt| dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picker_value_round_trip() {
        let millis = parse_picker_value("2020-01-01T00:00").unwrap();
        assert_eq!(millis, 1_577_836_800_000);
        assert_eq!(format_picker_value(millis), "2020-01-01T00:00");
    }

    #[test]
    fn test_picker_rejects_partial_input() {
        assert_eq!(parse_picker_value(""), None);
        assert_eq!(parse_picker_value("2020-01-01"), None);
        assert_eq!(parse_picker_value("not a date"), None);
    }

    #[test]
    fn test_picker_keeps_minute_granularity() {
        let millis = parse_picker_value("2021-06-15T13:37").unwrap();
        assert_eq!(format_picker_value(millis), "2021-06-15T13:37");
    }
}

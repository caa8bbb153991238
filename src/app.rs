//! App Root Component
//!
//! Owns the date-range-driven fetch loop and lays out the dashboard.

use leptos::*;

use crate::components::{ErrorPanel, LineChart, Loading, RawDataPanel, Sidebar, Toast};
use crate::projection;
use crate::state::fetch::{spawn_fetch, Debouncer, FETCH_DEBOUNCE_MS};
use crate::state::global::{provide_global_state, DateRange, FetchState, GlobalState};

/// Whether a confirmed delete immediately refetches the (now empty) range.
/// Off by default: only a later fetch reflects the deletion.
const REFRESH_AFTER_DELETE: bool = false;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state(REFRESH_AFTER_DELETE);
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Range-driven fetching: this effect runs on mount and again whenever
    // either boundary changes, so a burst of picker edits collapses into
    // one trailing fetch carrying the latest pair.
    let state_for_fetch = state.clone();
    let debouncer = Debouncer::new(FETCH_DEBOUNCE_MS, move |range| {
        spawn_fetch(state_for_fetch.clone(), range);
    });

    let state_for_effect = state.clone();
    create_effect(move |_| {
        let from = state_for_effect.date_from.get();
        let to = state_for_effect.date_to.get();

        match DateRange::try_new(from, to) {
            Ok(range) => debouncer.call(range),
            Err(err) => state_for_effect.show_error(&err.to_string()),
        }
    });

    let theme = state.theme;

    view! {
        <div
            class="app"
            style=move || {
                let theme = theme.get();
                format!(
                    "background-color: {}; color: {}",
                    theme.background(),
                    theme.text_color()
                )
            }
        >
            <Sidebar />
            <Content />
            <Toast />
        </div>
    }
}

/// Main content area: spinner, error panel or the charts
#[component]
fn Content() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let fetch = state.fetch;

    // Chart projections are recomputed from the dataset on demand,
    // never cached
    let request_chart = Signal::derive(move || {
        fetch.with(|f| f.dataset().map(projection::request_times).unwrap_or_default())
    });
    let db_times_chart = Signal::derive(move || {
        fetch.with(|f| {
            f.dataset()
                .map(projection::db_operation_times)
                .unwrap_or_default()
        })
    });
    let db_counts_chart = Signal::derive(move || {
        fetch.with(|f| {
            f.dataset()
                .map(projection::db_operation_counts)
                .unwrap_or_default()
        })
    });

    view! {
        <div class="content">
            {move || match fetch.get() {
                FetchState::Loading => view! { <Loading /> }.into_view(),
                FetchState::Failed(reason) => view! { <ErrorPanel message=reason /> }.into_view(),
                FetchState::Ready(dataset) => view! {
                    <div class="main chart-wrapper">
                        <LineChart title="Request processing time" data=request_chart />
                    </div>
                    <div class="main chart-wrapper">
                        <LineChart title="Database operation times" data=db_times_chart />
                    </div>
                    <div class="main chart-wrapper">
                        <LineChart title="Database operation counts" data=db_counts_chart />
                    </div>
                    <div class="entry-count">
                        {format!("Entries: {}", dataset.graphs.len())}
                    </div>
                    <RawDataPanel />
                }
                .into_view(),
            }}
        </div>
    }
}

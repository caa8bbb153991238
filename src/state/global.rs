//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;
use std::cell::Cell;
use std::rc::Rc;

use crate::api::FetchError;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Lower bound of the queried date range (epoch millis)
    pub date_from: RwSignal<i64>,
    /// Upper bound of the queried date range (epoch millis)
    pub date_to: RwSignal<i64>,
    /// Dataset fetch state driving the main view
    pub fetch: RwSignal<FetchState>,
    /// Current color theme
    pub theme: RwSignal<Theme>,
    /// Whether the raw-data panel is visible
    pub show_raw: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
    /// Whether a confirmed delete immediately refetches the current range
    pub refresh_after_delete: bool,
    /// Generation of the most recently issued fetch; stale responses are
    /// discarded by comparing against this
    generation: Rc<Cell<u64>>,
}

/// One time-stamped record of timing/count metrics for a single test run.
///
/// Field names follow the service wire format (camelCase JSON).
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphPoint {
    pub test_start_time: String,
    pub req_time: f64,
    pub backend_time: f64,
    pub db_selects_time: f64,
    pub db_updates_time: f64,
    pub db_inserts_time: f64,
    pub db_deletes_time: f64,
    pub db_selects_quantity: f64,
    pub db_updates_quantity: f64,
    pub db_inserts_quantity: f64,
    pub db_deletes_quantity: f64,
}

/// The full collection of test-run metric points returned by one API call.
///
/// Immutable once received; replaced wholesale on each successful fetch.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Dataset {
    pub graphs: Vec<GraphPoint>,
}

/// Date range for queries, in epoch milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub from: i64,
    pub to: i64,
}

/// A range whose lower bound lies after its upper bound
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date range: the minimum date is after the maximum date")]
pub struct RangeError;

impl DateRange {
    /// Build a range, rejecting `from > to`
    pub fn try_new(from: i64, to: i64) -> Result<Self, RangeError> {
        if from > to {
            return Err(RangeError);
        }
        Ok(Self { from, to })
    }

    /// Default range shown on startup: 2020-01-01 UTC until now
    pub fn default_range() -> Self {
        let from = chrono::NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis();
        let to = chrono::Utc::now().timestamp_millis();
        Self { from, to }
    }
}

/// Dataset fetch state machine
#[derive(Clone, Debug, PartialEq)]
pub enum FetchState {
    /// No dataset yet; the initial fetch is pending
    Loading,
    /// A dataset is present; refetches swap it in place
    Ready(Dataset),
    /// The last fetch failed; retry re-enters `Loading`
    Failed(String),
}

impl FetchState {
    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            FetchState::Ready(dataset) => Some(dataset),
            _ => None,
        }
    }
}

/// Color theme token, passed declaratively to all rendering consumers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Page background color
    pub fn background(self) -> &'static str {
        match self {
            Theme::Dark => "#282c34",
            Theme::Light => "#ffffff",
        }
    }

    /// Primary text color, also used for chart titles and axis values
    pub fn text_color(self) -> &'static str {
        match self {
            Theme::Dark => "#ffffff",
            Theme::Light => "#000000",
        }
    }

    /// Chart panel background color
    pub fn panel_background(self) -> &'static str {
        match self {
            Theme::Dark => "#1f2937",
            Theme::Light => "#f3f4f6",
        }
    }

    /// Chart grid line color
    pub fn grid_color(self) -> &'static str {
        match self {
            Theme::Dark => "#374151",
            Theme::Light => "#d1d5db",
        }
    }

    /// Secondary text color for axis labels
    pub fn muted_text(self) -> &'static str {
        match self {
            Theme::Dark => "#9ca3af",
            Theme::Light => "#4b5563",
        }
    }
}

/// Provide global state to the component tree
pub fn provide_global_state(refresh_after_delete: bool) {
    provide_context(GlobalState::new(refresh_after_delete));
}

impl GlobalState {
    pub fn new(refresh_after_delete: bool) -> Self {
        let range = DateRange::default_range();
        Self {
            date_from: create_rw_signal(range.from),
            date_to: create_rw_signal(range.to),
            fetch: create_rw_signal(FetchState::Loading),
            theme: create_rw_signal(Theme::default()),
            show_raw: create_rw_signal(false),
            error: create_rw_signal(None),
            success: create_rw_signal(None),
            refresh_after_delete,
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Current range without subscribing to the signals
    pub fn range_untracked(&self) -> Result<DateRange, RangeError> {
        DateRange::try_new(
            self.date_from.get_untracked(),
            self.date_to.get_untracked(),
        )
    }

    /// Register a new fetch and return its generation tag
    pub fn begin_fetch(&self) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        generation
    }

    /// Store a fetched dataset, unless a newer fetch has been issued since.
    ///
    /// `Loading`, `Ready` and `Failed` all transition to `Ready`; in `Ready`
    /// this is a pure data swap.
    pub fn apply_fetch_success(&self, generation: u64, dataset: Dataset) {
        if generation != self.generation.get() {
            // Stale response; the newer request owns the state.
            return;
        }
        self.fetch.set(FetchState::Ready(dataset));
    }

    /// Record a failed fetch, unless a newer fetch has been issued since
    pub fn apply_fetch_failure(&self, generation: u64, err: &FetchError) {
        if generation != self.generation.get() {
            return;
        }
        self.fetch.set(FetchState::Failed(err.to_string()));
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range_starts_2020() {
        let range = DateRange::default_range();
        // 2020-01-01T00:00:00Z
        assert_eq!(range.from, 1_577_836_800_000);
        assert!(range.to >= range.from);
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        assert_eq!(DateRange::try_new(10, 5), Err(RangeError));
        assert!(DateRange::try_new(5, 10).is_ok());
        assert!(DateRange::try_new(5, 5).is_ok());
    }

    #[test]
    fn test_theme_toggle_flips_tokens() {
        let dark = Theme::default();
        let light = dark.toggled();
        assert_eq!(dark, Theme::Dark);
        assert_eq!(light, Theme::Light);
        assert_eq!(light.toggled(), dark);
        assert_ne!(dark.background(), light.background());
        assert_ne!(dark.text_color(), light.text_color());
    }

    #[test]
    fn test_graph_point_wire_format() {
        let json = r#"{
            "graphs": [{
                "testStartTime": "2020-03-01 12:00:00",
                "reqTime": 5.0,
                "backendTime": 3.0,
                "dbSelectsTime": 1.0,
                "dbUpdatesTime": 2.0,
                "dbInsertsTime": 3.0,
                "dbDeletesTime": 4.0,
                "dbSelectsQuantity": 10.0,
                "dbUpdatesQuantity": 20.0,
                "dbInsertsQuantity": 30.0,
                "dbDeletesQuantity": 40.0
            }]
        }"#;

        let dataset: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.graphs.len(), 1);
        let point = &dataset.graphs[0];
        assert_eq!(point.test_start_time, "2020-03-01 12:00:00");
        assert_eq!(point.req_time, 5.0);
        assert_eq!(point.db_deletes_quantity, 40.0);

        // Serialization round-trips through the same camelCase names
        let serialized = serde_json::to_string(&dataset).unwrap();
        assert!(serialized.contains("\"testStartTime\""));
        assert!(serialized.contains("\"dbSelectsQuantity\""));
    }

    #[test]
    fn test_stale_fetch_results_are_discarded() {
        let runtime = create_runtime();

        let state = GlobalState::new(false);
        assert_eq!(state.fetch.get_untracked(), FetchState::Loading);

        let first = state.begin_fetch();
        let second = state.begin_fetch();

        // The older fetch resolves last-known-first; it must not win.
        state.apply_fetch_success(
            first,
            Dataset {
                graphs: vec![GraphPoint::default()],
            },
        );
        assert_eq!(state.fetch.get_untracked(), FetchState::Loading);

        state.apply_fetch_success(second, Dataset::default());
        assert_eq!(
            state.fetch.get_untracked(),
            FetchState::Ready(Dataset::default())
        );

        // A stale failure is ignored the same way.
        state.apply_fetch_failure(first, &FetchError::Server { status: 500 });
        assert_eq!(
            state.fetch.get_untracked(),
            FetchState::Ready(Dataset::default())
        );

        runtime.dispose();
    }

    #[test]
    fn test_latest_failure_enters_failed_state() {
        let runtime = create_runtime();

        let state = GlobalState::new(false);
        let generation = state.begin_fetch();
        state.apply_fetch_failure(generation, &FetchError::Network("timeout".to_string()));

        match state.fetch.get_untracked() {
            FetchState::Failed(reason) => assert!(reason.contains("timeout")),
            other => panic!("expected Failed, got {:?}", other),
        }

        runtime.dispose();
    }

    #[test]
    fn test_theme_toggle_leaves_data_untouched() {
        let runtime = create_runtime();

        let state = GlobalState::new(false);
        let generation = state.begin_fetch();
        let dataset = Dataset {
            graphs: vec![GraphPoint::default()],
        };
        state.apply_fetch_success(generation, dataset.clone());
        let range_before = state.range_untracked();

        state.theme.update(|t| *t = t.toggled());

        assert_eq!(state.theme.get_untracked(), Theme::Light);
        assert_eq!(state.fetch.get_untracked(), FetchState::Ready(dataset));
        assert_eq!(state.range_untracked(), range_before);

        runtime.dispose();
    }
}

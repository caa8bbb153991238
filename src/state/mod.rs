//! State Management
//!
//! Global application state and fetch orchestration.

pub mod fetch;
pub mod global;

pub use fetch::{retry, spawn_fetch, Debouncer, FETCH_DEBOUNCE_MS};
pub use global::{provide_global_state, DateRange, Dataset, FetchState, GlobalState, GraphPoint, Theme};

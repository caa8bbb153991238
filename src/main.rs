//! PerfDash
//!
//! Performance-test metrics dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Line charts for request, backend and database timings
//! - Date-range filtering with debounced refetching
//! - CSV export and raw-data inspection
//! - Light/dark theme toggle
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It is a thin presentation layer over the metrics HTTP API:
//! the dashboard owns the date range, fetches the dataset for it, and
//! projects the result into chart-ready series.

use leptos::*;

mod api;
mod app;
mod components;
mod export;
mod projection;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}

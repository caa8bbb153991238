//! API Client
//!
//! Communication with the remote metrics data service.

pub mod client;

pub use client::{delete_data, get_api_base, get_chart_data, FetchError};

//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod chart;
pub mod controls;
pub mod loading;
pub mod raw_data;
pub mod toast;

pub use chart::LineChart;
pub use controls::Sidebar;
pub use loading::{ErrorPanel, Loading};
pub use raw_data::RawDataPanel;
pub use toast::Toast;

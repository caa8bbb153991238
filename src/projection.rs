//! View-Model Projection
//!
//! Pure derivation of chart-ready series from a fetched dataset. Nothing
//! here is cached: the render pass recomputes these on demand, and the
//! original order of `graphs` is preserved as returned by the service.

use crate::state::global::{Dataset, GraphPoint};

/// One named series of values, index-aligned to the chart labels
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSeries {
    pub name: &'static str,
    pub values: Vec<f64>,
}

/// Labels plus the series drawn over them
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartData {
    /// X-axis labels: each point's start time, in original order
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn project(dataset: &Dataset, metrics: &[(&'static str, fn(&GraphPoint) -> f64)]) -> ChartData {
    let labels = dataset
        .graphs
        .iter()
        .map(|point| point.test_start_time.clone())
        .collect();

    let series = metrics
        .iter()
        .map(|&(name, field)| ChartSeries {
            name,
            values: dataset.graphs.iter().map(field).collect(),
        })
        .collect();

    ChartData { labels, series }
}

/// Total and backend-controller request processing times
pub fn request_times(dataset: &Dataset) -> ChartData {
    project(
        dataset,
        &[
            ("Total", |p| p.req_time),
            ("Backend controller", |p| p.backend_time),
        ],
    )
}

/// Processing times of the four database operation kinds
pub fn db_operation_times(dataset: &Dataset) -> ChartData {
    project(
        dataset,
        &[
            ("Selects", |p| p.db_selects_time),
            ("Updates", |p| p.db_updates_time),
            ("Inserts", |p| p.db_inserts_time),
            ("Deletes", |p| p.db_deletes_time),
        ],
    )
}

/// Counts of the four database operation kinds
pub fn db_operation_counts(dataset: &Dataset) -> ChartData {
    project(
        dataset,
        &[
            ("Selects", |p| p.db_selects_quantity),
            ("Updates", |p| p.db_updates_quantity),
            ("Inserts", |p| p.db_inserts_quantity),
            ("Deletes", |p| p.db_deletes_quantity),
        ],
    )
}

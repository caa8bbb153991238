//! CSV Export
//!
//! Builds a semicolon-separated CSV from the current dataset and hands it
//! to the browser as a file download.

use wasm_bindgen::JsCast;

use crate::state::global::Dataset;

/// Fixed download filename
pub const EXPORT_FILENAME: &str = "metrics.csv";

const SEPARATOR: &str = ";";

const HEADER: [&str; 11] = [
    "testStartTime",
    "reqTime",
    "backendTime",
    "dbSelectsTime",
    "dbUpdatesTime",
    "dbInsertsTime",
    "dbDeletesTime",
    "dbSelectsQuantity",
    "dbUpdatesQuantity",
    "dbInsertsQuantity",
    "dbDeletesQuantity",
];

/// Render the dataset as semicolon-separated CSV, one row per test run
pub fn to_csv(dataset: &Dataset) -> String {
    let mut out = HEADER.join(SEPARATOR);
    out.push('\n');

    for point in &dataset.graphs {
        let fields = [
            point.test_start_time.clone(),
            point.req_time.to_string(),
            point.backend_time.to_string(),
            point.db_selects_time.to_string(),
            point.db_updates_time.to_string(),
            point.db_inserts_time.to_string(),
            point.db_deletes_time.to_string(),
            point.db_selects_quantity.to_string(),
            point.db_updates_quantity.to_string(),
            point.db_inserts_quantity.to_string(),
            point.db_deletes_quantity.to_string(),
        ];
        out.push_str(&fields.join(SEPARATOR));
        out.push('\n');
    }

    out
}

/// Trigger a browser download of the dataset as CSV
pub fn download_csv(dataset: &Dataset) {
    let csv = to_csv(dataset);

    if let Some(window) = web_sys::window() {
        let blob = web_sys::Blob::new_with_str_sequence(&js_sys::Array::of1(&csv.into())).ok();

        if let Some(blob) = blob {
            let url = web_sys::Url::create_object_url_with_blob(&blob).ok();
            if let Some(url) = url {
                let document = window.document().unwrap();
                let a = document.create_element("a").unwrap();
                let _ = a.set_attribute("href", &url);
                let _ = a.set_attribute("download", EXPORT_FILENAME);
                let _ = a.dyn_ref::<web_sys::HtmlElement>().unwrap().click();
                let _ = web_sys::Url::revoke_object_url(&url);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::global::GraphPoint;

    #[test]
    fn test_empty_dataset_yields_header_only() {
        let csv = to_csv(&Dataset::default());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("testStartTime;reqTime;backendTime;"));
        assert_eq!(lines[0].matches(';').count(), 10);
    }

    #[test]
    fn test_one_row_per_point() {
        let dataset = Dataset {
            graphs: vec![
                GraphPoint {
                    test_start_time: "2020-03-01 12:00:00".to_string(),
                    req_time: 5.5,
                    backend_time: 3.0,
                    ..Default::default()
                },
                GraphPoint {
                    test_start_time: "2020-03-01 13:00:00".to_string(),
                    req_time: 7.0,
                    backend_time: 2.0,
                    ..Default::default()
                },
            ],
        };

        let csv = to_csv(&dataset);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("2020-03-01 12:00:00;5.5;3;"));
        assert!(lines[2].starts_with("2020-03-01 13:00:00;7;2;"));
        for line in &lines[1..] {
            assert_eq!(line.matches(';').count(), 10);
        }
    }
}

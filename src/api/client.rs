//! HTTP API Client
//!
//! Functions for communicating with the metrics data service.

use gloo_net::http::Request;

use crate::state::global::Dataset;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("perfdash_api_url") {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Failure modes of the data service boundary.
///
/// The client performs no retries; callers decide how a failure surfaces.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never reached the server.
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("server error: status {status}")]
    Server { status: u16 },
    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Serialization(String),
}

/// Fetch the dataset of test runs whose start time falls in `[from, to]`.
///
/// Both bounds are epoch milliseconds.
pub async fn get_chart_data(from: i64, to: i64) -> Result<Dataset, FetchError> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/data?from={}&to={}", api_base, from, to))
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(FetchError::Server {
            status: response.status(),
        });
    }

    response
        .json()
        .await
        .map_err(|e| FetchError::Serialization(e.to_string()))
}

/// Delete every stored test run.
///
/// The side effect is server-side and irreversible; callers must obtain
/// explicit user confirmation before invoking this.
pub async fn delete_data() -> Result<(), FetchError> {
    let api_base = get_api_base();

    let response = Request::delete(&format!("{}/data", api_base))
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(FetchError::Server {
            status: response.status(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");

        let err = FetchError::Server { status: 503 };
        assert_eq!(err.to_string(), "server error: status 503");

        let err = FetchError::Serialization("missing field `graphs`".to_string());
        assert_eq!(err.to_string(), "malformed response: missing field `graphs`");
    }
}

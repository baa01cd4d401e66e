//! HTTP transport helpers shared by every verb.

use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ApiError;

/// Build an HTTP client with timeout applied.
pub(super) fn build_http_client(timeout: Duration) -> reqwest::Client {
    // Fall back to reqwest defaults if builder creation fails for any reason.
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Join a backend path onto the base URL without doubling slashes.
pub(super) fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Decode a 2xx body, treating an empty body (e.g. 204) as JSON `null`.
pub(super) async fn decode_body<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let text = response.text().await?;
    let payload = if text.trim().is_empty() {
        "null"
    } else {
        text.as_str()
    };
    serde_json::from_str(payload).map_err(|err| ApiError::InvalidResponse(err.to_string()))
}

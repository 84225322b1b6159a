use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::UpstreamError;

/// Sends `request` and decodes a 2xx JSON body into `T`.
///
/// `endpoint` is a short label used in logs and errors in place of the URL.
pub async fn fetch_json<T>(
    request: RequestBuilder,
    endpoint: &'static str,
) -> Result<T, UpstreamError>
where
    T: DeserializeOwned,
{
    let response = request.send().await.map_err(|e| {
        warn!("{endpoint} unreachable");
        UpstreamError::transport(endpoint, e)
    })?;

    let status = response.status();
    debug!("{endpoint} responded {status}");

    if !status.is_success() {
        warn!("{endpoint} returned HTTP {status}");
        return Err(UpstreamError::Status { endpoint, status });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| UpstreamError::decode(endpoint, e))
}

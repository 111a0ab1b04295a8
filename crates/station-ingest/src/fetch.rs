//! Download of the latest temperature feed.

use std::time::Duration;

use crate::error::{IngestError, Result};

/// Public data.gov.hk endpoint for the latest regional 1-minute readings.
pub const DEFAULT_FEED_URL: &str =
    "https://data.weather.gov.hk/weatherAPI/hko_data/regional-weather/latest_1min_temperature.csv";

/// Default request timeout. The fetch is the only wall-clock-bound step in
/// the pipeline, so it is the only place carrying a timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch the feed body as text.
pub async fn fetch_feed(url: &str, timeout: Duration) -> Result<String> {
    tracing::info!(url, timeout_secs = timeout.as_secs(), "fetching temperature feed");

    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(IngestError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    tracing::debug!(bytes = body.len(), "feed downloaded");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_is_http_error() {
        let err = tokio_test::block_on(fetch_feed("not a url", DEFAULT_TIMEOUT)).unwrap_err();
        assert!(matches!(err, IngestError::Http(_)));
    }
}

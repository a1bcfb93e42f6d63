use crate::error::{AnalyzeError, Result};
use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Checks that `raw` is an absolute http(s) URL with a host.
pub fn validate_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AnalyzeError::InvalidUrl("empty URL".to_string()));
    }

    let url = Url::parse(raw).map_err(|e| AnalyzeError::InvalidUrl(format!("{}: {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AnalyzeError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            raw,
            url.scheme()
        )));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(AnalyzeError::InvalidUrl(format!("{}: missing host", raw)));
    }

    Ok(url)
}

/// Fetches the page body, rejecting anything that is not a 200 HTML response.
pub async fn fetch_page(client: &Client, url: &Url, timeout: Duration) -> Result<Vec<u8>> {
    debug!("Fetching {}", url);

    let response = client.get(url.clone()).timeout(timeout).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        warn!("Failed to reach {}: HTTP {}", url, status.as_u16());
        return Err(AnalyzeError::Unreachable {
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if !is_html(&content_type) {
        warn!("Rejecting {}: content type '{}'", url, content_type);
        return Err(AnalyzeError::InvalidContentType {
            actual: content_type,
        });
    }

    let body = response.bytes().await?;
    debug!("Fetched {} bytes from {}", body.len(), url);
    Ok(body.to_vec())
}

fn is_html(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}

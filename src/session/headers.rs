use anyhow::{Context, Result};
use reqwest::header::{self, HeaderMap, HeaderValue};
use url::Url;

use crate::config::SubmitSettings;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Builds the header set attached to both the priming and the deployment
/// request. The bearer value is flagged sensitive so it stays out of debug
/// output.
pub fn build_header_set(settings: &SubmitSettings) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut authorization = HeaderValue::from_str(&format!("Bearer {}", settings.token))
        .context("bearer token is not a valid header value")?;
    authorization.set_sensitive(true);
    headers.insert(header::AUTHORIZATION, authorization);

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE),
    );

    let origin = origin_header(&settings.origin);
    headers.insert(
        header::ORIGIN,
        HeaderValue::from_str(&origin)
            .with_context(|| format!("origin {origin} is not a valid header value"))?,
    );
    headers.insert(
        header::REFERER,
        HeaderValue::from_str(settings.origin.as_str())
            .with_context(|| format!("referer {} is not a valid header value", settings.origin))?,
    );

    Ok(headers)
}

/// `scheme://host[:port]` of the origin page, no path and no trailing slash.
pub fn origin_header(url: &Url) -> String {
    url.origin().ascii_serialization()
}

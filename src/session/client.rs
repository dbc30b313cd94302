use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use reqwest::{
    cookie::{CookieStore, Jar},
    header::HeaderMap,
    Client,
};
use tracing::debug;
use url::Url;

use crate::config::{ConfigDocument, SubmitSettings};

use super::error::SubmitError;

pub struct PrimeSummary {
    pub status: u16,
    pub duration_ms: f64,
}

pub struct DeployResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub duration_ms: f64,
}

/// A cookie-carrying session used for exactly two requests: the priming GET
/// and the deployment POST.
///
/// The two requests need different TLS policies, so the session owns two
/// clients wired to one cookie jar. Cookies stored while priming are sent
/// with the submission.
pub struct DeploySession {
    jar: Arc<Jar>,
    prime_client: Client,
    submit_client: Client,
    headers: HeaderMap,
    origin: Url,
    endpoint: Url,
    prime_timeout: Duration,
    submit_timeout: Duration,
}

impl DeploySession {
    pub fn new(settings: &SubmitSettings, headers: HeaderMap) -> Result<Self> {
        let jar = Arc::new(Jar::default());

        let prime_client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()
            .context("building priming HTTP client")?;

        let submit_client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .danger_accept_invalid_certs(true)
            .build()
            .context("building deployment HTTP client")?;

        Ok(Self {
            jar,
            prime_client,
            submit_client,
            headers,
            origin: settings.origin.clone(),
            endpoint: settings.endpoint.clone(),
            prime_timeout: settings.prime_timeout,
            submit_timeout: settings.submit_timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// GETs the origin page so the server can set session cookies. Any
    /// status counts as success; only transport failures are errors.
    pub async fn prime(&self) -> Result<PrimeSummary, SubmitError> {
        let fail = |source: reqwest::Error| {
            SubmitError::from_reqwest(&self.origin, self.prime_timeout, source)
        };

        let start = Instant::now();
        let response = self
            .prime_client
            .get(self.origin.clone())
            .headers(self.headers.clone())
            .timeout(self.prime_timeout)
            .send()
            .await
            .map_err(fail)?;
        let status = response.status().as_u16();
        response.bytes().await.map_err(fail)?;
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

        debug!(
            url = %self.origin,
            status,
            duration_ms,
            cookies = self.has_cookies_for(&self.endpoint),
            "priming request finished"
        );

        Ok(PrimeSummary {
            status,
            duration_ms,
        })
    }

    /// POSTs the document as the JSON body. The response is returned whatever
    /// its status.
    pub async fn submit(&self, document: &ConfigDocument) -> Result<DeployResponse, SubmitError> {
        let fail = |source: reqwest::Error| {
            SubmitError::from_reqwest(&self.endpoint, self.submit_timeout, source)
        };

        debug!(
            url = %self.endpoint,
            bytes = document.payload_bytes(),
            cookies = self.has_cookies_for(&self.endpoint),
            "submitting deployment config"
        );

        let start = Instant::now();
        let response = self
            .submit_client
            .post(self.endpoint.clone())
            .headers(self.headers.clone())
            .json(&document.value)
            .timeout(self.submit_timeout)
            .send()
            .await
            .map_err(fail)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(fail)?;
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

        debug!(status, bytes = body.len(), duration_ms, "deployment response received");

        Ok(DeployResponse {
            status,
            body: body.to_vec(),
            duration_ms,
        })
    }

    pub fn has_cookies_for(&self, url: &Url) -> bool {
        self.jar.cookies(url).is_some()
    }
}

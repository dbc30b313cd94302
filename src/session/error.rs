use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Failure of one of the two network steps. Neither is fatal to the run.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout {
        url: Url,
        timeout: Duration,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} failed")]
    Transport {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
}

impl SubmitError {
    pub(crate) fn from_reqwest(url: &Url, timeout: Duration, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            SubmitError::Timeout {
                url: url.clone(),
                timeout,
                source,
            }
        } else {
            SubmitError::Transport {
                url: url.clone(),
                source,
            }
        }
    }

    pub fn url(&self) -> &Url {
        match self {
            SubmitError::Timeout { url, .. } | SubmitError::Transport { url, .. } => url,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, SubmitError::Timeout { .. })
    }
}

use anyhow::Result;
use tracing::debug;

use crate::{
    config::{load_document, SubmitSettings},
    session::{build_header_set, DeploySession},
};

use super::{
    models::{RequestSummary, RunReport},
    printer::{
        describe_error, print_deploying, print_primed, print_prime_warning, print_reading,
        print_response, print_submit_error,
    },
};

/// Runs one submission: load, prime, post, report.
///
/// Only failures before the first request (an unreadable or invalid config
/// document, an unusable header value) are returned as errors. Network
/// failures are printed and recorded in the report.
pub async fn run(settings: &SubmitSettings) -> Result<RunReport> {
    print_reading(&settings.config_path);
    let document = load_document(&settings.config_path)?;

    let headers = build_header_set(settings)?;
    print_deploying(&settings.endpoint, &settings.env_files);

    let session = DeploySession::new(settings, headers)?;

    let prime = session.prime().await;
    match &prime {
        Ok(summary) => print_primed(summary),
        Err(err) => {
            debug!(error = %describe_error(err), "priming request failed");
            print_prime_warning(err);
        }
    }

    let submit = session.submit(&document).await;
    match &submit {
        Ok(response) => {
            debug!(status = response.status, "deployment submitted");
            print_response(response);
        }
        Err(err) => {
            debug!(
                error = %describe_error(err),
                timeout = err.is_timeout(),
                "deployment request failed"
            );
            print_submit_error(err);
        }
    }

    Ok(RunReport {
        request: RequestSummary {
            endpoint: session.endpoint().to_string(),
            payload_bytes: document.payload_bytes(),
        },
        prime,
        submit,
    })
}

use crate::session::{DeployResponse, PrimeSummary, SubmitError};

pub struct RunReport {
    pub request: RequestSummary,
    pub prime: Result<PrimeSummary, SubmitError>,
    pub submit: Result<DeployResponse, SubmitError>,
}

pub struct RequestSummary {
    pub endpoint: String,
    pub payload_bytes: usize,
}

impl RunReport {
    pub fn delivered(&self) -> Option<&DeployResponse> {
        self.submit.as_ref().ok()
    }
}

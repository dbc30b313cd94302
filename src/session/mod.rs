mod client;
mod error;
mod headers;

pub use client::{DeployResponse, DeploySession, PrimeSummary};
pub use error::SubmitError;
pub use headers::{build_header_set, origin_header, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

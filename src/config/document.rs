use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

/// The deployment configuration as read from disk. Its shape is opaque and
/// it is forwarded untouched as the request payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    pub value: Value,
    pub path: PathBuf,
}

impl ConfigDocument {
    /// Size of the document once serialized as a request body.
    pub fn payload_bytes(&self) -> usize {
        serde_json::to_vec(&self.value)
            .map(|bytes| bytes.len())
            .unwrap_or_default()
    }
}

pub fn load_document(path: &Path) -> Result<ConfigDocument> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;

    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("parsing config {}", path.display()))?;

    debug!(path = %path.display(), bytes = contents.len(), "loaded deployment config");

    Ok(ConfigDocument {
        value,
        path: path.to_path_buf(),
    })
}

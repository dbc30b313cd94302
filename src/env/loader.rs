use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::debug;

use crate::env::EnvMap;

/// Reads a dotenv file into `env` without touching the process environment.
pub fn load_env_file(path: &Path, env: &mut EnvMap) -> Result<PathBuf> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading env file {}", path.display()))?;
    let iter = dotenvy::from_read_iter(Cursor::new(content));

    let mut count = 0usize;
    for item in iter {
        let (key, value) = item.with_context(|| format!("parsing env file {}", path.display()))?;
        env.insert(key, value);
        count += 1;
    }

    debug!(path = %path.display(), count, "loaded env file");
    Ok(path.to_path_buf())
}

/// Dotenv values win over the process environment.
pub fn lookup(env: &EnvMap, key: &str) -> Option<String> {
    env.get(key)
        .cloned()
        .or_else(|| std::env::var(key).ok())
        .filter(|value| !value.trim().is_empty())
}
